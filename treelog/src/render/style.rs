use termcolor::{Color, ColorSpec};

use crate::{logging::LogLevel, tree::NodeKind};

/// Styles applied to the parts of a colored rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// The `": "` and `","` separators.
    Punct,
    /// Brackets are colored by nesting level so matching pairs share a color.
    Bracket(usize),
    /// Indices, keys and member names.
    Prefix,
    /// Labels of composite nodes.
    Type,
    Null,
    Shallow,
    Enum,
    Error,
    Header(LogLevel),
}

impl Style {
    /// Style of a node's label, `None` for plain simple values.
    pub fn for_label(kind: NodeKind, is_error: bool) -> Option<Style> {
        if is_error {
            return Some(Style::Error);
        }
        match kind {
            NodeKind::Simple => None,
            NodeKind::Shallow => Some(Style::Shallow),
            NodeKind::Enum => Some(Style::Enum),
            NodeKind::Null => Some(Style::Null),
            NodeKind::Collection | NodeKind::Dictionary | NodeKind::Object => Some(Style::Type),
        }
    }

    pub fn to_color_spec(self) -> ColorSpec {
        let mut s = ColorSpec::new();
        match self {
            Style::Punct => {
                s.set_dimmed(true);
            }
            Style::Bracket(level) => {
                let fg = match level % 4 {
                    0 => Color::Blue,
                    1 => Color::Green,
                    2 => Color::Yellow,
                    _ => Color::Magenta,
                };
                s.set_fg(Some(fg));
            }
            Style::Prefix => {
                s.set_fg(Some(Color::Cyan));
            }
            Style::Type => {
                s.set_fg(Some(Color::Magenta)).set_bold(true);
            }
            Style::Null => {
                s.set_fg(Some(Color::Blue)).set_italic(true);
            }
            Style::Shallow => {
                s.set_dimmed(true).set_italic(true);
            }
            Style::Enum => {
                s.set_fg(Some(Color::Green));
            }
            Style::Error => {
                s.set_fg(Some(Color::Red)).set_bold(true);
            }
            Style::Header(LogLevel::Error) => {
                s.set_fg(Some(Color::Red)).set_bold(true);
            }
            Style::Header(LogLevel::Warn) => {
                s.set_fg(Some(Color::Yellow)).set_bold(true);
            }
            Style::Header(LogLevel::Info) => {
                s.set_bold(true);
            }
            Style::Header(_) => {
                s.set_dimmed(true);
            }
        }
        s
    }
}
