//! Text rendering of [`Node`] trees and log entries.
//!
//! The indented form is the canonical one: it is byte-identical across calls and never
//! truncated. Colored output follows the same layout and only adds `termcolor` styles.
use std::{
    convert::Infallible,
    io::{self, Write},
};

use termcolor::{ColorChoice, StandardStream, WriteColor};

use crate::{
    config::{INDENT_WIDTH, RenderConfig},
    logging::LogEntry,
    tree::{Node, NodeKind},
};

mod style;

pub use style::Style;

/// Destination of a rendering pass.
trait Sink {
    type Error;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error>;
    fn push_style(&mut self, style: Style) -> Result<(), Self::Error>;
    fn pop_style(&mut self) -> Result<(), Self::Error>;

    fn styled(&mut self, style: Option<Style>, s: &str) -> Result<(), Self::Error> {
        match style {
            Some(style) => {
                self.push_style(style)?;
                self.write_str(s)?;
                self.pop_style()
            }
            None => self.write_str(s),
        }
    }
}

struct PlainSink<'a> {
    out: &'a mut String,
}

impl Sink for PlainSink<'_> {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Infallible> {
        self.out.push_str(s);
        Ok(())
    }

    fn push_style(&mut self, _style: Style) -> Result<(), Infallible> {
        Ok(())
    }

    fn pop_style(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

// Maps styles to termcolor specs on a WriteColor sink.
struct ColorSink<'w, W: WriteColor> {
    out: &'w mut W,
}

impl<W: WriteColor> Sink for ColorSink<'_, W> {
    type Error = io::Error;

    fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.out.write_all(s.as_bytes())
    }

    fn push_style(&mut self, style: Style) -> io::Result<()> {
        self.out.set_color(&style.to_color_spec())
    }

    fn pop_style(&mut self) -> io::Result<()> {
        self.out.reset()
    }
}

fn into_ok<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

/// Indented tree renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderer {
    indent_width: usize,
}

impl Default for Renderer {
    fn default() -> Self {
        Renderer {
            indent_width: INDENT_WIDTH,
        }
    }
}

impl Renderer {
    pub fn new(indent_width: usize) -> Self {
        Renderer { indent_width }
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Renderer::new(config.indent_width)
    }

    pub fn indent_width(&self) -> usize {
        self.indent_width
    }

    pub fn render(&self, node: &Node) -> String {
        self.render_at(node, 0)
    }

    /// Renders `node` as if it sat `level` levels deep.
    pub fn render_at(&self, node: &Node, level: usize) -> String {
        let mut out = String::new();
        into_ok(self.emit(node, level, &mut PlainSink { out: &mut out }));
        out
    }

    /// Same layout as [`Renderer::render`], written with colors.
    pub fn write_colored<W: WriteColor>(&self, node: &Node, out: &mut W) -> io::Result<()> {
        let mut sink = ColorSink { out };
        self.emit(node, 0, &mut sink)?;
        sink.out.reset()
    }

    /// Header colored by level, then the tree.
    pub fn write_entry_colored<W: WriteColor>(
        &self,
        entry: &LogEntry,
        out: &mut W,
    ) -> io::Result<()> {
        let mut sink = ColorSink { out };
        sink.styled(Some(Style::Header(entry.level())), &entry.header())?;
        sink.write_str(" ")?;
        self.emit(entry.node(), 0, &mut sink)?;
        sink.out.reset()
    }

    fn indent<S: Sink>(&self, level: usize, sink: &mut S) -> Result<(), S::Error> {
        sink.write_str(&" ".repeat(self.indent_width * level))
    }

    fn emit<S: Sink>(&self, node: &Node, level: usize, sink: &mut S) -> Result<(), S::Error> {
        self.indent(level, sink)?;

        if let Some(prefix) = node.prefix() {
            sink.styled(Some(Style::Prefix), prefix)?;
            sink.styled(Some(Style::Punct), ": ")?;
        }

        sink.styled(Style::for_label(node.kind(), node.is_error()), node.label())?;

        if node.is_leaf() {
            return Ok(());
        }

        let (open, close) = node.kind().brackets();
        sink.styled(Some(Style::Punct), ": ")?;
        sink.styled(Some(Style::Bracket(level)), open)?;
        sink.write_str("\n")?;

        for (index, child) in node.children().iter().enumerate() {
            if index > 0 {
                sink.styled(Some(Style::Punct), ",")?;
                sink.write_str("\n")?;
            }
            self.emit(child, level + 1, sink)?;
        }

        sink.write_str("\n")?;
        self.indent(level, sink)?;
        sink.styled(Some(Style::Bracket(level)), close)
    }
}

/// Indented rendering with the default indent width.
pub fn render(node: &Node) -> String {
    Renderer::default().render(node)
}

/// Single-line rendering: `[1, 2]` for collections, `{ key: value }` for dictionaries and
/// objects, the label alone for every other leaf.
pub fn render_compact(node: &Node) -> String {
    let mut out = String::new();
    compact(node, &mut out);
    out
}

fn compact(node: &Node, out: &mut String) {
    if node.is_leaf() {
        match node.kind() {
            NodeKind::Collection => out.push_str("[]"),
            NodeKind::Dictionary => out.push_str("{}"),
            _ => out.push_str(node.label()),
        }
        return;
    }

    let keyed = !node.kind().is_collection();
    out.push_str(if keyed { "{ " } else { "[" });
    for (index, child) in node.children().iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        if keyed && let Some(prefix) = child.prefix() {
            out.push_str(prefix);
            out.push_str(": ");
        }
        compact(child, out);
    }
    out.push_str(if keyed { " }" } else { "]" });
}

/// Writes the colored rendering of `node` to stdout, when the terminal supports it.
pub fn print_colored(node: &Node) -> io::Result<()> {
    let stdout = StandardStream::stdout(ColorChoice::Auto);
    let mut stdout = stdout.lock();
    Renderer::default().write_colored(node, &mut stdout)?;
    writeln!(stdout)
}
