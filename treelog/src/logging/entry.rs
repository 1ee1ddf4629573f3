#[cfg(feature = "serialize")]
use serde::Serialize;
use uuid::Uuid;

use crate::{
    logging::{LogInfo, LogLevel},
    render::render,
    tree::Node,
};

/// One stored record: the tree of the logged value and its call-site metadata.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
pub struct LogEntry {
    id: Uuid,
    node: Node,
    info: LogInfo,
}

impl LogEntry {
    pub fn new(node: Node, info: LogInfo) -> Self {
        LogEntry {
            id: Uuid::new_v4(),
            node,
            info,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn info(&self) -> &LogInfo {
        &self.info
    }

    pub fn level(&self) -> LogLevel {
        self.info.level()
    }

    /// `[HH:MM:SS]` for informational records, `[HH:MM:SS - Level]` for the rest.
    pub fn header(&self) -> String {
        let time = self.info.time().format("%H:%M:%S");
        match self.info.level() {
            LogLevel::Info => format!("[{time}]"),
            level => format!("[{time} - {level}]"),
        }
    }

    /// Header followed by the rendered tree.
    pub fn render(&self) -> String {
        format!("{} {}", self.header(), render(&self.node))
    }

    pub fn matches_query(&self, query: &str) -> bool {
        self.node.matches_query(query)
    }
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}
