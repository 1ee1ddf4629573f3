//! Log records, the bounded store that keeps them, and the logger front-end.
use chrono::{DateTime, Local};
#[cfg(feature = "serialize")]
use serde::Serialize;
use serde::Deserialize;
use strum::{Display, EnumIter};

pub mod entry;
pub mod logger;
pub mod store;

pub use entry::LogEntry;
pub use logger::{CallSite, Logger};
pub use store::{LogStore, ObserverId, StoreEvent};

/// Severity of a log record.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumIter,
    Deserialize,
)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
#[serde(rename_all = "lowercase")]
#[repr(u32)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Trace => LogLevel::Trace,
            log::Level::Debug => LogLevel::Debug,
            log::Level::Info => LogLevel::Info,
            log::Level::Warn => LogLevel::Warn,
            log::Level::Error => LogLevel::Error,
        }
    }
}

/// Where in the source a record was emitted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        SourceLocation {
            file: file.into(),
            line,
            column,
        }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// Call-site metadata attached to a log record.
///
/// File, line and column live together in one optional [`SourceLocation`], so they are
/// either all known or all absent.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
pub struct LogInfo {
    level: LogLevel,
    time: DateTime<Local>,
    stack_trace: String,
    location: Option<SourceLocation>,
    module_path: Option<String>,
    thread_name: Option<String>,
}

impl LogInfo {
    pub fn new(level: LogLevel, time: DateTime<Local>, stack_trace: impl Into<String>) -> Self {
        LogInfo {
            level,
            time,
            stack_trace: stack_trace.into(),
            location: None,
            module_path: None,
            thread_name: None,
        }
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_module_path(mut self, module_path: impl Into<String>) -> Self {
        self.module_path = Some(module_path.into());
        self
    }

    pub fn with_thread_name(mut self, thread_name: impl Into<String>) -> Self {
        self.thread_name = Some(thread_name.into());
        self
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn time(&self) -> DateTime<Local> {
        self.time
    }

    pub fn stack_trace(&self) -> &str {
        &self.stack_trace
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }

    pub fn file_path(&self) -> Option<&str> {
        self.location.as_ref().map(|l| l.file.as_str())
    }

    pub fn line_number(&self) -> Option<u32> {
        self.location.as_ref().map(|l| l.line)
    }

    pub fn column(&self) -> Option<u32> {
        self.location.as_ref().map(|l| l.column)
    }

    pub fn module_path(&self) -> Option<&str> {
        self.module_path.as_deref()
    }

    pub fn thread_name(&self) -> Option<&str> {
        self.thread_name.as_deref()
    }
}
