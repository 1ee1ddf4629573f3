use std::{
    backtrace::{Backtrace, BacktraceStatus},
    fmt,
    sync::Arc,
};

use chrono::Local;

use crate::{
    config::{Config, LoggerConfig},
    error::Result,
    introspect::Introspect,
    logging::{LogEntry, LogInfo, LogLevel, LogStore, SourceLocation},
    tree::{Node, TreeGenerator},
};

/// Source position captured by the logging macros.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
    pub module_path: &'static str,
}

impl CallSite {
    pub const fn new(file: &'static str, line: u32, column: u32, module_path: &'static str) -> Self {
        CallSite {
            file,
            line,
            column,
            module_path,
        }
    }
}

/// Turns values and messages into [`LogEntry`] records and appends them to a [`LogStore`].
#[derive(Debug, Clone)]
pub struct Logger {
    store: Arc<LogStore>,
    generator: TreeGenerator,
    min_level: LogLevel,
    capture_backtrace: bool,
}

impl Logger {
    pub fn new(store: Arc<LogStore>) -> Self {
        let config = LoggerConfig::default();
        Logger {
            store,
            generator: TreeGenerator::default(),
            min_level: config.min_level,
            capture_backtrace: config.capture_backtrace,
        }
    }

    /// Logger writing to a fresh store, both set up from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let store = LogStore::new(config.store.clone())?;
        Ok(Logger {
            store: Arc::new(store),
            generator: TreeGenerator::from_config(&config.tree),
            min_level: config.logger.min_level,
            capture_backtrace: config.logger.capture_backtrace,
        })
    }

    pub fn with_generator(mut self, generator: TreeGenerator) -> Self {
        self.generator = generator;
        self
    }

    pub fn with_min_level(mut self, min_level: LogLevel) -> Self {
        self.min_level = min_level;
        self
    }

    pub fn with_capture_backtrace(mut self, capture_backtrace: bool) -> Self {
        self.capture_backtrace = capture_backtrace;
        self
    }

    pub fn store(&self) -> &Arc<LogStore> {
        &self.store
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    /// Logs the tree of `value`. Returns the stored entry, or `None` when `level` is
    /// below the minimum level.
    pub fn log(
        &self,
        level: LogLevel,
        value: &dyn Introspect,
        site: CallSite,
    ) -> Option<Arc<LogEntry>> {
        if !self.enabled(level) {
            return None;
        }
        let node = self.generator.generate(value);
        Some(self.record(level, node, site))
    }

    /// Logs a formatted message as a single text leaf.
    pub fn log_fmt(
        &self,
        level: LogLevel,
        args: fmt::Arguments<'_>,
        site: CallSite,
    ) -> Option<Arc<LogEntry>> {
        if !self.enabled(level) {
            return None;
        }
        let message = args.to_string();
        let node = self.generator.generate(&message);
        Some(self.record(level, node, site))
    }

    fn record(&self, level: LogLevel, node: Node, site: CallSite) -> Arc<LogEntry> {
        let mut info = LogInfo::new(level, Local::now(), self.stack_trace())
            .with_location(SourceLocation::new(site.file, site.line, site.column))
            .with_module_path(site.module_path);
        if let Some(name) = std::thread::current().name() {
            info = info.with_thread_name(name);
        }

        self.store.append(LogEntry::new(node, info))
    }

    fn stack_trace(&self) -> String {
        let backtrace = if self.capture_backtrace {
            Backtrace::force_capture()
        } else {
            Backtrace::capture()
        };

        match backtrace.status() {
            BacktraceStatus::Captured => backtrace.to_string(),
            _ => String::new(),
        }
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::CallSite::new(file!(), line!(), column!(), module_path!())
    };
}

/// Logs through a [`Logger`](crate::Logger) at an explicit level.
///
/// ```
/// use treelog::{LogLevel, Logger, tlog};
///
/// let logger = Logger::new(Default::default());
/// tlog!(logger, LogLevel::Info, "{} items loaded", 3);
/// tlog!(logger, LogLevel::Debug, value = vec![1, 2, 3]);
/// assert_eq!(logger.store().len(), 2);
/// ```
#[macro_export]
macro_rules! tlog {
    ($logger:expr, $level:expr, value = $value:expr $(,)?) => {
        $crate::Logger::log(&$logger, $level, &$value, $crate::call_site!())
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $crate::Logger::log_fmt(&$logger, $level, format_args!($($arg)+), $crate::call_site!())
    };
}

#[macro_export]
macro_rules! tl_trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::tlog!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

#[macro_export]
macro_rules! tl_debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::tlog!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! tl_info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::tlog!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! tl_warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::tlog!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

#[macro_export]
macro_rules! tl_error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::tlog!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}
