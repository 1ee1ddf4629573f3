//! Configuration constants and the optional TOML configuration file.
//!
//! ```toml
//! [tree]
//! max_depth = 8
//! contain_panics = true
//!
//! [store]
//! max_logs = 512
//! eviction_batch = 64
//!
//! [render]
//! indent_width = 2
//!
//! [logger]
//! min_level = "debug"
//! capture_backtrace = false
//! ```
//!
//! Every key is optional and falls back to the constants below.
use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::{
    error::{Error, Result},
    logging::LogLevel,
};

/// Default depth ceiling of generated trees.
pub const MAX_DEPTH: i32 = 8;

/// Default capacity of the log store.
pub const MAX_LOGS: usize = 512;

/// Default number of oldest entries dropped together when the store is full.
pub const EVICTION_BATCH: usize = 64;

/// Default number of spaces per nesting level in rendered trees.
pub const INDENT_WIDTH: usize = 2;

const MAX_INDENT_WIDTH: usize = 16;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub tree: TreeConfig,
    pub store: StoreConfig,
    pub render: RenderConfig,
    pub logger: LoggerConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TreeConfig {
    pub max_depth: i32,
    pub contain_panics: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        TreeConfig {
            max_depth: MAX_DEPTH,
            contain_panics: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub max_logs: usize,
    pub eviction_batch: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            max_logs: MAX_LOGS,
            eviction_batch: EVICTION_BATCH,
        }
    }
}

impl StoreConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_logs == 0 {
            return Err(Error::InvalidConfig {
                key: "store.max_logs",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.eviction_batch == 0 {
            return Err(Error::InvalidConfig {
                key: "store.eviction_batch",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.eviction_batch > self.max_logs {
            return Err(Error::InvalidConfig {
                key: "store.eviction_batch",
                reason: format!(
                    "is {} but cannot exceed store.max_logs ({})",
                    self.eviction_batch, self.max_logs
                ),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub indent_width: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            indent_width: INDENT_WIDTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    /// Records below this level are dropped.
    pub min_level: LogLevel,
    /// Capture a backtrace for every record, regardless of `RUST_BACKTRACE`.
    pub capture_backtrace: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        LoggerConfig {
            min_level: LogLevel::Trace,
            capture_backtrace: false,
        }
    }
}

impl Config {
    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::parse(content, "<inline>")
    }

    /// Reads, parses and validates the configuration file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(&content, &path.display().to_string())?;
        debug!("Loaded treelog configuration from {}", path.display());
        Ok(config)
    }

    fn parse(content: &str, file: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(|source| Error::ConfigParseError {
            source,
            file: file.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.store.validate()?;
        if self.render.indent_width > MAX_INDENT_WIDTH {
            return Err(Error::InvalidConfig {
                key: "render.indent_width",
                reason: format!(
                    "is {} but cannot exceed {MAX_INDENT_WIDTH}",
                    self.render.indent_width
                ),
            });
        }
        Ok(())
    }
}
