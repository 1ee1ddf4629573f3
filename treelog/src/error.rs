use std::any::Any;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration file '{file}': {source}")]
    ConfigParseError {
        source: toml::de::Error,
        file: String,
    },

    #[error("Invalid configuration value for '{key}': {reason}")]
    InvalidConfig { key: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Why a value, or one of its members, could not be described.
///
/// These never escape tree generation: they are rendered inline as `<error: ...>` leaves.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntrospectError {
    #[error("`{member}` failed: {message}")]
    Getter { member: String, message: String },

    #[error("panicked: {message}")]
    Panicked { message: String },
}

impl IntrospectError {
    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };
        IntrospectError::Panicked { message }
    }
}
