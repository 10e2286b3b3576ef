//! Configuration errors.

use std::path::PathBuf;

use super::error_code::{self, LapseErrorCode};

/// Failure to load, parse, or validate a `LapseConfig` layer.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no config file at {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("cannot read config {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// `origin` is a file path, or `<string>` for inline TOML.
    #[error("malformed TOML in {origin}: {message}")]
    ParseError { origin: String, message: String },

    #[error("`{field}` {message}")]
    ValidationFailed { field: String, message: String },

    #[error("`{field}` has an unusable value: {message}")]
    InvalidValue { field: String, message: String },
}

impl ConfigError {
    /// The dotted config key at fault, for validation errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::ValidationFailed { field, .. } | Self::InvalidValue { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl LapseErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        error_code::CONFIG_ERROR
    }
}
