//! Scanner errors.

use std::path::PathBuf;

use super::error_code::{self, LapseErrorCode};

/// Errors that can occur during file discovery and reading.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("IO error scanning {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Scan root does not exist: {path}")]
    RootNotFound { path: PathBuf },

    #[error("Scan cancelled")]
    Cancelled,

    #[error("File too large: {path} ({size} bytes, max {max})")]
    MaxFileSizeExceeded { path: PathBuf, size: u64, max: u64 },
}

impl LapseErrorCode for ScanError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Cancelled => error_code::CANCELLED,
            Self::MaxFileSizeExceeded { .. } => error_code::FILE_TOO_LARGE,
            _ => error_code::SCAN_ERROR,
        }
    }
}
