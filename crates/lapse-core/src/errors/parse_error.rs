//! Parser errors.

use std::path::PathBuf;

use super::error_code::{self, LapseErrorCode};

/// Errors that can occur while turning source text into a syntax tree.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Grammar could not be loaded for language: {language}")]
    GrammarNotFound { language: String },

    #[error("Tree-sitter error parsing {path}: {message}")]
    TreeSitterError { path: PathBuf, message: String },

    #[error("Source is not valid UTF-8: {path}")]
    InvalidUtf8 { path: PathBuf },

    #[error("Partial parse of {path}: {message}")]
    PartialParse { path: PathBuf, message: String },
}

impl LapseErrorCode for ParseError {
    fn error_code(&self) -> &'static str {
        error_code::PARSE_ERROR
    }
}
