//! Analysis errors.
//!
//! The rule itself never fails: these values describe why a subscription
//! site was skipped, for tracing and for the non-fatal error list of a
//! pipeline run.

use super::error_code::{self, LapseErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error("Containing type could not be resolved at {file}:{line}")]
    UnresolvedContainingType { file: String, line: u32 },

    #[error("Unsubscription search at {file}:{line} exceeded {limit} nodes")]
    BudgetExceeded { file: String, line: u32, limit: usize },
}

impl LapseErrorCode for AnalysisError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnresolvedContainingType { .. } => error_code::ANALYSIS_ERROR,
            Self::BudgetExceeded { .. } => error_code::BUDGET_EXCEEDED,
        }
    }
}
