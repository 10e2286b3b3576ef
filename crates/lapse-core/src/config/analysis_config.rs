//! Analysis configuration.

use serde::{Deserialize, Serialize};

use crate::diagnostics::Severity;

/// Configuration for the event-leak rule and its host pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Whether the rule runs at all. Default: true.
    pub enabled: Option<bool>,
    /// Upper bound on nodes visited per unsubscription search. Exceeding
    /// it yields no diagnostic for that site. Default: unbounded.
    pub max_descendants: Option<usize>,
    /// Report findings located in generated files. Default: false.
    pub analyze_generated_code: Option<bool>,
    /// Honor `#pragma warning disable/restore`. Default: true.
    pub respect_pragmas: Option<bool>,
    /// Override of the rule's default severity.
    pub severity: Option<Severity>,
}

impl AnalysisConfig {
    pub fn effective_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub fn effective_analyze_generated_code(&self) -> bool {
        self.analyze_generated_code.unwrap_or(false)
    }

    pub fn effective_respect_pragmas(&self) -> bool {
        self.respect_pragmas.unwrap_or(true)
    }
}
