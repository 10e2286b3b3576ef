//! Stable error codes for machine-readable output.

/// Every error enum implements this to expose a stable code string
/// alongside its human-readable `Display` message.
pub trait LapseErrorCode {
    /// Returns the error code string (e.g., "SCAN_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const SCAN_ERROR: &str = "SCAN_ERROR";
pub const PARSE_ERROR: &str = "PARSE_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const ANALYSIS_ERROR: &str = "ANALYSIS_ERROR";
pub const BUDGET_EXCEEDED: &str = "BUDGET_EXCEEDED";
pub const CANCELLED: &str = "CANCELLED";
pub const FILE_TOO_LARGE: &str = "FILE_TOO_LARGE";
