//! Scanner data types.

use std::path::PathBuf;

use lapse_core::errors::ScanError;

/// A source file selected for analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    /// Path relative to the scan root, `/`-separated. Used as the finding file.
    pub relative: String,
    pub file_size: u64,
}

/// Aggregate statistics for one discovery pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub total_files: usize,
    pub total_size_bytes: u64,
    pub files_skipped_large: usize,
    pub files_skipped_ignored: usize,
    pub discovery_ms: u64,
}

/// Files found plus the non-fatal problems met on the way.
#[derive(Debug, Default)]
pub struct ScanOutput {
    pub files: Vec<DiscoveredFile>,
    pub errors: Vec<ScanError>,
    pub stats: ScanStats,
}
