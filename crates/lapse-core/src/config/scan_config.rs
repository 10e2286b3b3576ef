//! Scanner configuration.

use serde::{Deserialize, Serialize};

/// Configuration for source file discovery.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScanConfig {
    /// Maximum file size in bytes. Default: 1MB.
    pub max_file_size: Option<u64>,
    /// Worker threads. 0 or unset = rayon default.
    pub threads: Option<usize>,
    /// Additional ignore patterns (gitignore syntax).
    #[serde(default)]
    pub extra_ignore: Vec<String>,
    /// File extensions to analyze. Default: `["cs"]`.
    #[serde(default)]
    pub extensions: Vec<String>,
    /// Follow symbolic links. Default: false.
    pub follow_symlinks: Option<bool>,
}

impl ScanConfig {
    pub fn effective_max_file_size(&self) -> u64 {
        self.max_file_size.unwrap_or(1_048_576)
    }

    pub fn effective_threads(&self) -> usize {
        self.threads.unwrap_or(0)
    }

    pub fn effective_extensions(&self) -> Vec<String> {
        if self.extensions.is_empty() {
            vec!["cs".to_string()]
        } else {
            self.extensions.clone()
        }
    }

    pub fn effective_follow_symlinks(&self) -> bool {
        self.follow_symlinks.unwrap_or(false)
    }
}
