//! Source discovery using the `ignore` walker.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use ignore::WalkBuilder;
use lapse_core::config::ScanConfig;
use lapse_core::errors::ScanError;
use lapse_core::traits::{Cancellable, CancellationToken};

use super::ignores::IgnorePatterns;
use super::types::{DiscoveredFile, ScanOutput};

/// Finds source files under a root, honoring `.gitignore`, `.lapseignore`,
/// the default ignore list, and `scan.extra_ignore`.
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    config: ScanConfig,
}

impl Scanner {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Sorted list of analyzable files under `root`. Oversized and
    /// unreadable entries are dropped; use [`Scanner::scan`] to see them.
    pub fn discover(&self, root: &Path) -> Result<Vec<DiscoveredFile>, ScanError> {
        Ok(self.scan(root, &CancellationToken::new())?.files)
    }

    /// Walk `root`. Only a missing root or cancellation fails the whole scan.
    pub fn scan(&self, root: &Path, cancel: &CancellationToken) -> Result<ScanOutput, ScanError> {
        let start = Instant::now();
        if !root.exists() {
            return Err(ScanError::RootNotFound {
                path: root.to_path_buf(),
            });
        }

        let extensions = self.config.effective_extensions();
        let max_file_size = self.config.effective_max_file_size();
        let patterns = Arc::new(IgnorePatterns::new(root, &self.config.extra_ignore));
        let skipped_ignored = Arc::new(AtomicUsize::new(0));

        let mut builder = WalkBuilder::new(root);
        builder
            .follow_links(self.config.effective_follow_symlinks())
            .hidden(false)
            .parents(false)
            .git_global(false)
            .require_git(false);
        {
            let patterns = Arc::clone(&patterns);
            let skipped = Arc::clone(&skipped_ignored);
            let root = root.to_path_buf();
            builder.filter_entry(move |entry| {
                let Ok(relative) = entry.path().strip_prefix(&root) else {
                    return true;
                };
                if relative.as_os_str().is_empty() {
                    return true;
                }
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                if patterns.is_ignored(relative, is_dir) {
                    skipped.fetch_add(1, Ordering::Relaxed);
                    return false;
                }
                true
            });
        }

        let mut output = ScanOutput::default();
        for result in builder.build() {
            if cancel.is_cancelled() {
                return Err(ScanError::Cancelled);
            }
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    output.errors.push(walk_error(root, err));
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let path = entry.path();
            if !has_extension(path, &extensions) {
                continue;
            }
            let size = match entry.metadata() {
                Ok(metadata) => metadata.len(),
                Err(err) => {
                    output.errors.push(walk_error(path, err));
                    continue;
                }
            };
            if size > max_file_size {
                tracing::warn!(path = %path.display(), size, max = max_file_size, "skipping oversized file");
                output.stats.files_skipped_large += 1;
                output.errors.push(ScanError::MaxFileSizeExceeded {
                    path: path.to_path_buf(),
                    size,
                    max: max_file_size,
                });
                continue;
            }
            output.stats.total_size_bytes += size;
            output.files.push(DiscoveredFile {
                path: path.to_path_buf(),
                relative: relative_path(root, path),
                file_size: size,
            });
        }

        output.files.sort_by(|a, b| a.relative.cmp(&b.relative));
        output.stats.total_files = output.files.len();
        output.stats.files_skipped_ignored = skipped_ignored.load(Ordering::Relaxed);
        output.stats.discovery_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            root = %root.display(),
            files = output.stats.total_files,
            skipped_large = output.stats.files_skipped_large,
            skipped_ignored = output.stats.files_skipped_ignored,
            ms = output.stats.discovery_ms,
            "discovery complete"
        );
        Ok(output)
    }
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)))
}

/// `path` relative to `root` with `/` separators; the file name when
/// `root` is the file itself.
fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    if relative.as_os_str().is_empty() {
        return path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
    }
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn walk_error(fallback: &Path, err: ignore::Error) -> ScanError {
    let path = match &err {
        ignore::Error::WithPath { path, .. } => path.clone(),
        _ => PathBuf::from(fallback),
    };
    let message = err.to_string();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::other(message));
    ScanError::IoError { path, source }
}
