//! Default ignore patterns for C# trees.

use std::path::Path;

use ignore::gitignore::{Gitignore, GitignoreBuilder};

/// Name of the project ignore file, gitignore syntax.
pub const IGNORE_FILE: &str = ".lapseignore";

/// Directories that never hold hand-written sources.
pub const DEFAULT_IGNORE_DIRS: &[&str] = &[
    // Build outputs
    "bin/",
    "obj/",
    "out/",
    "artifacts/",
    // Package caches
    "packages/",
    ".nuget/",
    "node_modules/",
    // Version control
    ".git/",
    ".svn/",
    ".hg/",
    // IDE/Editor
    ".vs/",
    ".vscode/",
    ".idea/",
];

/// Compiled default and user-supplied patterns.
pub struct IgnorePatterns {
    gitignore: Gitignore,
}

impl IgnorePatterns {
    /// Defaults plus `extra_patterns` plus the root's `.lapseignore`.
    /// Malformed patterns are skipped with a warning.
    pub fn new(root: &Path, extra_patterns: &[String]) -> Self {
        let mut builder = GitignoreBuilder::new(root);

        for pattern in DEFAULT_IGNORE_DIRS {
            let _ = builder.add_line(None, pattern);
        }

        for pattern in extra_patterns {
            if let Err(e) = builder.add_line(None, pattern) {
                tracing::warn!(pattern = %pattern, error = %e, "invalid ignore pattern");
            }
        }

        let project_ignore = root.join(IGNORE_FILE);
        if project_ignore.exists() {
            if let Some(e) = builder.add(&project_ignore) {
                tracing::warn!(path = %project_ignore.display(), error = %e, "unreadable ignore file");
            }
        }

        let gitignore = match builder.build() {
            Ok(gitignore) => gitignore,
            Err(e) => {
                tracing::warn!(error = %e, "ignore patterns failed to compile, using none");
                Gitignore::empty()
            }
        };
        Self { gitignore }
    }

    /// Check `path` (relative to the root) and each of its parent directories.
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        self.gitignore
            .matched_path_or_any_parents(path, is_dir)
            .is_ignore()
    }
}
