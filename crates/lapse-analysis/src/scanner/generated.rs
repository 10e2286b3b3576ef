//! Generated-code detection.
//!
//! Generated files are still parsed (they may hold partial declarations)
//! but findings located in them are not reported by default.

use std::path::Path;

const GENERATED_SUFFIXES: &[&str] = &[".designer.cs", ".generated.cs", ".g.cs", ".g.i.cs"];
const GENERATED_PREFIX: &str = "temporarygeneratedfile_";
const HEADER_MARKERS: &[&str] = &["<auto-generated", "<autogenerated"];

/// `true` if the file name follows a code generator naming convention.
pub fn is_generated_path(path: &Path) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    let name = name.to_string_lossy().to_ascii_lowercase();
    name.starts_with(GENERATED_PREFIX) || GENERATED_SUFFIXES.iter().any(|s| name.ends_with(s))
}

/// `true` if the leading comment block carries an `<auto-generated>` marker.
/// Only comments before the first line of code are inspected.
pub fn has_generated_header(source: &str) -> bool {
    let mut in_block = false;
    for line in source.lines() {
        let line = line.trim();
        let is_comment = in_block || line.is_empty() || line.starts_with("//") || line.starts_with("/*");
        if !is_comment {
            return false;
        }
        if line.starts_with("/*") {
            in_block = true;
        }
        if in_block && line.contains("*/") {
            in_block = false;
        }
        let lower = line.to_ascii_lowercase();
        if HEADER_MARKERS.iter().any(|m| lower.contains(m)) {
            return true;
        }
    }
    false
}

pub fn is_generated(path: &Path, source: &str) -> bool {
    is_generated_path(path) || has_generated_header(source)
}
