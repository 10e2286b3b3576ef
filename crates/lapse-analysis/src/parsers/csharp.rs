//! C# parser.

use std::cell::RefCell;
use std::path::Path;

use lapse_core::errors::ParseError;
use tree_sitter::Parser;

use super::error_tolerant::count_errors;
use super::types::SourceFile;
use crate::scanner::generated::is_generated;

thread_local! {
    static PARSER: RefCell<Option<Parser>> = const { RefCell::new(None) };
}

/// Stateless front for a per-thread tree-sitter parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct CSharpParser;

impl CSharpParser {
    pub fn new() -> Self {
        Self
    }

    pub fn extensions(&self) -> &[&str] {
        &["cs"]
    }

    /// Parse `source`. `path` is recorded on the result and used to spot
    /// generated files; it is never read.
    pub fn parse(&self, source: &str, path: &str) -> Result<SourceFile, ParseError> {
        let tree = PARSER.with(|cell| {
            let mut slot = cell.borrow_mut();
            if slot.is_none() {
                let mut parser = Parser::new();
                parser
                    .set_language(&tree_sitter_c_sharp::LANGUAGE.into())
                    .map_err(|e| ParseError::GrammarNotFound {
                        language: format!("csharp ({e})"),
                    })?;
                *slot = Some(parser);
            }
            let parser = slot.as_mut().ok_or_else(|| ParseError::GrammarNotFound {
                language: "csharp".to_string(),
            })?;
            parser
                .parse(source, None)
                .ok_or_else(|| ParseError::TreeSitterError {
                    path: path.into(),
                    message: "parser returned no tree".to_string(),
                })
        })?;

        let error_count = count_errors(tree.root_node());
        if error_count > 0 {
            tracing::debug!(path, error_count, "parsed with syntax errors");
        }

        Ok(SourceFile {
            path: path.to_string(),
            is_generated: is_generated(Path::new(path), source),
            source: source.to_string(),
            tree,
            error_count,
        })
    }

    /// Parse raw bytes read from disk.
    pub fn parse_bytes(&self, bytes: &[u8], path: &Path) -> Result<SourceFile, ParseError> {
        let source = std::str::from_utf8(bytes).map_err(|_| ParseError::InvalidUtf8 {
            path: path.to_path_buf(),
        })?;
        self.parse(source, &path.to_string_lossy())
    }
}
