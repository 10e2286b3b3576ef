//! Parsed source files.

use tree_sitter::{Node, Tree};

/// Index of a file inside a [`crate::semantic::Compilation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub u32);

impl FileId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One parsed C# file. The tree is kept alongside its text so nodes can be
/// turned back into names and spans.
#[derive(Debug)]
pub struct SourceFile {
    pub path: String,
    pub source: String,
    pub tree: Tree,
    /// ERROR and MISSING nodes in the tree. Files with errors are still analyzed.
    pub error_count: u32,
    pub is_generated: bool,
}

impl SourceFile {
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Source text covered by `node`; empty if the range is not valid UTF-8.
    pub fn text(&self, node: Node<'_>) -> &str {
        self.source.get(node.byte_range()).unwrap_or("")
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }
}
