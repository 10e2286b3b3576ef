//! Error-tolerant parsing: tree-sitter keeps going past syntax errors and
//! marks them with ERROR / MISSING nodes.

use tree_sitter::Node;

/// Count ERROR and MISSING nodes below `root`.
pub fn count_errors(root: Node) -> u32 {
    if !root.has_error() {
        return 0;
    }
    let mut count = 0u32;
    collect_errors(root, &mut count);
    count
}

fn collect_errors(node: Node, count: &mut u32) {
    if node.is_error() || node.is_missing() {
        *count += 1;
    }
    if !node.has_error() {
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_errors(child, count);
    }
}
