//! C# syntax helpers over tree-sitter nodes.

use tree_sitter::{Node, TreeCursor};

use crate::parsers::FileId;

/// Node kinds that declare a type.
pub const TYPE_DECLARATION_KINDS: &[&str] = &[
    "class_declaration",
    "struct_declaration",
    "interface_declaration",
    "record_declaration",
    "record_struct_declaration",
    "enum_declaration",
    "delegate_declaration",
];

/// Node kinds that declare a member with a body of its own.
pub const MEMBER_DECLARATION_KINDS: &[&str] = &[
    "method_declaration",
    "constructor_declaration",
    "destructor_declaration",
    "operator_declaration",
    "conversion_operator_declaration",
    "property_declaration",
    "indexer_declaration",
    "event_declaration",
];

pub const LAMBDA_KINDS: &[&str] = &[
    "lambda_expression",
    "parenthesized_lambda_expression",
    "simple_lambda_expression",
    "anonymous_method_expression",
];

pub fn is_type_declaration(kind: &str) -> bool {
    TYPE_DECLARATION_KINDS.contains(&kind)
}

pub fn is_member_declaration(kind: &str) -> bool {
    MEMBER_DECLARATION_KINDS.contains(&kind)
}

pub fn is_lambda(kind: &str) -> bool {
    LAMBDA_KINDS.contains(&kind)
}

pub fn is_this(kind: &str) -> bool {
    matches!(kind, "this" | "this_expression")
}

pub fn is_base(kind: &str) -> bool {
    matches!(kind, "base" | "base_expression")
}

/// Named children of `node`, in order.
pub fn named_children<'t>(node: Node<'t>) -> impl Iterator<Item = Node<'t>> {
    let mut cursor = node.walk();
    let children: Vec<Node<'t>> = node.named_children(&mut cursor).collect();
    children.into_iter()
}

/// All children of `node`, anonymous tokens included.
pub fn children<'t>(node: Node<'t>) -> impl Iterator<Item = Node<'t>> {
    let mut cursor = node.walk();
    let children: Vec<Node<'t>> = node.children(&mut cursor).collect();
    children.into_iter()
}

pub fn first_named_child_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    named_children(node).find(|child| child.kind() == kind)
}

/// The identifier a declarator or parameter introduces.
pub fn declared_name(node: Node<'_>) -> Option<Node<'_>> {
    node.child_by_field_name("name")
        .or_else(|| first_named_child_of_kind(node, "identifier"))
}

/// The identifier of a simple name (`Foo` or `Foo<T>`).
pub fn simple_name_identifier(node: Node<'_>) -> Option<Node<'_>> {
    match node.kind() {
        "identifier" => Some(node),
        "generic_name" => node
            .child_by_field_name("name")
            .or_else(|| first_named_child_of_kind(node, "identifier")),
        _ => None,
    }
}

/// Canonical dotted form of a type name as written: whitespace, `global::`,
/// type arguments, nullable and array suffixes removed.
pub fn normalize_type_name(raw: &str) -> String {
    let raw = raw.trim();
    let raw = raw.strip_prefix("global::").unwrap_or(raw);
    let mut out = String::with_capacity(raw.len());
    let mut depth = 0usize;
    for c in raw.chars() {
        match c {
            '<' | '[' => depth += 1,
            '>' | ']' => depth = depth.saturating_sub(1),
            _ if depth > 0 => {}
            '?' | '*' => {}
            c if c.is_whitespace() => {}
            c => out.push(c),
        }
    }
    out.replace("::", ".")
}

/// `namespace` + `.` + `name`, or `name` alone in the global namespace.
pub fn join_name(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}.{name}")
    }
}

/// A node paired with the file it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SyntaxNode<'c> {
    pub file: FileId,
    pub node: Node<'c>,
}

impl<'c> SyntaxNode<'c> {
    pub fn new(file: FileId, node: Node<'c>) -> Self {
        Self { file, node }
    }

    pub fn kind(&self) -> &'static str {
        self.node.kind()
    }
}

/// Pre-order walk over the named nodes of a subtree, root first.
pub struct Descendants<'c> {
    file: FileId,
    cursor: TreeCursor<'c>,
    root_id: usize,
    started: bool,
    done: bool,
}

impl<'c> Descendants<'c> {
    pub fn new(root: SyntaxNode<'c>) -> Self {
        Self {
            file: root.file,
            cursor: root.node.walk(),
            root_id: root.node.id(),
            started: false,
            done: false,
        }
    }

    /// Move the cursor to the next node in pre-order; `false` once the
    /// subtree is exhausted.
    fn advance(&mut self) -> bool {
        if self.cursor.goto_first_child() {
            return true;
        }
        loop {
            if self.cursor.node().id() == self.root_id {
                return false;
            }
            if self.cursor.goto_next_sibling() {
                return true;
            }
            if !self.cursor.goto_parent() {
                return false;
            }
        }
    }
}

impl<'c> Iterator for Descendants<'c> {
    type Item = SyntaxNode<'c>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            if !self.started {
                self.started = true;
            } else if !self.advance() {
                self.done = true;
                break;
            }
            let node = self.cursor.node();
            if node.is_named() {
                return Some(SyntaxNode::new(self.file, node));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_names_normalize() {
        assert_eq!(normalize_type_name("global::System.EventHandler"), "System.EventHandler");
        assert_eq!(normalize_type_name("List<Dictionary<string, int>>"), "List");
        assert_eq!(normalize_type_name("Publisher?"), "Publisher");
        assert_eq!(normalize_type_name("Item[ ]"), "Item");
        assert_eq!(normalize_type_name(" Outer . Inner "), "Outer.Inner");
    }

    #[test]
    fn join_handles_global_namespace() {
        assert_eq!(join_name("", "A"), "A");
        assert_eq!(join_name("N.M", "A"), "N.M.A");
    }
}
