//! Declaration collection: one pass per file over namespaces and type
//! bodies. Method bodies are not entered.

use rustc_hash::FxHashMap;
use tree_sitter::Node;

use super::symbols::{DeclSite, MemberKind, SymbolTable, TypeId, TypeKind};
use super::syntax::{declared_name, first_named_child_of_kind, is_type_declaration, join_name, named_children, normalize_type_name};
use crate::parsers::{FileId, SourceFile};

/// Name-resolution context shared by everything in one file.
#[derive(Debug, Clone, Default)]
pub struct FileScope {
    /// Namespace of a file-scoped `namespace X;` declaration.
    pub file_namespace: Option<String>,
    /// `using N;` imports, in source order.
    pub usings: Vec<String>,
    /// `using A = N.T;` aliases.
    pub aliases: FxHashMap<String, String>,
}

/// Record every type and member declared in `file`.
pub(crate) fn collect(table: &mut SymbolTable, file_id: FileId, file: &SourceFile) -> FileScope {
    let mut collector = Collector {
        table,
        file_id,
        file,
        scope: FileScope::default(),
    };
    collector.compilation_unit(file.root());
    collector.scope
}

struct Collector<'a> {
    table: &'a mut SymbolTable,
    file_id: FileId,
    file: &'a SourceFile,
    scope: FileScope,
}

impl<'a> Collector<'a> {
    fn text(&self, node: Node<'_>) -> &'a str {
        self.file.text(node)
    }

    fn compilation_unit(&mut self, root: Node<'_>) {
        let file_namespace = first_named_child_of_kind(root, "file_scoped_namespace_declaration")
            .and_then(|ns| ns.child_by_field_name("name"))
            .map(|name| normalize_type_name(self.text(name)));
        let namespace = file_namespace.clone().unwrap_or_default();
        self.scope.file_namespace = file_namespace;

        for child in named_children(root) {
            if child.kind() == "file_scoped_namespace_declaration" {
                // Older grammars nest the rest of the file under the declaration.
                for inner in named_children(child) {
                    self.visit(inner, &namespace);
                }
            } else {
                self.visit(child, &namespace);
            }
        }
    }

    fn visit(&mut self, node: Node<'_>, namespace: &str) {
        match node.kind() {
            "using_directive" => self.using(node),
            "namespace_declaration" => {
                let Some(name) = node.child_by_field_name("name") else {
                    return;
                };
                let nested = join_name(namespace, &normalize_type_name(self.text(name)));
                let body = node
                    .child_by_field_name("body")
                    .or_else(|| first_named_child_of_kind(node, "declaration_list"));
                if let Some(body) = body {
                    for child in named_children(body) {
                        self.visit(child, &nested);
                    }
                }
            }
            kind if is_type_declaration(kind) => self.declare_type(node, namespace, None),
            "global_statement" | "method_declaration" | "local_function_statement" => {}
            _ => {
                for child in named_children(node) {
                    self.visit(child, namespace);
                }
            }
        }
    }

    /// `using N;`, `using A = N.T;`, `global using N;`. `using static` is
    /// not an import of type names and is skipped.
    fn using(&mut self, node: Node<'_>) {
        let text = self.text(node).trim().trim_end_matches(';');
        let text = text.trim_start_matches("global").trim_start();
        let Some(rest) = text.strip_prefix("using") else {
            return;
        };
        let rest = rest.trim();
        if rest.starts_with("static ") {
            return;
        }
        match rest.split_once('=') {
            Some((alias, target)) => {
                self.scope
                    .aliases
                    .insert(alias.trim().to_string(), normalize_type_name(target));
            }
            None => self.scope.usings.push(normalize_type_name(rest)),
        }
    }

    fn declare_type(&mut self, node: Node<'_>, namespace: &str, outer: Option<TypeId>) {
        let Some(kind) = TypeKind::from_node_kind(node.kind()) else {
            return;
        };
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let name = self.text(name_node);
        let qualified = match outer.and_then(|o| self.table.type_symbol(o)) {
            Some(outer_symbol) => format!("{}.{}", outer_symbol.qualified_name, name),
            None => join_name(namespace, name),
        };
        let site = DeclSite::of(self.file_id, node);
        let id = self.table.declare_type(name, qualified, namespace, kind, outer, site);

        if let Some(base_list) = first_named_child_of_kind(node, "base_list") {
            for base in named_children(base_list) {
                let written = match base.kind() {
                    "argument_list" => continue,
                    "primary_constructor_base_type" => base.child_by_field_name("type").unwrap_or(base),
                    _ => base,
                };
                let written = self.text(written);
                if !written.is_empty() {
                    self.table.add_base_name(id, written.to_string(), site);
                }
            }
        }

        // Positional record parameters become properties.
        if kind == TypeKind::Record {
            let params = node
                .child_by_field_name("parameters")
                .or_else(|| first_named_child_of_kind(node, "parameter_list"));
            if let Some(params) = params {
                for param in named_children(params).filter(|p| p.kind() == "parameter") {
                    self.add_named_member(param, MemberKind::Property, id, param.child_by_field_name("type"));
                }
            }
        }

        let body = node.child_by_field_name("body").or_else(|| {
            named_children(node).find(|c| matches!(c.kind(), "declaration_list" | "enum_member_declaration_list"))
        });
        if let Some(body) = body {
            for member in named_children(body) {
                self.member(member, namespace, id);
            }
        }
    }

    fn member(&mut self, node: Node<'_>, namespace: &str, owner: TypeId) {
        match node.kind() {
            "field_declaration" | "event_field_declaration" => {
                let kind = if node.kind() == "event_field_declaration" {
                    MemberKind::Event
                } else {
                    MemberKind::Field
                };
                let Some(declaration) = first_named_child_of_kind(node, "variable_declaration") else {
                    return;
                };
                let declared_type = declaration.child_by_field_name("type");
                for declarator in named_children(declaration).filter(|d| d.kind() == "variable_declarator") {
                    self.add_named_member(declarator, kind, owner, declared_type);
                }
            }
            "event_declaration" => {
                self.add_named_member(node, MemberKind::Event, owner, node.child_by_field_name("type"));
            }
            "property_declaration" => {
                self.add_named_member(node, MemberKind::Property, owner, node.child_by_field_name("type"));
            }
            "method_declaration" => {
                let returns = node
                    .child_by_field_name("returns")
                    .or_else(|| node.child_by_field_name("type"));
                self.add_named_member(node, MemberKind::Method, owner, returns);
            }
            "enum_member_declaration" => {
                self.add_named_member(node, MemberKind::Field, owner, None);
            }
            "constructor_declaration" => self.add_special_member(node, ".ctor", MemberKind::Other, owner),
            "destructor_declaration" => self.add_special_member(node, ".dtor", MemberKind::Other, owner),
            "operator_declaration" | "conversion_operator_declaration" => {
                self.add_special_member(node, "operator", MemberKind::Other, owner)
            }
            "indexer_declaration" => self.add_special_member(node, "this[]", MemberKind::Property, owner),
            kind if is_type_declaration(kind) => self.declare_type(node, namespace, Some(owner)),
            _ => {}
        }
    }

    fn add_named_member(
        &mut self,
        node: Node<'_>,
        kind: MemberKind,
        owner: TypeId,
        declared_type: Option<Node<'_>>,
    ) {
        let Some(name) = declared_name(node) else {
            return;
        };
        let name = self.text(name);
        if name.is_empty() {
            return;
        }
        let declared_type = declared_type.map(|t| self.text(t).to_string());
        self.table
            .add_member(name, kind, owner, declared_type, DeclSite::of(self.file_id, node));
    }

    fn add_special_member(&mut self, node: Node<'_>, name: &str, kind: MemberKind, owner: TypeId) {
        self.table
            .add_member(name, kind, owner, None, DeclSite::of(self.file_id, node));
    }
}
