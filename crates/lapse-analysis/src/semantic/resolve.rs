//! Expression binding: map a name or member access to the declaration it
//! denotes. Resolution is declaration-level: no overload resolution, no
//! type inference beyond `var x = new T(...)`, no external assemblies.

use tree_sitter::Node;

use super::compilation::TypeScope;
use super::model::SemanticModel;
use super::symbols::{DeclSite, Symbol, TypeId};
use super::syntax::{
    declared_name, first_named_child_of_kind, is_base, is_lambda, is_member_declaration, is_this,
    is_type_declaration, join_name, named_children, normalize_type_name, simple_name_identifier,
};
use crate::parsers::FileId;

/// Kinds whose `parameters` field introduces locals.
const PARAMETERIZED_KINDS: &[&str] = &[
    "method_declaration",
    "constructor_declaration",
    "operator_declaration",
    "conversion_operator_declaration",
    "indexer_declaration",
    "local_function_statement",
    "lambda_expression",
    "parenthesized_lambda_expression",
    "simple_lambda_expression",
    "anonymous_method_expression",
];

impl<'c> SemanticModel<'c> {
    pub(crate) fn text(&self, file: FileId, node: Node<'c>) -> &'c str {
        self.compilation().file(file).map_or("", |f| f.text(node))
    }

    /// Innermost type declaration strictly containing `node`.
    pub(crate) fn enclosing_type(&self, file: FileId, node: Node<'c>) -> Option<TypeId> {
        let symbols = self.compilation().symbols();
        let mut current = node.parent();
        while let Some(ancestor) = current {
            if is_type_declaration(ancestor.kind()) {
                return symbols.type_declared_at(file, ancestor.start_byte());
            }
            current = ancestor.parent();
        }
        None
    }

    /// Namespace lexically enclosing `node`.
    pub(crate) fn namespace_at(&self, file: FileId, node: Node<'c>) -> String {
        let mut parts = Vec::new();
        let mut current = node.parent();
        while let Some(ancestor) = current {
            if ancestor.kind() == "namespace_declaration" {
                if let Some(name) = ancestor.child_by_field_name("name") {
                    parts.push(normalize_type_name(self.text(file, name)));
                }
            }
            current = ancestor.parent();
        }
        let mut namespace = self
            .compilation()
            .scope(file)
            .and_then(|s| s.file_namespace.clone())
            .unwrap_or_default();
        for part in parts.iter().rev() {
            namespace = join_name(&namespace, part);
        }
        namespace
    }

    pub(crate) fn type_scope(&self, file: FileId, node: Node<'c>) -> TypeScope {
        TypeScope {
            file,
            namespace: self.namespace_at(file, node),
            enclosing: self.enclosing_type(file, node),
        }
    }

    /// Bind an expression to a symbol.
    pub(crate) fn resolve_expression(&self, file: FileId, node: Node<'c>) -> Option<Symbol> {
        match node.kind() {
            "parenthesized_expression" => {
                let inner = named_children(node).next()?;
                self.resolve_expression(file, inner)
            }
            "identifier" | "generic_name" => {
                let identifier = simple_name_identifier(node)?;
                let name = self.text(file, identifier);
                self.resolve_simple_name(file, node, name)
            }
            "member_access_expression" => self.resolve_member_access(file, node),
            // The invoked method; as a receiver its return type is used.
            "invocation_expression" => {
                let function = node.child_by_field_name("function")?;
                self.resolve_expression(file, function)
            }
            "qualified_name" | "alias_qualified_name" => {
                let scope = self.type_scope(file, node);
                self.compilation()
                    .resolve_type_name(&scope, self.text(file, node))
                    .map(Symbol::Type)
            }
            kind if is_this(kind) => self.enclosing_type(file, node).map(Symbol::Type),
            kind if is_lambda(kind) => Some(Symbol::Lambda(DeclSite::of(file, node))),
            _ => None,
        }
    }

    /// Locals first, then members of the enclosing types (bases included),
    /// then type names.
    fn resolve_simple_name(&self, file: FileId, node: Node<'c>, name: &str) -> Option<Symbol> {
        if name.is_empty() {
            return None;
        }
        if let Some(local) = self.resolve_local(file, node, name) {
            return Some(local);
        }
        let mut enclosing = self.enclosing_type(file, node);
        while let Some(ty) = enclosing {
            if let Some(symbol) = self.lookup_in_type(ty, name) {
                return Some(symbol);
            }
            enclosing = self.compilation().symbols().type_symbol(ty).and_then(|t| t.outer);
        }
        let scope = self.type_scope(file, node);
        self.compilation()
            .resolve_type_name(&scope, name)
            .map(Symbol::Type)
    }

    /// Member `name` of `ty` (searching bases), else nested type `name`.
    fn lookup_in_type(&self, ty: TypeId, name: &str) -> Option<Symbol> {
        let symbols = self.compilation().symbols();
        symbols
            .lookup_member(ty, name)
            .map(Symbol::Member)
            .or_else(|| symbols.nested_type(ty, name).map(Symbol::Type))
    }

    fn resolve_member_access(&self, file: FileId, node: Node<'c>) -> Option<Symbol> {
        let name_node = node.child_by_field_name("name")?;
        let name = self.text(file, simple_name_identifier(name_node).unwrap_or(name_node));
        let receiver = node.child_by_field_name("expression")?;

        if let Some(ty) = self.receiver_type(file, receiver) {
            if let Some(symbol) = self.lookup_in_type(ty, name) {
                return Some(symbol);
            }
        }

        // `Some.Namespace.Type` where the receiver is a namespace.
        let scope = self.type_scope(file, node);
        let dotted = format!("{}.{}", self.text(file, receiver), name);
        self.compilation()
            .resolve_type_name(&scope, &dotted)
            .map(Symbol::Type)
    }

    /// Static type of a member-access receiver.
    fn receiver_type(&self, file: FileId, receiver: Node<'c>) -> Option<TypeId> {
        match receiver.kind() {
            kind if is_this(kind) => self.enclosing_type(file, receiver),
            kind if is_base(kind) => {
                let this = self.enclosing_type(file, receiver)?;
                self.compilation().symbols().type_symbol(this)?.bases.first().copied()
            }
            "predefined_type" => None,
            _ => match self.resolve_expression(file, receiver)? {
                Symbol::Type(ty) => Some(ty),
                other => self.declared_type_of(other),
            },
        }
    }

    /// Declared type of a field, property, event, parameter, or local;
    /// the return type of a method.
    fn declared_type_of(&self, symbol: Symbol) -> Option<TypeId> {
        let compilation = self.compilation();
        match symbol {
            Symbol::Member(id) => {
                let member = compilation.symbols().member(id)?;
                let written = member.declared_type.as_deref()?;
                let owner = compilation.symbols().type_symbol(member.containing_type)?;
                let scope = TypeScope {
                    file: member.decl.file,
                    namespace: owner.namespace.clone(),
                    enclosing: Some(member.containing_type),
                };
                compilation.resolve_type_name(&scope, written)
            }
            Symbol::Local(site) => {
                let node = compilation.node_at(site)?;
                let written = self.local_type_node(site.file, node)?;
                let scope = self.type_scope(site.file, node);
                compilation.resolve_type_name(&scope, self.text(site.file, written))
            }
            _ => None,
        }
    }

    /// The type syntax of a local's declaration; for `var` with an object
    /// creation initializer, the created type.
    fn local_type_node(&self, file: FileId, declarator: Node<'c>) -> Option<Node<'c>> {
        match declarator.kind() {
            "parameter" => declarator.child_by_field_name("type"),
            "variable_declarator" => {
                let declaration = declarator.parent()?;
                let written = declaration.child_by_field_name("type")?;
                if written.kind() != "implicit_type" && self.text(file, written) != "var" {
                    return Some(written);
                }
                let initializer = first_named_child_of_kind(declarator, "equals_value_clause")
                    .and_then(|clause| named_children(clause).next())
                    .or_else(|| named_children(declarator).nth(1))?;
                (initializer.kind() == "object_creation_expression")
                    .then(|| initializer.child_by_field_name("type"))
                    .flatten()
            }
            _ => {
                let parent = declarator.parent()?;
                (parent.kind() == "foreach_statement")
                    .then(|| parent.child_by_field_name("type"))
                    .flatten()
            }
        }
    }

    /// Walk outward from `node` through local scopes looking for `name`.
    fn resolve_local(&self, file: FileId, node: Node<'c>, name: &str) -> Option<Symbol> {
        let mut current = node.parent();
        while let Some(scope) = current {
            let kind = scope.kind();
            if is_type_declaration(kind) {
                return None;
            }
            let found = match kind {
                "block" | "switch_section" | "compilation_unit" => self.local_in_statements(file, scope, name),
                "for_statement" | "using_statement" | "fixed_statement" => {
                    first_named_child_of_kind(scope, "variable_declaration")
                        .and_then(|d| self.declarator_named(file, d, name))
                        .map(|d| Symbol::Local(DeclSite::of(file, d)))
                }
                "foreach_statement" => scope
                    .child_by_field_name("left")
                    .filter(|left| self.text(file, *left) == name)
                    .map(|left| Symbol::Local(DeclSite::of(file, left))),
                "catch_clause" => first_named_child_of_kind(scope, "catch_declaration")
                    .and_then(|d| declared_name(d).filter(|n| self.text(file, *n) == name).map(|_| d))
                    .map(|d| Symbol::Local(DeclSite::of(file, d))),
                "accessor_declaration" if name == "value" => Some(Symbol::Local(DeclSite::of(file, scope))),
                _ if PARAMETERIZED_KINDS.contains(&kind) => self.parameter_named(file, scope, name),
                _ => None,
            };
            if found.is_some() {
                return found;
            }
            if is_member_declaration(kind) {
                return None;
            }
            current = scope.parent();
        }
        None
    }

    /// Locals and local functions declared directly in a statement list.
    fn local_in_statements(&self, file: FileId, scope: Node<'c>, name: &str) -> Option<Symbol> {
        for statement in named_children(scope) {
            let statement = if statement.kind() == "global_statement" {
                match named_children(statement).next() {
                    Some(inner) => inner,
                    None => continue,
                }
            } else {
                statement
            };
            match statement.kind() {
                "local_declaration_statement" => {
                    let found = first_named_child_of_kind(statement, "variable_declaration")
                        .and_then(|d| self.declarator_named(file, d, name));
                    if let Some(declarator) = found {
                        return Some(Symbol::Local(DeclSite::of(file, declarator)));
                    }
                }
                "local_function_statement" => {
                    let matches = declared_name(statement).is_some_and(|n| self.text(file, n) == name);
                    if matches {
                        return Some(Symbol::LocalFunction(DeclSite::of(file, statement)));
                    }
                }
                _ => {}
            }
        }
        None
    }

    fn declarator_named(&self, file: FileId, declaration: Node<'c>, name: &str) -> Option<Node<'c>> {
        named_children(declaration)
            .filter(|d| d.kind() == "variable_declarator")
            .find(|d| declared_name(*d).is_some_and(|n| self.text(file, n) == name))
    }

    fn parameter_named(&self, file: FileId, owner: Node<'c>, name: &str) -> Option<Symbol> {
        let params = owner
            .child_by_field_name("parameters")
            .or_else(|| owner.child_by_field_name("parameter"))
            .or_else(|| {
                named_children(owner).find(|c| matches!(c.kind(), "parameter_list" | "bracketed_parameter_list"))
            })?;
        match params.kind() {
            "parameter_list" | "bracketed_parameter_list" => named_children(params)
                .filter(|p| p.kind() == "parameter")
                .find(|p| declared_name(*p).is_some_and(|n| self.text(file, n) == name))
                .map(|p| Symbol::Local(DeclSite::of(file, p))),
            _ => (self.text(file, params) == name).then(|| Symbol::Local(DeclSite::of(file, params))),
        }
    }
}
