//! `SemanticHost` over a [`Compilation`].

use lapse_core::diagnostics::Location;

use super::compilation::Compilation;
use super::symbols::Symbol;
use super::syntax::{children, is_member_declaration, is_type_declaration, Descendants, SyntaxNode};
use crate::host::{AssignmentOperator, SemanticHost, SymbolKind};

/// Read-only query view of a compilation. Cheap to create; one per thread
/// is the usual pattern.
#[derive(Debug, Clone, Copy)]
pub struct SemanticModel<'c> {
    compilation: &'c Compilation,
}

impl<'c> SemanticModel<'c> {
    pub fn new(compilation: &'c Compilation) -> Self {
        Self { compilation }
    }

    pub fn compilation(&self) -> &'c Compilation {
        self.compilation
    }

    pub fn root(&self, file: crate::parsers::FileId) -> Option<SyntaxNode<'c>> {
        let compilation = self.compilation;
        Some(SyntaxNode::new(file, compilation.file(file)?.root()))
    }

    /// Source text of `node`.
    pub fn node_text(&self, node: SyntaxNode<'c>) -> &'c str {
        self.text(node.file, node.node)
    }

    /// Symbol for the declaration owning `node`: the member whose
    /// declaration contains it, else the enclosing type.
    fn containing_symbol_of(&self, node: SyntaxNode<'c>) -> Option<Symbol> {
        let symbols = self.compilation.symbols();
        let mut current = node.node.parent();
        while let Some(ancestor) = current {
            let kind = ancestor.kind();
            if is_member_declaration(kind) || kind == "variable_declarator" || kind == "enum_member_declaration" {
                if let Some(member) = symbols.member_declared_at(node.file, ancestor.start_byte()) {
                    return Some(Symbol::Member(member));
                }
            }
            if is_type_declaration(kind) {
                return symbols
                    .type_declared_at(node.file, ancestor.start_byte())
                    .map(Symbol::Type);
            }
            current = ancestor.parent();
        }
        None
    }
}

impl<'c> SemanticHost for SemanticModel<'c> {
    type Node = SyntaxNode<'c>;
    type Symbol = Symbol;

    fn assignment_operator(&self, node: SyntaxNode<'c>) -> AssignmentOperator {
        if node.kind() != "assignment_expression" {
            return AssignmentOperator::Other;
        }
        let token = node
            .node
            .child_by_field_name("operator")
            .or_else(|| {
                children(node.node)
                    .find(|c| c.kind() == "assignment_operator" || (!c.is_named() && c.kind().ends_with('=')))
            })
            .map(|op| self.text(node.file, op).trim());
        match token {
            Some("+=") => AssignmentOperator::Add,
            Some("-=") => AssignmentOperator::Subtract,
            _ => AssignmentOperator::Other,
        }
    }

    fn left_operand(&self, node: SyntaxNode<'c>) -> Option<SyntaxNode<'c>> {
        let left = node.node.child_by_field_name("left")?;
        Some(SyntaxNode::new(node.file, left))
    }

    fn right_operand(&self, node: SyntaxNode<'c>) -> Option<SyntaxNode<'c>> {
        let right = node.node.child_by_field_name("right")?;
        Some(SyntaxNode::new(node.file, right))
    }

    fn is_member_access(&self, expr: SyntaxNode<'c>) -> bool {
        expr.kind() == "member_access_expression"
    }

    fn resolve_symbol(&self, expr: SyntaxNode<'c>) -> Option<Symbol> {
        self.resolve_expression(expr.file, expr.node)
    }

    fn symbol_kind(&self, symbol: &Symbol) -> SymbolKind {
        self.compilation.symbols().kind_of(symbol)
    }

    fn symbols_equal(&self, a: &Symbol, b: &Symbol) -> bool {
        a == b
    }

    fn containing_symbol(&self, node: SyntaxNode<'c>) -> Option<Symbol> {
        self.containing_symbol_of(node)
    }

    fn containing_type(&self, symbol: &Symbol) -> Option<Symbol> {
        let symbols = self.compilation.symbols();
        match *symbol {
            Symbol::Member(id) => symbols.member(id).map(|m| Symbol::Type(m.containing_type)),
            Symbol::Type(id) => symbols.type_symbol(id)?.outer.map(Symbol::Type),
            Symbol::Local(site) | Symbol::LocalFunction(site) | Symbol::Lambda(site) => {
                let node = self.compilation.node_at(site)?;
                self.enclosing_type(site.file, node).map(Symbol::Type)
            }
        }
    }

    fn declaring_syntax(&self, type_symbol: &Symbol) -> Vec<SyntaxNode<'c>> {
        let Symbol::Type(id) = *type_symbol else {
            return Vec::new();
        };
        let Some(symbol) = self.compilation.symbols().type_symbol(id) else {
            return Vec::new();
        };
        symbol
            .declarations
            .iter()
            .filter_map(|&site| {
                let node = self.compilation.node_at(site)?;
                Some(SyntaxNode::new(site.file, node))
            })
            .collect()
    }

    fn descendants(&self, node: SyntaxNode<'c>) -> impl Iterator<Item = SyntaxNode<'c>> + '_ {
        Descendants::new(node)
    }

    fn location(&self, node: SyntaxNode<'c>) -> Location {
        let start = node.node.start_position();
        let end = node.node.end_position();
        Location {
            file: self
                .compilation
                .file(node.file)
                .map(|f| f.path.clone())
                .unwrap_or_default(),
            line: start.row as u32 + 1,
            column: start.column as u32 + 1,
            end_line: end.row as u32 + 1,
            end_column: end.column as u32 + 1,
            start_byte: node.node.start_byte(),
            end_byte: node.node.end_byte(),
        }
    }
}
