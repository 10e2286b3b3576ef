//! The query interface between a rule and the program it inspects.
//!
//! A host owns the syntax trees and the symbol table; rules only ask
//! questions. Everything here is read-only, so one host value can serve
//! any number of node callbacks, and separate hosts over the same
//! compilation can run on separate threads.

use lapse_core::diagnostics::Location;

/// Operator of an assignment-like node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignmentOperator {
    /// `+=`
    Add,
    /// `-=`
    Subtract,
    /// Any other operator, or a node that is not an assignment.
    Other,
}

/// Kind tag of a resolved symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Event,
    Method,
    Field,
    Property,
    Type,
    Local,
    Other,
}

/// Syntax and symbol queries a rule may issue.
///
/// `Symbol` carries no equality bound on purpose: two syntactically
/// different expressions can denote the same entity, and only the host
/// knows how to tell. Rules compare symbols exclusively through
/// [`SemanticHost::symbols_equal`].
pub trait SemanticHost {
    type Node: Copy;
    type Symbol;

    /// Operator of an assignment node; `Other` for anything else.
    fn assignment_operator(&self, node: Self::Node) -> AssignmentOperator;

    fn left_operand(&self, node: Self::Node) -> Option<Self::Node>;

    fn right_operand(&self, node: Self::Node) -> Option<Self::Node>;

    /// `true` for an explicit `receiver.member` expression.
    fn is_member_access(&self, expr: Self::Node) -> bool;

    fn resolve_symbol(&self, expr: Self::Node) -> Option<Self::Symbol>;

    fn symbol_kind(&self, symbol: &Self::Symbol) -> SymbolKind;

    /// Identity equality of two symbols.
    fn symbols_equal(&self, a: &Self::Symbol, b: &Self::Symbol) -> bool;

    /// The symbol whose body lexically contains `node` (usually a method).
    fn containing_symbol(&self, node: Self::Node) -> Option<Self::Symbol>;

    /// The type that declares `symbol`.
    fn containing_type(&self, symbol: &Self::Symbol) -> Option<Self::Symbol>;

    /// One syntax root per declaration of `type_symbol` (several for partial types).
    fn declaring_syntax(&self, type_symbol: &Self::Symbol) -> Vec<Self::Node>;

    /// Lazy depth-first walk of `node` and everything below it, `node` first.
    /// Each call starts a fresh walk.
    fn descendants(&self, node: Self::Node) -> impl Iterator<Item = Self::Node> + '_;

    fn location(&self, node: Self::Node) -> Location;

    /// Equality over optional symbols: two unresolved sides compare equal,
    /// a resolved and an unresolved side never do.
    fn optional_symbols_equal(&self, a: Option<&Self::Symbol>, b: Option<&Self::Symbol>) -> bool {
        match (a, b) {
            (Some(a), Some(b)) => self.symbols_equal(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}
