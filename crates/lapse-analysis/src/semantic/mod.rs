//! Declaration-level semantic model for C#.
//!
//! `Compilation` parses nothing itself: it takes parsed files, collects
//! every type and member declaration into a `SymbolTable`, and links base
//! types. `SemanticModel` answers the `SemanticHost` queries on top of it,
//! binding names and member accesses back to those declarations.

pub mod compilation;
pub mod declarations;
pub mod model;
pub mod resolve;
pub mod symbols;
pub mod syntax;

pub use compilation::{Compilation, TypeScope};
pub use model::SemanticModel;
pub use symbols::{DeclSite, MemberId, MemberKind, Symbol, SymbolTable, TypeId, TypeKind};
pub use syntax::SyntaxNode;
