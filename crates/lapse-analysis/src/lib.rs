//! lapse-analysis: static detection of lapsed event listeners.
//!
//! The event-leak rule (`rules::event_leak`) is written against the
//! `host::SemanticHost` query interface and knows nothing about any
//! particular parser. The `parsers` and `semantic` modules provide a C#
//! host built on tree-sitter; `scanner`, `engine`, and `reporters` wrap it
//! into a pipeline that runs over a directory of sources.

pub mod engine;
pub mod host;
pub mod parsers;
pub mod reporters;
pub mod rules;
pub mod scanner;
pub mod semantic;

pub use engine::AnalysisPipeline;
pub use host::{AssignmentOperator, SemanticHost, SymbolKind};
pub use rules::event_leak::{analyze, EventLeakAnalyzer, EVENT_LEAK_RULE};
pub use semantic::{Compilation, SemanticModel};
