//! Tree-sitter C# parsing: thread-local parser instances, error counting,
//! and the parsed-file type the semantic model is built from.

pub mod csharp;
pub mod error_tolerant;
pub mod types;

pub use csharp::CSharpParser;
pub use types::{FileId, SourceFile};
