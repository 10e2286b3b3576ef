//! Analysis engine: drives the event-leak rule over a compilation or a
//! directory, honoring configuration, generated code, and pragmas.

pub mod pipeline;
pub mod suppression;

pub use pipeline::AnalysisPipeline;
pub use suppression::{PragmaSuppressions, SuppressingSink};
