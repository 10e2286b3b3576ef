//! Core types, errors, configuration, diagnostics, tracing, and cancellation
//! shared by every lapse crate.

pub mod config;
pub mod diagnostics;
pub mod errors;
pub mod tracing;
pub mod traits;
pub mod types;

pub use config::LapseConfig;
pub use diagnostics::{Finding, Location, RuleDescriptor, Severity};
pub use traits::{Cancellable, CancellationToken};
