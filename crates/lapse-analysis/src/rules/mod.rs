//! Diagnostic rules and the plumbing a host uses to drive them.

pub mod event_leak;
pub mod registration;
pub mod sink;

pub use registration::{NodeTrigger, Registration};
pub use sink::{CollectingSink, DiagnosticSink};
