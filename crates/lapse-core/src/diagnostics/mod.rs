//! Diagnostic vocabulary: rule descriptors, severities, source locations,
//! and the findings a rule emits.

pub mod descriptor;
pub mod finding;

pub use descriptor::{RuleDescriptor, Severity};
pub use finding::{Finding, Location};
