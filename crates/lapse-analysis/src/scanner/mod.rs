//! Scanner subsystem: source discovery under a root directory.
//!
//! The scanner only finds files; reading and parsing happen in the
//! pipeline so that failures there become non-fatal pipeline errors.

pub mod generated;
pub mod ignores;
pub mod types;
pub mod walker;

pub use types::{DiscoveredFile, ScanOutput, ScanStats};
pub use walker::Scanner;
