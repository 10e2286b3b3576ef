//! Configuration system for lapse.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod analysis_config;
pub mod lapse_config;
pub mod scan_config;

pub use analysis_config::AnalysisConfig;
pub use lapse_config::{CliOverrides, LapseConfig};
pub use scan_config::ScanConfig;
