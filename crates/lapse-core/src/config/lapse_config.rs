//! Top-level lapse configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{AnalysisConfig, ScanConfig};
use crate::diagnostics::Severity;
use crate::errors::ConfigError;

/// Name of the project-level config file, looked up in the scan root.
pub const PROJECT_CONFIG_FILE: &str = "lapse.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`LAPSE_*`)
/// 3. Project config (`lapse.toml` in project root)
/// 4. User config (`~/.lapse/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LapseConfig {
    pub scan: ScanConfig,
    pub analysis: AnalysisConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub scan_max_file_size: Option<u64>,
    pub scan_threads: Option<usize>,
    pub max_descendants: Option<usize>,
    pub analyze_generated_code: Option<bool>,
    pub severity: Option<Severity>,
}

impl LapseConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config. Only malformed TOML is fatal here.
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        ::tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            origin: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &LapseConfig) -> Result<(), ConfigError> {
        if config.scan.max_file_size == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "scan.max_file_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.analysis.max_descendants == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "analysis.max_descendants".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(ext) = config.scan.extensions.iter().find(|e| e.is_empty() || e.starts_with('.')) {
            return Err(ConfigError::InvalidValue {
                field: "scan.extensions".to_string(),
                message: format!("'{ext}' must be a bare extension such as \"cs\""),
            });
        }
        Ok(())
    }

    /// Returns the user config path: `~/.lapse/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".lapse").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut LapseConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => ConfigError::Unreadable {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let file_config: LapseConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                origin: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it has a value.
    fn merge(base: &mut LapseConfig, other: &LapseConfig) {
        // Scan
        if other.scan.max_file_size.is_some() {
            base.scan.max_file_size = other.scan.max_file_size;
        }
        if other.scan.threads.is_some() {
            base.scan.threads = other.scan.threads;
        }
        if !other.scan.extra_ignore.is_empty() {
            base.scan.extra_ignore = other.scan.extra_ignore.clone();
        }
        if !other.scan.extensions.is_empty() {
            base.scan.extensions = other.scan.extensions.clone();
        }
        if other.scan.follow_symlinks.is_some() {
            base.scan.follow_symlinks = other.scan.follow_symlinks;
        }

        // Analysis
        if other.analysis.enabled.is_some() {
            base.analysis.enabled = other.analysis.enabled;
        }
        if other.analysis.max_descendants.is_some() {
            base.analysis.max_descendants = other.analysis.max_descendants;
        }
        if other.analysis.analyze_generated_code.is_some() {
            base.analysis.analyze_generated_code = other.analysis.analyze_generated_code;
        }
        if other.analysis.respect_pragmas.is_some() {
            base.analysis.respect_pragmas = other.analysis.respect_pragmas;
        }
        if other.analysis.severity.is_some() {
            base.analysis.severity = other.analysis.severity;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `LAPSE_SCAN_MAX_FILE_SIZE`, `LAPSE_ANALYSIS_MAX_DESCENDANTS`, etc.
    fn apply_env_overrides(config: &mut LapseConfig) {
        if let Some(v) = env_parse::<u64>("LAPSE_SCAN_MAX_FILE_SIZE") {
            config.scan.max_file_size = Some(v);
        }
        if let Some(v) = env_parse::<usize>("LAPSE_SCAN_THREADS") {
            config.scan.threads = Some(v);
        }
        if let Some(v) = env_parse::<bool>("LAPSE_ANALYSIS_ENABLED") {
            config.analysis.enabled = Some(v);
        }
        if let Some(v) = env_parse::<usize>("LAPSE_ANALYSIS_MAX_DESCENDANTS") {
            config.analysis.max_descendants = Some(v);
        }
        if let Some(v) = env_parse::<bool>("LAPSE_ANALYSIS_GENERATED_CODE") {
            config.analysis.analyze_generated_code = Some(v);
        }
        if let Some(v) = env_parse::<Severity>("LAPSE_ANALYSIS_SEVERITY") {
            config.analysis.severity = Some(v);
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut LapseConfig, cli: &CliOverrides) {
        if let Some(v) = cli.scan_max_file_size {
            config.scan.max_file_size = Some(v);
        }
        if let Some(v) = cli.scan_threads {
            config.scan.threads = Some(v);
        }
        if let Some(v) = cli.max_descendants {
            config.analysis.max_descendants = Some(v);
        }
        if let Some(v) = cli.analyze_generated_code {
            config.analysis.analyze_generated_code = Some(v);
        }
        if let Some(v) = cli.severity {
            config.analysis.severity = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            origin: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Read and parse an environment variable; unparsable values are ignored.
fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
