//! Tests for the lapse configuration system.

use std::sync::Mutex;

use lapse_core::config::{CliOverrides, LapseConfig};
use lapse_core::diagnostics::Severity;
use lapse_core::errors::ConfigError;

/// Serializes tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

fn clear_lapse_env_vars() {
    for key in [
        "LAPSE_SCAN_MAX_FILE_SIZE",
        "LAPSE_SCAN_THREADS",
        "LAPSE_ANALYSIS_ENABLED",
        "LAPSE_ANALYSIS_MAX_DESCENDANTS",
        "LAPSE_ANALYSIS_GENERATED_CODE",
        "LAPSE_ANALYSIS_SEVERITY",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_lapse_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("lapse.toml"),
        r#"
[scan]
max_file_size = 2_000_000

[analysis]
max_descendants = 500
severity = "info"
"#,
    )
    .unwrap();

    std::env::set_var("LAPSE_SCAN_MAX_FILE_SIZE", "5000000");
    std::env::set_var("LAPSE_ANALYSIS_MAX_DESCENDANTS", "800");

    let cli = CliOverrides {
        max_descendants: Some(1200),
        ..Default::default()
    };

    let config = LapseConfig::load(dir.path(), Some(&cli)).unwrap();

    // CLI beats env and project
    assert_eq!(config.analysis.max_descendants, Some(1200));
    // Env beats project
    assert_eq!(config.scan.max_file_size, Some(5_000_000));
    // Project beats defaults
    assert_eq!(config.analysis.severity, Some(Severity::Info));

    clear_lapse_env_vars();
}

#[test]
fn test_load_missing_files_fallback() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_lapse_env_vars();

    let dir = tempdir();
    let config = LapseConfig::load(dir.path(), None).unwrap();

    assert_eq!(config.scan.effective_max_file_size(), 1_048_576);
    assert_eq!(config.scan.effective_extensions(), vec!["cs".to_string()]);
    assert!(config.analysis.effective_enabled());
    assert!(!config.analysis.effective_analyze_generated_code());
    assert!(config.analysis.effective_respect_pragmas());
    assert_eq!(config.analysis.max_descendants, None);
}

#[test]
fn test_invalid_project_toml_is_parse_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_lapse_env_vars();

    let dir = tempdir();
    std::fs::write(dir.path().join("lapse.toml"), "[scan\nmax_file_size = ").unwrap();

    let err = LapseConfig::load(dir.path(), None).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_unparsable_env_value_is_ignored() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_lapse_env_vars();

    std::env::set_var("LAPSE_SCAN_THREADS", "many");
    let dir = tempdir();
    let config = LapseConfig::load(dir.path(), None).unwrap();
    assert_eq!(config.scan.threads, None);

    clear_lapse_env_vars();
}

#[test]
fn test_validation_rejects_zero_budget() {
    let err = LapseConfig::from_toml("[analysis]\nmax_descendants = 0\n").unwrap_err();
    match err {
        ConfigError::ValidationFailed { field, .. } => {
            assert_eq!(field, "analysis.max_descendants");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_validation_rejects_dotted_extension() {
    let err = LapseConfig::from_toml("[scan]\nextensions = [\".cs\"]\n").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}

#[test]
fn test_unknown_keys_are_ignored() {
    let config = LapseConfig::from_toml(
        r#"
[analysis]
analyze_generated_code = true
some_future_key = 42
"#,
    )
    .unwrap();
    assert!(config.analysis.effective_analyze_generated_code());
}

#[test]
fn test_toml_round_trip_keeps_values() {
    let config = LapseConfig::from_toml(
        r#"
[scan]
extensions = ["cs", "csx"]

[analysis]
severity = "error"
"#,
    )
    .unwrap();
    let rendered = config.to_toml().unwrap();
    let reparsed = LapseConfig::from_toml(&rendered).unwrap();
    assert_eq!(reparsed.scan.extensions, vec!["cs", "csx"]);
    assert_eq!(reparsed.analysis.severity, Some(Severity::Error));
}

#[test]
fn test_unreadable_project_config_is_reported() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_lapse_env_vars();

    let dir = tempdir();
    std::fs::create_dir(dir.path().join("lapse.toml")).unwrap();

    let err = LapseConfig::load(dir.path(), None).unwrap_err();
    assert!(matches!(err, ConfigError::Unreadable { .. }), "got {err}");
    assert!(err.to_string().starts_with("cannot read config "));
}

#[test]
fn test_validation_error_names_its_field() {
    let err = LapseConfig::from_toml("[scan]\nmax_file_size = 0\n").unwrap_err();
    assert_eq!(err.field(), Some("scan.max_file_size"));
    assert_eq!(err.to_string(), "`scan.max_file_size` must be greater than 0");

    let err = LapseConfig::from_toml("[scan\n").unwrap_err();
    assert_eq!(err.field(), None);
    assert!(err.to_string().starts_with("malformed TOML in <string>:"));
}
