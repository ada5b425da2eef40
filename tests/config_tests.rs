// Config loading and validation tests

use capacity_estimator::config::{AppConfig, MAX_WINDOW_SECS, OutputFormat};

const VALID_CONFIG: &str = r#"
[source]
path = "data/series.json"
period_secs = 60
window_secs = 3600

[thresholds]
upper = 0.6
lower = 0.4

[output]
format = "json"
"#;

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.source.path, "data/series.json");
    assert_eq!(config.source.period_secs, 60);
    assert_eq!(config.source.window_secs, 3600);
    assert_eq!(config.source.window().unwrap(), chrono::TimeDelta::hours(1));
    assert_eq!(config.output.format, OutputFormat::Json);
    let t = config.thresholds.thresholds();
    assert!((t.middle - 0.5).abs() < 1e-12);
}

#[test]
fn test_config_defaults_when_omitted() {
    let config = AppConfig::load_from_str(
        r#"
[source]
path = "series.json"

[thresholds]
"#,
    )
    .expect("valid");
    assert_eq!(config.source.period_secs, 60);
    assert_eq!(config.source.window_secs, 3600);
    assert_eq!(config.thresholds.upper, 0.60);
    assert_eq!(config.thresholds.lower, 0.40);
    assert_eq!(config.output.format, OutputFormat::Log);
}

#[test]
fn test_config_validation_rejects_empty_path() {
    let bad = VALID_CONFIG.replace("path = \"data/series.json\"", "path = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("source.path"));
}

#[test]
fn test_config_validation_rejects_short_period() {
    let bad = VALID_CONFIG.replace("period_secs = 60", "period_secs = 10");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("source.period_secs"));
}

#[test]
fn test_config_accepts_minimum_period() {
    let ok = VALID_CONFIG.replace("period_secs = 60", "period_secs = 15");
    assert_eq!(AppConfig::load_from_str(&ok).unwrap().source.period_secs, 15);
}

#[test]
fn test_config_validation_rejects_window_shorter_than_period() {
    let bad = VALID_CONFIG.replace("window_secs = 3600", "window_secs = 30");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("source.window_secs"));
}

#[test]
fn test_config_validation_rejects_oversized_window() {
    let bad = VALID_CONFIG.replace("window_secs = 3600", "window_secs = 10000000000000000");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("source.window_secs must be <="));
}

#[test]
fn test_config_window_at_maximum() {
    let ok = VALID_CONFIG.replace(
        "window_secs = 3600",
        &format!("window_secs = {}", MAX_WINDOW_SECS),
    );
    let config = AppConfig::load_from_str(&ok).unwrap();
    let window = config.source.window().unwrap();
    assert_eq!(window.num_seconds(), MAX_WINDOW_SECS as i64);
}

#[test]
fn test_config_validation_rejects_zero_threshold() {
    let bad = VALID_CONFIG.replace("lower = 0.4", "lower = 0.0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("thresholds.lower"));
}

#[test]
fn test_config_validation_rejects_upper_above_one() {
    let bad = VALID_CONFIG.replace("upper = 0.6", "upper = 1.5");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("thresholds.upper"));
}

#[test]
fn test_config_validation_rejects_inverted_thresholds() {
    let bad = VALID_CONFIG.replace("lower = 0.4", "lower = 0.7");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("must not exceed"));
}

#[test]
fn test_config_validation_rejects_unknown_format() {
    let bad = VALID_CONFIG.replace("format = \"json\"", "format = \"xml\"");
    assert!(AppConfig::load_from_str(&bad).is_err());
}

#[test]
fn test_config_validation_rejects_invalid_toml() {
    let err = AppConfig::load_from_str("not valid toml [[[").unwrap_err();
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_config_load_from_file_via_env() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, VALID_CONFIG).unwrap();
    unsafe { std::env::set_var("CONFIG_FILE", path.to_str().unwrap()) };
    let result = AppConfig::load();
    unsafe { std::env::remove_var("CONFIG_FILE") };
    let config = result.expect("load from CONFIG_FILE");
    assert_eq!(config.source.path, "data/series.json");
}
