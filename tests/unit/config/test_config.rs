// Unit tests for configuration loading

use std::fs;
use tempfile::TempDir;
use time_progression::config::Config;
use time_progression::core::errors::ConfigError;
use time_progression::core::models::OutputFormat;

#[test]
fn test_from_file_full_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{
            "HostAddress": "127.0.0.1",
            "HostPort": 1323,
            "DefaultTimezone": "Europe/Berlin",
            "DefaultFormat": "second",
            "RequestTimeoutSecs": 5,
            "LogLevel": "debug",
            "LogFormat": "json"
        }"#,
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.default_format, OutputFormat::Seconds);
    assert_eq!(config.request_timeout_secs, 5);
}

#[test]
fn test_from_file_rejects_unknown_timezone() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{ "HostAddress": "127.0.0.1", "HostPort": 1323, "DefaultTimezone": "Mars/Olympus" }"#,
    )
    .unwrap();

    // A DEFAULT_TIMEZONE override in the environment could mask this
    if std::env::var("DEFAULT_TIMEZONE").is_err() {
        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}

#[test]
fn test_from_file_rejects_wrong_types() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{ "HostAddress": "127.0.0.1", "HostPort": "eighty", "DefaultTimezone": "UTC" }"#,
    )
    .unwrap();

    let err = Config::from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_test_config_is_valid() {
    assert!(Config::test_config().validate().is_ok());
}
