// Configuration management

use crate::core::errors::ConfigError;
use crate::core::models::OutputFormat;
use crate::engine::query::resolve_time_zone;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Path used when neither `--config` nor the environment names one
pub const DEFAULT_CONFIG_PATH: &str = "config.json";
pub const ENV_CONFIG_PATH: &str = "TIME_PROGRESSION_CONFIG";

pub const ENV_HOST_ADDRESS: &str = "HOST_ADDRESS";
pub const ENV_PORT: &str = "PORT";
pub const ENV_DEFAULT_TIMEZONE: &str = "DEFAULT_TIMEZONE";
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

/// Service configuration, read once at startup from a JSON file
///
/// Keys are PascalCase (`HostAddress`, `HostPort`, `DefaultTimezone`, ...).
/// The value is immutable after loading and is handed to the router, never
/// stored globally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Config {
    // Server configuration
    pub host_address: String,
    pub host_port: u16,

    // Query defaults
    pub default_timezone: String,
    #[serde(default = "default_format")]
    pub default_format: OutputFormat,

    // Middleware configuration
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    // Logging configuration
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_format")]
    pub log_format: String, // "json" or "text"
}

fn default_format() -> OutputFormat {
    OutputFormat::Percentage
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Config {
    /// Load configuration from a JSON file, apply environment overrides and
    /// validate the result
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::from_json(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.apply_overrides(|key| env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from a JSON document without validating it
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Override fields from a key lookup (the process environment in
    /// production). Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(host) = get(ENV_HOST_ADDRESS) {
            self.host_address = host;
        }
        if let Some(port) = get(ENV_PORT) {
            self.host_port = Self::parse_port(&port)?;
        }
        if let Some(timezone) = get(ENV_DEFAULT_TIMEZONE) {
            self.default_timezone = timezone;
        }
        if let Some(level) = get(ENV_LOG_LEVEL) {
            self.log_level = level;
        }
        if let Some(format) = get(ENV_LOG_FORMAT) {
            self.log_format = format;
        }

        Ok(())
    }

    /// Address the HTTP listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host_address, self.host_port)
    }

    /// Parse a port override
    fn parse_port(value: &str) -> Result<u16, ConfigError> {
        let port = value.parse::<u16>().map_err(|e| {
            ConfigError::Invalid(format!("Invalid {} value '{}': {}", ENV_PORT, value, e))
        })?;

        if port == 0 {
            return Err(ConfigError::Invalid(
                "PORT must be between 1 and 65535".to_string(),
            ));
        }

        Ok(port)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host_address.trim().is_empty() {
            return Err(ConfigError::Invalid("HostAddress is empty".to_string()));
        }

        if self.host_port == 0 {
            return Err(ConfigError::Invalid(
                "HostPort must be between 1 and 65535".to_string(),
            ));
        }

        resolve_time_zone(&self.default_timezone).map_err(|_| {
            ConfigError::Invalid(format!(
                "DefaultTimezone '{}' is not a known time zone",
                self.default_timezone
            ))
        })?;

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "RequestTimeoutSecs must be greater than 0".to_string(),
            ));
        }

        Self::validate_log_level(&self.log_level)?;
        Self::validate_log_format(&self.log_format)?;

        Ok(())
    }

    /// Validate log level
    fn validate_log_level(level: &str) -> Result<(), ConfigError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&level.to_lowercase().as_str()) {
            return Err(ConfigError::Invalid(format!(
                "Invalid LogLevel '{}': must be one of {}",
                level,
                valid_levels.join(", ")
            )));
        }
        Ok(())
    }

    /// Validate log format
    fn validate_log_format(format: &str) -> Result<(), ConfigError> {
        if format != "json" && format != "text" {
            return Err(ConfigError::Invalid(format!(
                "Invalid LogFormat '{}': must be 'json' or 'text'",
                format
            )));
        }
        Ok(())
    }
}

impl Config {
    /// Configuration for tests, bypassing file loading
    pub fn test_config() -> Self {
        Self {
            host_address: "127.0.0.1".to_string(),
            host_port: 8080,
            default_timezone: "UTC".to_string(),
            default_format: OutputFormat::Percentage,
            request_timeout_secs: 10,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}
