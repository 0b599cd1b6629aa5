// Domain error types - messages are safe to return to HTTP callers verbatim

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by a single progression query
///
/// These are the only failure modes of the core. Both are terminal for the
/// query that raised them and never affect later queries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProgressionError {
    /// The identifier does not resolve in the time zone database (HTTP 400)
    #[error("invalid timezone")]
    InvalidTimeZone,

    /// The output format is not one of the recognized spellings (HTTP 400)
    #[error("invalid format")]
    InvalidFormat,
}

impl ProgressionError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ProgressionError::InvalidTimeZone => 400,
            ProgressionError::InvalidFormat => 400,
        }
    }

    /// Get user-facing error message
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// Startup configuration errors, fatal to the process
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid JSON for the expected shape
    #[error("Failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A value was read but failed validation
    #[error("Configuration error: {0}")]
    Invalid(String),
}
