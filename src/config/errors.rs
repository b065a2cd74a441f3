//! Configuration errors

use std::io;

use thiserror::Error;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("Failed to read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    /// File is not valid JSON for the config shape
    #[error("Invalid config '{path}': {message}")]
    Parse { path: String, message: String },

    /// Settings parsed but cannot be honoured
    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Io { .. } => "QK_CONFIG_IO",
            ConfigError::Parse { .. } => "QK_CONFIG_PARSE",
            ConfigError::Invalid(_) => "QK_CONFIG_INVALID",
        }
    }
}
