//! Helper configuration
//!
//! All settings have defaults; a JSON file may override any subset:
//!
//! ```json
//! { "sort": { "unresolved": "continue" }, "like": { "escape_char": "!" } }
//! ```

mod errors;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::observability::{log_event_with_fields, Event};

pub use errors::{ConfigError, ConfigResult};

/// Default cap on sort directive length
pub const DEFAULT_MAX_DIRECTIVE_LEN: usize = 256;

/// Default escape character for LIKE patterns
pub const DEFAULT_ESCAPE_CHAR: char = '*';

/// What the sort resolver does when a column matches but the candidate
/// has no attribute by that name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnresolvedPolicy {
    /// Stop at the first table carrying the column, sorted or not
    #[default]
    Stop,
    /// Keep looking in the remaining candidates
    Continue,
}

/// Sort directive handling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortConfig {
    pub unresolved: UnresolvedPolicy,
    /// Longer directives are ignored outright
    pub max_directive_len: usize,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            unresolved: UnresolvedPolicy::Stop,
            max_directive_len: DEFAULT_MAX_DIRECTIVE_LEN,
        }
    }
}

impl SortConfig {
    /// Resolver that keeps searching past unresolvable columns
    pub fn continue_on_unresolved() -> Self {
        Self {
            unresolved: UnresolvedPolicy::Continue,
            ..Self::default()
        }
    }
}

/// LIKE escaping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LikeConfig {
    pub escape_char: char,
}

impl Default for LikeConfig {
    fn default() -> Self {
        Self {
            escape_char: DEFAULT_ESCAPE_CHAR,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryKitConfig {
    pub sort: SortConfig,
    pub like: LikeConfig,
}

impl QueryKitConfig {
    /// Loads and validates a JSON configuration file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        let config: Self = serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        config.validate()?;
        let shown = path.display().to_string();
        log_event_with_fields(Event::ConfigLoaded, &[("path", shown.as_str())]);
        Ok(config)
    }

    /// Rejects settings the helpers cannot honour
    pub fn validate(&self) -> ConfigResult<()> {
        if self.sort.max_directive_len == 0 {
            return Err(ConfigError::Invalid(
                "sort.max_directive_len must be positive".into(),
            ));
        }
        if matches!(self.like.escape_char, '%' | '_') {
            return Err(ConfigError::Invalid(format!(
                "like.escape_char cannot be the wildcard '{}'",
                self.like.escape_char
            )));
        }
        Ok(())
    }
}
