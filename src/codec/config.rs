//! Codec configuration
//!
//! Loaded from a JSON file; every field has a default so `{}` is valid.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::{log_event_with_fields, Event, Logger, Severity};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Codec configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Maximum schema nesting depth (default: 128, `null` disables)
    #[serde(default = "default_max_depth")]
    pub max_depth: Option<usize>,

    /// Pretty-print serialized output (default: false)
    #[serde(default)]
    pub pretty: bool,

    /// Minimum log severity (default: "warn")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_max_depth() -> Option<usize> {
    Some(128)
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            pretty: false,
            log_level: default_log_level(),
        }
    }
}

impl CodecConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: CodecConfig = serde_json::from_str(&content)?;
        config.validate()?;

        log_event_with_fields(
            Event::ConfigLoaded,
            &[("path", path.display().to_string().as_str())],
        );
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == Some(0) {
            return Err(ConfigError::Invalid("max_depth must be > 0".into()));
        }
        self.severity()?;
        Ok(())
    }

    /// Parsed minimum log severity
    pub fn severity(&self) -> Result<Severity, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("unknown log_level '{}'", self.log_level)))
    }

    /// Set the process-wide log threshold from this configuration
    pub fn apply_logging(&self) -> Result<(), ConfigError> {
        Logger::set_min_severity(self.severity()?);
        Ok(())
    }

    /// Builder: override the depth limit
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Builder: pretty-print output
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}
