//! Interpreter configuration
//!
//! Loaded from a camelCase JSON document; every field is optional.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::logging::LogLevel;

/// What `interpret` does with a command keyword it has no handler for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownCommandPolicy {
    /// Return nothing.
    #[default]
    Ignore,
    /// Fail with `BindingError::UnknownCommand`.
    Reject,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InterpreterConfig {
    pub unknown_commands: UnknownCommandPolicy,
    /// Apply the `class` -> `className` alias to `two-way` and `bind` too.
    /// Off by default: only `one-way` and `one-time` alias the property.
    pub unify_class_alias: bool,
    pub log_level: LogLevel,
}

impl InterpreterConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}
