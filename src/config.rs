//! Store configuration.
//!
//! Configuration is optional: [`StoreConfig::default`] is what
//! [`Store::new`](crate::Store::new) uses. Applications that keep their
//! settings in TOML can deserialize it from a table:
//!
//! ```toml
//! name = "todos"
//! trace_dispatch = false
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse store config: {source}")]
    ParseError {
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

/// Settings for a single store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Label used in log events and errors.
    pub name: String,
    /// Emit a `trace` event for every dispatch.
    pub trace_dispatch: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: "store".to_string(),
            trace_dispatch: true,
        }
    }
}

impl StoreConfig {
    /// Default config with a different name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: StoreConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError { source: e })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    ///
    /// Unlike the application config loaders this does not fall back to
    /// defaults when the file is missing: a path was asked for explicitly.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The store name is not blank
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "Store name must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = StoreConfig::from_toml_str("").unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = StoreConfig::from_toml_str("name = \"todos\"").unwrap();
        assert_eq!(config.name, "todos");
        assert!(config.trace_dispatch);
    }

    #[test]
    fn blank_name_fails_validation() {
        let err = StoreConfig::from_toml_str("name = \"  \"").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn wrong_type_is_parse_error() {
        let err = StoreConfig::from_toml_str("trace_dispatch = \"yes\"").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }
}
