//! Configuration management for deskmate.
//!
//! This module handles the `config.yaml` file in the data directory, which
//! stores process-level settings (logging, template overrides). UI settings
//! such as theme and font size are user data and live in the persistence
//! gateway instead, see [`crate::models::Settings`].

use crate::error::Result;
use crate::paths::CONFIG_FILENAME;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that overrides the configured log level.
pub const LOG_LEVEL_ENV_VAR: &str = "DESKMATE_LOG";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Log level: error, warn, info, debug or trace.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Whether rolling log files are written to the data directory.
    #[serde(default = "default_file_logging")]
    pub file_logging: bool,

    /// Directory with `.tera` files overriding the embedded view templates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates_dir: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

const fn default_file_logging() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { log_level: default_log_level(), file_logging: true, templates_dir: None }
    }
}

impl AppConfig {
    /// Load config from a data directory, returning None if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load_from(data_dir: &Path) -> Result<Option<Self>> {
        let config_path = Self::config_path(data_dir);
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(Some(config))
    }

    /// Load config from a data directory, falling back to defaults when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load_or_default(data_dir: &Path) -> Result<Self> {
        Ok(Self::load_from(data_dir)?.unwrap_or_default())
    }

    /// Save config to a data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, data_dir: &Path) -> Result<()> {
        let config_path = Self::config_path(data_dir);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Get the config file path for a data directory.
    pub fn config_path(data_dir: &Path) -> PathBuf {
        data_dir.join(CONFIG_FILENAME)
    }

    /// The effective log level, honouring the environment override.
    #[must_use]
    pub fn effective_log_level(&self) -> String {
        std::env::var(LOG_LEVEL_ENV_VAR)
            .ok()
            .filter(|level| !level.trim().is_empty())
            .unwrap_or_else(|| self.log_level.clone())
    }
}

/// Ensure config exists in a data directory, writing defaults if not.
///
/// Returns the config (either loaded or newly created) and whether it was created.
///
/// # Errors
///
/// Returns an error if config cannot be loaded or saved.
pub fn ensure_config_in(data_dir: &Path) -> Result<(AppConfig, bool)> {
    if let Some(config) = AppConfig::load_from(data_dir)? {
        return Ok((config, false));
    }

    let config = AppConfig::default();
    config.save_to(data_dir)?;
    log::info!("event=config_created module=config path={}", data_dir.display());
    Ok((config, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_returns_none() {
        let dir = TempDir::new().unwrap();
        assert!(AppConfig::load_from(dir.path()).unwrap().is_none());
        assert_eq!(AppConfig::load_or_default(dir.path()).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig {
            log_level: "debug".to_string(),
            file_logging: false,
            templates_dir: Some(PathBuf::from("/opt/views")),
        };
        config.save_to(dir.path()).unwrap();

        let loaded = AppConfig::load_from(dir.path()).unwrap().unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "log_level: warn\n").unwrap();

        let loaded = AppConfig::load_from(dir.path()).unwrap().unwrap();
        assert_eq!(loaded.log_level, "warn");
        assert!(loaded.file_logging);
        assert!(loaded.templates_dir.is_none());
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "log_level: [unclosed\n").unwrap();

        let result = AppConfig::load_from(dir.path());
        assert!(matches!(result, Err(crate::error::Error::Yaml(_))));
    }

    #[test]
    fn test_ensure_config_creates_once() {
        let dir = TempDir::new().unwrap();
        let (first, created) = ensure_config_in(dir.path()).unwrap();
        assert!(created);
        assert_eq!(first, AppConfig::default());

        let (_, created_again) = ensure_config_in(dir.path()).unwrap();
        assert!(!created_again);
    }

    #[test]
    fn test_ensure_config_keeps_existing() {
        let dir = TempDir::new().unwrap();
        let custom = AppConfig { log_level: "trace".to_string(), ..Default::default() };
        custom.save_to(dir.path()).unwrap();

        let (loaded, created) = ensure_config_in(dir.path()).unwrap();
        assert!(!created);
        assert_eq!(loaded.log_level, "trace");
    }

    #[test]
    #[serial]
    fn test_env_overrides_log_level() {
        let config = AppConfig::default();
        std::env::set_var(LOG_LEVEL_ENV_VAR, "debug");
        assert_eq!(config.effective_log_level(), "debug");
        std::env::remove_var(LOG_LEVEL_ENV_VAR);
        assert_eq!(config.effective_log_level(), "info");
    }
}
