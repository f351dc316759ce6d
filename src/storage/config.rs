//! Configuration handling for geoshapes
//!
//! Configuration is stored in `~/.config/geoshapes/config.toml` (or the
//! platform equivalent). Every key is optional:
//!
//! ```toml
//! data_file = "/home/me/shapes.json"
//! auto_save = true
//! unit = "centimeters"
//! precision = 2
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Unit;

/// File name used when no data file is configured
pub const DEFAULT_DATA_FILE: &str = "shapes.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// User configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where shapes are persisted (defaults to the platform data dir)
    pub data_file: Option<PathBuf>,

    /// Save after every change
    pub auto_save: bool,

    /// Unit used for input and display
    pub unit: Unit,

    /// Decimal places in text output
    pub precision: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            auto_save: true,
            unit: Unit::Meters,
            precision: 2,
        }
    }
}

impl Config {
    /// Loads configuration from the default location
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from a specific file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.precision > 12 {
            return Err(ConfigError::Invalid(format!(
                "precision must be at most 12, got {}",
                self.precision
            )));
        }
        if let Some(path) = &self.data_file {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Invalid("data_file must not be empty".to_string()));
            }
        }
        Ok(())
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("dev", "geoshapes", "geoshapes")
    }

    /// Returns the config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Returns the configured data file, or the default one in the data dir
    pub fn data_file(&self) -> PathBuf {
        if let Some(path) = &self.data_file {
            return path.clone();
        }

        Self::project_dirs()
            .map(|dirs| dirs.data_dir().join(DEFAULT_DATA_FILE))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::default();

        assert!(config.auto_save);
        assert_eq!(config.unit, Unit::Meters);
        assert_eq!(config.precision, 2);
        assert!(config.data_file().ends_with(DEFAULT_DATA_FILE));
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
auto_save = false
unit = "centimeters"
"#;

        let config: Config = toml::from_str(toml).unwrap();
        assert!(!config.auto_save);
        assert_eq!(config.unit, Unit::Centimeters);
        assert_eq!(config.precision, 2);
        assert_eq!(config.data_file, None);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn written_config_loads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config {
            data_file: Some(dir.path().join("shapes.json")),
            auto_save: false,
            unit: Unit::Feet,
            precision: 4,
        };
        fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.data_file(), dir.path().join("shapes.json"));
    }

    #[test]
    fn invalid_toml_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "auto_save = \"maybe\"").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn rejects_excessive_precision() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "precision = 40").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("precision"));
    }
}
