//! Application configuration management.
//!
//! Configuration is stored at `~/.config/staffbook/config.json` and is
//! optional. The only setting is the base URL of the employee collection,
//! which the `STAFFBOOK_API_URL` environment variable overrides.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Application name used for config/cache directory paths
pub const APP_NAME: &str = "staffbook";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable that overrides the configured base URL
pub const API_URL_ENV: &str = "STAFFBOOK_API_URL";

/// Collection used when nothing else is configured
pub const DEFAULT_API_BASE_URL: &str =
    "https://67c5664dc4649b9551b680c7.mockapi.io/api/patient-reg/user";

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub api_base_url: Option<String>,
}

impl Config {
    /// Load from the user config directory. A missing file gives defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Base URL of the employee collection, from the environment, then
    /// this config, then the built-in default.
    pub fn base_url(&self) -> String {
        self.resolve_base_url(std::env::var(API_URL_ENV).ok())
    }

    fn resolve_base_url(&self, env_value: Option<String>) -> String {
        env_value
            .into_iter()
            .chain(self.api_base_url.clone())
            .map(|url| url.trim().to_string())
            .find(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
    }

    /// Directory holding the local cache slots and the log file.
    pub fn cache_dir(&self) -> PathBuf {
        dirs::cache_dir()
            .map(|dir| dir.join(APP_NAME))
            .unwrap_or_else(|| PathBuf::from("cache"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        let config = Config::default();
        assert_eq!(config.resolve_base_url(None), DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_config_overrides_default() {
        let config = Config {
            api_base_url: Some("http://localhost:3000/employees".to_string()),
        };
        assert_eq!(config.resolve_base_url(None), "http://localhost:3000/employees");
    }

    #[test]
    fn test_env_overrides_config() {
        let config = Config {
            api_base_url: Some("http://localhost:3000/employees".to_string()),
        };
        assert_eq!(
            config.resolve_base_url(Some("http://staging/employees".to_string())),
            "http://staging/employees"
        );
    }

    #[test]
    fn test_blank_values_are_skipped() {
        let config = Config {
            api_base_url: Some("  ".to_string()),
        };
        assert_eq!(config.resolve_base_url(Some(String::new())), DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);

        assert_eq!(Config::load_from(&path).expect("missing file"), Config::default());

        std::fs::write(&path, r#"{"api_base_url": "http://localhost:3000/employees"}"#).expect("write");
        let config = Config::load_from(&path).expect("load");
        assert_eq!(config.api_base_url.as_deref(), Some("http://localhost:3000/employees"));
    }

    #[test]
    fn test_corrupt_config_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "{not json").expect("write");
        assert!(Config::load_from(&path).is_err());
    }
}
