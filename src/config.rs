//! Application configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! environment variables. Command-line flags are applied last by `main`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

const APP_DIR: &str = "coinspark";
const CONFIG_FILE: &str = "config.toml";
const DB_FILE: &str = "coinspark.db";

/// Runtime configuration for the generator and the local store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Gemini API key
    pub api_key: Option<String>,
    /// Model name inserted into the request path
    pub model: String,
    /// Base URL of the models collection
    pub endpoint: String,
    /// Directory holding the SQLite store
    pub data_dir: PathBuf,
    /// Maximum generations kept in history; 0 keeps everything
    pub history_limit: usize,
    /// Request timeout in seconds; unset waits indefinitely
    pub request_timeout_secs: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            data_dir: default_data_dir(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            request_timeout_secs: None,
        }
    }
}

impl AppConfig {
    /// Load from `path` (or the default config file if present) and apply
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = default_config_path();
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    debug!("No config file at {}, using defaults", default_path.display());
                    Self::default()
                }
            }
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AppConfig = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Override fields from environment-style lookups. Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get("GEMINI_API_KEY") {
            self.api_key = Some(key);
        }
        if let Some(model) = get("COINSPARK_MODEL") {
            self.model = model;
        }
        if let Some(endpoint) = get("COINSPARK_ENDPOINT") {
            self.endpoint = endpoint;
        }
        if let Some(dir) = get("COINSPARK_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// `None` when history is unbounded.
    pub fn history_cap(&self) -> Option<usize> {
        (self.history_limit > 0).then_some(self.history_limit)
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(CONFIG_FILE)
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.history_cap(), Some(DEFAULT_HISTORY_LIMIT));
        assert!(config.request_timeout().is_none());
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_file_overrides_defaults_partially() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "model = \"gemini-pro\"\nhistory_limit = 0\nrequest_timeout_secs = 30"
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.model, "gemini-pro");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.history_cap(), None);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "history_limit = \"lots\"").unwrap();
        assert!(AppConfig::from_file(file.path()).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("GEMINI_API_KEY", "secret"),
            ("COINSPARK_MODEL", "gemini-x"),
            ("COINSPARK_DATA_DIR", "/tmp/spark"),
            ("COINSPARK_ENDPOINT", ""),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_env(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.model, "gemini-x");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/spark"));
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.database_path(), PathBuf::from("/tmp/spark/coinspark.db"));
    }
}
