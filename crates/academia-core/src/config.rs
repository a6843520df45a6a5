//! Application configuration management.
//!
//! This module handles loading and saving the application configuration:
//! backend address, request timeout, where the session is stored, and the
//! last username used to log in.
//!
//! Configuration is stored at `~/.config/academia/config.json`.
//! A per-run override (command line flag or `ACADEMIA_BASE_URL`) replaces
//! the configured backend address but is never written back.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::api::gateway::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::api::GatewayConfig;
use crate::storage::{FileStorage, KeyringStorage, Storage};

/// Application name used for config/data directory paths
const APP_NAME: &str = "academia";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the backend address
pub const BASE_URL_ENV: &str = "ACADEMIA_BASE_URL";

/// Where the session entries are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Keyring,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub storage: StorageBackend,
    #[serde(default)]
    pub last_username: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Record the last username used to log in, keeping every other stored
    /// setting as it is on disk
    pub fn remember_username(username: &str) -> Result<()> {
        Self::remember_username_at(&Self::config_path()?, username)
    }

    pub fn remember_username_at(path: &Path, username: &str) -> Result<()> {
        let mut stored = Self::load_from(path)?;
        stored.last_username = Some(username.to_string());
        stored.save_to(path)
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory holding file-backed session storage
    pub fn data_dir(&self) -> Result<PathBuf> {
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }

    /// Backend address: per-run override, then environment, then config,
    /// then default
    pub fn base_url(&self, run_override: Option<&str>) -> String {
        run_override
            .map(str::to_string)
            .or_else(|| std::env::var(BASE_URL_ENV).ok())
            .filter(|s| !s.trim().is_empty())
            .or_else(|| self.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Timeout of 0 disables it
    pub fn gateway_config(&self, base_url_override: Option<&str>) -> GatewayConfig {
        let secs = self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        GatewayConfig {
            base_url: self.base_url(base_url_override),
            timeout: (secs > 0).then(|| Duration::from_secs(secs)),
        }
    }

    /// Open the configured session storage
    pub fn open_storage(&self) -> Result<Arc<dyn Storage>> {
        Ok(match self.storage {
            StorageBackend::File => Arc::new(FileStorage::new(self.data_dir()?)),
            StorageBackend::Keyring => Arc::new(KeyringStorage::new()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config.storage, StorageBackend::File);
        assert!(config.base_url.is_none());
        assert!(config.last_username.is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            base_url: Some("https://lms.example.edu".to_string()),
            request_timeout_secs: Some(5),
            storage: StorageBackend::Keyring,
            last_username: Some("jdoe".to_string()),
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.base_url.as_deref(), Some("https://lms.example.edu"));
        assert_eq!(loaded.storage, StorageBackend::Keyring);
        assert_eq!(loaded.last_username.as_deref(), Some("jdoe"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"storage":"keyring"}"#).unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.storage, StorageBackend::Keyring);
        assert!(config.request_timeout_secs.is_none());
    }

    #[test]
    fn test_gateway_timeout() {
        let mut config = Config::default();
        assert_eq!(
            config.gateway_config(None).timeout,
            Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        );

        config.request_timeout_secs = Some(0);
        assert_eq!(config.gateway_config(None).timeout, None);
    }

    #[test]
    fn test_run_override_is_not_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let stored = Config {
            base_url: Some("https://lms.example.edu".to_string()),
            ..Config::default()
        };
        stored.save_to(&path).unwrap();

        let config = Config::load_from(&path).unwrap();
        let gateway = config.gateway_config(Some("http://localhost:9999"));
        assert_eq!(gateway.base_url, "http://localhost:9999");

        Config::remember_username_at(&path, "jdoe").unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.base_url.as_deref(), Some("https://lms.example.edu"));
        assert_eq!(reloaded.last_username.as_deref(), Some("jdoe"));
    }

    #[test]
    fn test_remember_username_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("academia").join("config.json");
        Config::remember_username_at(&path, "root").unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert!(reloaded.base_url.is_none());
        assert_eq!(reloaded.last_username.as_deref(), Some("root"));
    }
}
