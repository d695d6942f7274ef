//! Configuration management for mal-helper.
//!
//! This module handles loading and parsing configuration from TOML files,
//! with sensible defaults for all settings.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that overrides `mal.client_id`
pub const CLIENT_ID_ENV: &str = "MAL_CLIENT_ID";

/// Result count used when neither `--limit` nor `mal.default_limit` is given
pub const DEFAULT_LIMIT: u32 = 10;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// MyAnimeList API settings
    #[serde(default)]
    pub mal: MalConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log directory path
    pub log_dir: String,

    /// Default log level (trace, debug, info, warn, error)
    pub default_level: String,

    /// Enable console output (written to stderr)
    pub console: bool,

    /// Enable file output
    pub file: bool,

    /// Enable JSON formatting for file logs
    pub json_format: bool,
}

/// MyAnimeList API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MalConfig {
    /// API v2 root, without the media kind
    pub api_url: String,

    /// Public website root used for record links
    pub web_url: String,

    /// Value sent in the `X-MAL-Client-ID` header
    pub client_id: String,

    /// HTTP request timeout in seconds
    pub timeout_seconds: u64,

    /// Result count used when `--limit` is not given
    pub default_limit: u32,

    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: "logs".to_string(),
            default_level: "warn".to_string(),
            console: true,
            file: false,
            json_format: false,
        }
    }
}

impl Default for MalConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.myanimelist.net/v2".to_string(),
            web_url: "https://myanimelist.net".to_string(),
            client_id: String::new(),
            timeout_seconds: 30,
            default_limit: DEFAULT_LIMIT,
            user_agent: concat!("mal-helper/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            mal: MalConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// If the file doesn't exist, returns the default configuration.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::warn!(
                path = %path.display(),
                "Config file not found, using defaults"
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::debug!(
            path = %path.display(),
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = toml::to_string_pretty(self)
            .context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            "Configuration saved successfully"
        );

        Ok(())
    }

    /// Get the path for the log directory
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.logging.log_dir)
    }
}

impl MalConfig {
    /// Resolve the client id, preferring `MAL_CLIENT_ID` over the file value
    pub fn resolve_client_id(&self) -> Result<String> {
        self.client_id_with_override(std::env::var(CLIENT_ID_ENV).ok())
    }

    fn client_id_with_override(&self, env_value: Option<String>) -> Result<String> {
        let id = env_value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| self.client_id.trim().to_string());

        if id.is_empty() {
            bail!(
                "No MyAnimeList client id configured: set {} or `mal.client_id` in the config file",
                CLIENT_ID_ENV
            );
        }

        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.mal.api_url, "https://api.myanimelist.net/v2");
        assert_eq!(config.mal.web_url, "https://myanimelist.net");
        assert_eq!(config.mal.default_limit, 10);
        assert!(config.mal.client_id.is_empty());
        assert!(!config.logging.file);
    }

    #[test]
    fn test_save_and_load_config() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");

        let mut original_config = Config::default();
        original_config.mal.client_id = "abc123".to_string();
        original_config.save(&config_path)?;

        assert!(config_path.exists());

        let loaded_config = Config::from_file(&config_path)?;
        assert_eq!(loaded_config.mal.client_id, "abc123");
        assert_eq!(loaded_config.mal.api_url, original_config.mal.api_url);

        Ok(())
    }

    #[test]
    fn test_load_nonexistent_config() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.mal.default_limit, 10);
    }

    #[test]
    fn test_partial_config_fills_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            concat!(
                "[logging]\n",
                "log_dir = \"/tmp/mal\"\n",
                "default_level = \"debug\"\n",
                "console = false\n",
                "file = true\n",
                "json_format = true\n",
            ),
        )?;

        let config = Config::from_file(&config_path)?;
        assert_eq!(config.logging.default_level, "debug");
        assert_eq!(config.log_dir(), PathBuf::from("/tmp/mal"));
        assert_eq!(config.mal.timeout_seconds, 30);

        Ok(())
    }

    #[test]
    fn test_client_id_only_config() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "[mal]\nclient_id = \"xyz\"\n")?;

        let config = Config::from_file(&config_path)?;
        assert_eq!(config.mal.client_id, "xyz");
        assert_eq!(config.mal.api_url, "https://api.myanimelist.net/v2");
        assert_eq!(config.logging.default_level, "warn");

        Ok(())
    }

    #[test]
    fn test_malformed_config_is_error() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "[mal\napi_url = ")?;

        assert!(Config::from_file(&config_path).is_err());
        Ok(())
    }

    #[test]
    fn test_client_id_resolution() {
        let mut mal = MalConfig::default();
        assert!(mal.client_id_with_override(None).is_err());
        assert!(mal.client_id_with_override(Some("  ".to_string())).is_err());

        mal.client_id = "from-file".to_string();
        assert_eq!(mal.client_id_with_override(None).unwrap(), "from-file");
        assert_eq!(
            mal.client_id_with_override(Some("from-env".to_string())).unwrap(),
            "from-env"
        );
    }
}
