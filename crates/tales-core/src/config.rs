//! Configuration management for tales.
//!
//! Loads configuration from ${TALES_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Environment variable that overrides `base_url`.
pub const BASE_URL_ENV: &str = "TALES_BASE_URL";

/// Returns the default config template with comments.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for tales configuration and data.
    //!
    //! TALES_HOME resolution order:
    //! 1. TALES_HOME environment variable (if set)
    //! 2. ~/.config/tales (default)

    use std::path::PathBuf;

    /// Returns the tales home directory.
    ///
    /// Checks TALES_HOME first, falls back to ~/.config/tales, and finally to
    /// a `.tales` directory relative to the working directory.
    pub fn tales_home() -> PathBuf {
        if let Ok(home) = std::env::var("TALES_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".tales"),
            |h| h.join(".config").join("tales"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        tales_home().join("config.toml")
    }

    /// Returns the path of the persisted session token.
    pub fn token_path() -> PathBuf {
        tales_home().join("token")
    }

    /// Returns the log directory.
    pub fn logs_dir() -> PathBuf {
        tales_home().join("logs")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend base URL (scheme + host + port, no trailing `/api`).
    pub base_url: String,

    /// Request timeout in seconds (0 = transport default).
    pub request_timeout_secs: u32,

    /// Secret for the dev-only user listing endpoint.
    pub admin_secret: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 0,
            admin_secret: None,
        }
    }
}

impl Config {
    const DEFAULT_BASE_URL: &str = "http://localhost:5173";

    /// Loads the config from the default path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads the config from `path`, returning defaults when it is missing.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Writes the commented default template to `path`.
    ///
    /// # Errors
    /// Fails if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }

    /// Resolves the backend base URL with precedence: env > config > default.
    ///
    /// The result never ends with `/`.
    ///
    /// # Errors
    /// Returns an error if the chosen value is not a valid URL.
    pub fn effective_base_url(&self) -> Result<String> {
        let env_url = std::env::var(BASE_URL_ENV).ok();
        resolve_base_url(env_url.as_deref(), Some(&self.base_url))
    }

    /// Returns the configured request timeout, if any.
    pub fn request_timeout(&self) -> Option<Duration> {
        if self.request_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(u64::from(self.request_timeout_secs)))
        }
    }
}

fn resolve_base_url(env_url: Option<&str>, config_url: Option<&str>) -> Result<String> {
    let chosen = [env_url, config_url]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|url| !url.is_empty())
        .unwrap_or(Config::DEFAULT_BASE_URL);

    Url::parse(chosen).with_context(|| format!("Invalid backend base URL: {chosen}"))?;
    Ok(chosen.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.base_url, "http://localhost:5173");
        assert_eq!(config.request_timeout_secs, 0);
        assert!(config.admin_secret.is_none());
    }

    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "request_timeout_secs = 5\n").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.base_url, "http://localhost:5173");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "base_url = [").unwrap();

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }

    #[test]
    fn test_init_creates_config_with_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("subdir").join("config.toml");

        Config::init(&config_path).unwrap();

        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("base_url ="));
        assert!(contents.contains("# admin_secret ="));

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.base_url, "http://localhost:5173");
    }

    #[test]
    fn test_init_fails_if_exists() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "").unwrap();

        assert!(Config::init(&config_path).is_err());
    }

    #[test]
    fn test_timeout_zero_disables() {
        let config = Config::default();
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_base_url_env_wins_over_config() {
        let url = resolve_base_url(Some("http://127.0.0.1:9000/"), Some("http://example.com"))
            .unwrap();
        assert_eq!(url, "http://127.0.0.1:9000");
    }

    #[test]
    fn test_blank_env_falls_back_to_config() {
        let url = resolve_base_url(Some("  "), Some("http://example.com")).unwrap();
        assert_eq!(url, "http://example.com");
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let err = resolve_base_url(None, Some("not a url")).unwrap_err();
        assert!(err.to_string().contains("Invalid backend base URL"));
    }
}
