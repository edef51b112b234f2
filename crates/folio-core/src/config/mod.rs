//! Configuration management for Folio.
//!
//! Configuration is loaded from the platform config directory with sensible
//! defaults. Credentials default to `${FLICKR_API_KEY}` / `${FLICKR_USER_ID}`
//! so a bare environment is enough to get going.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for Folio.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Flickr API access
    pub flickr: FlickrConfig,

    /// Portfolio selection and albums
    pub portfolio: PortfolioConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Resolved credentials for the Flickr API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub user_id: String,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.folio.folio/config.toml
    /// - Linux: ~/.config/folio/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\folio\config\config.toml
    ///
    /// Falls back to ~/.folio/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "folio", "folio")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".folio").join("config.toml")
            })
    }

    /// Expand `~` in a user-supplied config path.
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).into_owned())
    }

    /// Replace the configured album tags with a comma-separated list.
    ///
    /// Applies the same checks as loading from a file; on error the
    /// previous tags are kept.
    pub fn set_album_tags(&mut self, raw: &str) -> Result<(), ConfigError> {
        let previous = std::mem::replace(&mut self.portfolio.album_tags, parse_album_tags(raw));
        if let Err(e) = self.validate() {
            self.portfolio.album_tags = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Resolve the API key and user id, following `${ENV_VAR}` references.
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        let api_key =
            resolve_env_var(&self.flickr.api_key).ok_or(ConfigError::MissingCredential {
                field: "flickr.api_key",
                env: "FLICKR_API_KEY",
            })?;
        let user_id =
            resolve_env_var(&self.flickr.user_id).ok_or(ConfigError::MissingCredential {
                field: "flickr.user_id",
                env: "FLICKR_USER_ID",
            })?;
        Ok(Credentials { api_key, user_id })
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

/// Resolve `${ENV_VAR}` references in config strings.
///
/// Plain values pass through; empty values and unset variables yield `None`.
pub fn resolve_env_var(value: &str) -> Option<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).ok().filter(|v| !v.is_empty())
    } else if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
