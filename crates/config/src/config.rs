//! Core configuration struct and loading logic.
//!
//! This module provides the main [`Config`] struct which aggregates all
//! settings for talking to the Sentry API.

use serde::{Deserialize, Serialize};

use crate::api::ApiConfig;
use crate::cache::CacheConfig;
use crate::error::Result;
use crate::persistence::{find_config_file, parse_config_file};

/// The main configuration struct for lookout.
///
/// # Examples
///
/// ```
/// use lookout_config::{ApiConfig, CacheConfig, Config};
///
/// // Create a default config
/// let config = Config::default();
/// assert!(config.auth_token.is_none());
///
/// // Create a custom config
/// let config = Config {
///     auth_token: Some("sntrys_xxx".to_string()),
///     api: ApiConfig::with_base_url("https://sentry.example.com/api/0"),
///     cache: CacheConfig::with_ttl(60),
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Sentry auth token.
    ///
    /// If not set, [`Config::resolved_token`] falls back to the
    /// `SENTRY_AUTH_TOKEN` environment variable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,

    /// API connection settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Response cache settings.
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Config {
    /// Creates a new default configuration.
    ///
    /// This is equivalent to `Config::default()`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from the default file locations.
    ///
    /// Searches for configuration files in the following order:
    ///
    /// 1. Local: `./lookout.json5` or `./lookout.json`
    /// 2. User: `~/.config/lookout/config.json5` or `~/.config/lookout/config.json`
    ///
    /// If no configuration file is found, returns a default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is found but cannot be
    /// read, parsed, or validated.
    pub fn load() -> Result<Self> {
        match find_config_file() {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use lookout_config::Config;
    ///
    /// # fn example() -> lookout_config::Result<()> {
    /// let config = Config::load_from("custom-config.json5")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn load_from(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let config = parse_config_file(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the API or cache settings are invalid.
    pub fn validate(&self) -> Result<()> {
        self.api.validate()?;
        self.cache.validate()?;
        Ok(())
    }

    /// Returns the token to authenticate with, falling back to the
    /// environment.
    #[must_use]
    pub fn resolved_token(&self) -> Option<String> {
        crate::auth::resolve_token(self.auth_token.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigError;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert!(config.auth_token.is_none());
        assert_eq!(config.api, ApiConfig::default());
        assert_eq!(config.cache, CacheConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn new_config() {
        assert_eq!(Config::new(), Config::default());
    }

    #[test]
    fn validate_invalid_api() {
        let config = Config {
            api: ApiConfig {
                timeout_ms: 1,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidApi { .. })
        ));
    }

    #[test]
    fn validate_invalid_cache() {
        let config = Config {
            cache: CacheConfig {
                check_period_secs: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidCache { .. })
        ));
    }

    #[test]
    fn resolved_token_prefers_configured_value() {
        let config = Config {
            auth_token: Some("sntrys_configured".to_string()),
            ..Default::default()
        };
        assert_eq!(config.resolved_token().as_deref(), Some("sntrys_configured"));
    }

    #[test]
    fn deserialize_with_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json5");
        std::fs::write(
            &path,
            r#"
            {
                auth_token: "sntrys_test",
                api: { base_url: "https://sentry.example.com/api/0" },
                cache: { ttl_secs: 120 },
            }
            "#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.auth_token, Some("sntrys_test".to_string()));
        assert_eq!(config.api.base_url, "https://sentry.example.com/api/0");
        assert_eq!(config.api.timeout_ms, crate::api::DEFAULT_TIMEOUT_MS);
        assert_eq!(config.cache.ttl_secs, 120);
        assert!(config.cache.enabled);
    }

    #[test]
    fn load_from_rejects_invalid_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json5");
        std::fs::write(&path, r#"{ api: { base_url: "sentry.io" } }"#).unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn auth_token_not_serialized_when_none() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(!json.contains("auth_token"));
    }
}
