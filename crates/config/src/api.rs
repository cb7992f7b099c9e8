//! Sentry API connection settings.
//!
//! This module provides the [`ApiConfig`] type, which holds the API root and
//! the per-request timeout.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default API root (the hosted Sentry v0 API).
pub const DEFAULT_BASE_URL: &str = "https://sentry.io/api/0";

/// Default per-request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Minimum allowed request timeout in milliseconds.
pub const MIN_TIMEOUT_MS: u64 = 100;

/// Maximum allowed request timeout in milliseconds (1 minute).
pub const MAX_TIMEOUT_MS: u64 = 60_000;

/// Connection settings for the Sentry API.
///
/// # Examples
///
/// ```
/// use lookout_config::ApiConfig;
///
/// let config = ApiConfig::default();
/// assert_eq!(config.base_url, "https://sentry.io/api/0");
/// assert_eq!(config.timeout_ms, 5000);
///
/// // Self-hosted instance
/// let config = ApiConfig::with_base_url("https://sentry.example.com/api/0");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API root every request path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ApiConfig {
    /// Creates settings for a custom API root with the default timeout.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Returns the request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Validates the API settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not an `http` or `https` URL, or
    /// if the timeout is outside the allowed range.
    pub fn validate(&self) -> crate::Result<()> {
        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(crate::ConfigError::InvalidApi {
                reason: format!("base URL {:?} must start with http:// or https://", self.base_url),
            });
        }

        if !(MIN_TIMEOUT_MS..=MAX_TIMEOUT_MS).contains(&self.timeout_ms) {
            return Err(crate::ConfigError::InvalidApi {
                reason: format!(
                    "timeout {} ms is outside the allowed range of {}..={} ms",
                    self.timeout_ms, MIN_TIMEOUT_MS, MAX_TIMEOUT_MS
                ),
            });
        }

        Ok(())
    }
}
