//! Response cache settings.
//!
//! Responses are kept in memory for `ttl_secs` and expired entries are swept
//! every `check_period_secs`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default time-to-live for cached responses (5 minutes).
pub const DEFAULT_TTL_SECS: u64 = 300;

/// Default interval between expiry sweeps (1 minute).
pub const DEFAULT_CHECK_PERIOD_SECS: u64 = 60;

/// Maximum allowed TTL (1 day).
pub const MAX_TTL_SECS: u64 = 86_400;

/// Minimum allowed sweep interval.
pub const MIN_CHECK_PERIOD_SECS: u64 = 1;

/// Maximum allowed sweep interval (1 hour).
pub const MAX_CHECK_PERIOD_SECS: u64 = 3600;

/// Configuration for the in-memory response cache.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use lookout_config::CacheConfig;
///
/// let config = CacheConfig::default();
/// assert!(config.enabled);
/// assert_eq!(config.ttl(), Duration::from_secs(300));
///
/// let config = CacheConfig::disabled();
/// assert!(!config.enabled);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether successful responses are cached at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// How long a cached response stays fresh, in seconds.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// How often expired entries are swept, in seconds.
    #[serde(default = "default_check_period_secs")]
    pub check_period_secs: u64,
}

fn default_enabled() -> bool {
    true
}

fn default_ttl_secs() -> u64 {
    DEFAULT_TTL_SECS
}

fn default_check_period_secs() -> u64 {
    DEFAULT_CHECK_PERIOD_SECS
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: DEFAULT_TTL_SECS,
            check_period_secs: DEFAULT_CHECK_PERIOD_SECS,
        }
    }
}

impl CacheConfig {
    /// Creates settings with caching turned off.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Creates settings with a custom TTL and the default sweep interval.
    #[must_use]
    pub fn with_ttl(ttl_secs: u64) -> Self {
        Self {
            ttl_secs,
            ..Self::default()
        }
    }

    /// Returns the TTL as a [`Duration`].
    #[must_use]
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// Returns the sweep interval as a [`Duration`].
    #[must_use]
    pub fn check_period(&self) -> Duration {
        Duration::from_secs(self.check_period_secs)
    }

    /// Validates the cache settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the TTL exceeds one day or the sweep interval is
    /// outside the allowed range.
    pub fn validate(&self) -> crate::Result<()> {
        if self.ttl_secs > MAX_TTL_SECS {
            return Err(crate::ConfigError::InvalidCache {
                reason: format!(
                    "ttl {} exceeds maximum of {} seconds",
                    self.ttl_secs, MAX_TTL_SECS
                ),
            });
        }

        if self.check_period_secs < MIN_CHECK_PERIOD_SECS {
            return Err(crate::ConfigError::InvalidCache {
                reason: format!(
                    "check period {} is below minimum of {} seconds",
                    self.check_period_secs, MIN_CHECK_PERIOD_SECS
                ),
            });
        }

        if self.check_period_secs > MAX_CHECK_PERIOD_SECS {
            return Err(crate::ConfigError::InvalidCache {
                reason: format!(
                    "check period {} exceeds maximum of {} seconds",
                    self.check_period_secs, MAX_CHECK_PERIOD_SECS
                ),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert!(config.enabled);
        assert_eq!(config.ttl_secs, DEFAULT_TTL_SECS);
        assert_eq!(config.check_period(), Duration::from_secs(60));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn with_ttl() {
        let config = CacheConfig::with_ttl(30);
        assert_eq!(config.ttl(), Duration::from_secs(30));
        assert!(config.enabled);
    }

    #[test]
    fn zero_ttl_is_valid() {
        assert!(CacheConfig::with_ttl(0).validate().is_ok());
    }

    #[test]
    fn validate_ttl_above_maximum() {
        assert!(CacheConfig::with_ttl(MAX_TTL_SECS + 1).validate().is_err());
        assert!(CacheConfig::with_ttl(MAX_TTL_SECS).validate().is_ok());
    }

    #[test]
    fn validate_check_period_boundaries() {
        let mut config = CacheConfig::default();

        config.check_period_secs = 0;
        assert!(config.validate().is_err());
        config.check_period_secs = MIN_CHECK_PERIOD_SECS;
        assert!(config.validate().is_ok());
        config.check_period_secs = MAX_CHECK_PERIOD_SECS;
        assert!(config.validate().is_ok());
        config.check_period_secs = MAX_CHECK_PERIOD_SECS + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn deserialize_with_defaults() {
        let config: CacheConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CacheConfig::default());
    }

    #[test]
    fn deserialize_partial() {
        let config: CacheConfig = serde_json::from_str(r#"{"enabled": false}"#).unwrap();
        assert!(!config.enabled);
        assert_eq!(config.ttl_secs, DEFAULT_TTL_SECS);
    }
}
