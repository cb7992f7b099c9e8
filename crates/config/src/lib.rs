//! Configuration management for lookout.
//!
//! This crate handles locating, loading, and validating the settings used
//! to build a Sentry API client.
//!
//! # Overview
//!
//! - [`config`]: Core configuration struct and loading logic
//! - [`api`]: API root and request timeout
//! - [`cache`]: Response cache TTL and sweep interval
//! - [`auth`]: Token resolution from the config file or the environment
//! - [`persistence`]: Config file discovery and parsing
//! - [`error`]: Error types for configuration operations
//!
//! # Configuration Sources (Priority)
//!
//! 1. Local config (`./lookout.json5` or `./lookout.json`)
//! 2. User config (`~/.config/lookout/config.json5` or `~/.config/lookout/config.json`)
//! 3. Built-in defaults
//!
//! The auth token additionally falls back to the `SENTRY_AUTH_TOKEN`
//! environment variable through [`Config::resolved_token`].
//!
//! # Example File
//!
//! ```json5
//! {
//!   auth_token: "sntrys_xxx",
//!   api: { base_url: "https://sentry.io/api/0", timeout_ms: 5000 },
//!   cache: { enabled: true, ttl_secs: 300, check_period_secs: 60 },
//! }
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use lookout_config::Config;
//!
//! # fn example() -> lookout_config::Result<()> {
//! let config = Config::load()?;
//! println!("Talking to {}", config.api.base_url);
//! println!("Caching responses for {} seconds", config.cache.ttl_secs);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod persistence;

// Re-export primary types at crate root for convenience
pub use api::ApiConfig;
pub use cache::CacheConfig;
pub use config::Config;
pub use error::{ConfigError, Result};
