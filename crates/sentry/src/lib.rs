//! Sentry API client for lookout.
//!
//! This crate wraps the Sentry REST API: it authenticates requests with a
//! bearer token, fetches the list of projects, caches successful responses
//! for a bounded time, and turns failures into human-readable errors.
//!
//! # Overview
//!
//! The crate provides:
//!
//! - [`SentryClient`] and [`ClientConfig`]: The API client and its caller-owned settings
//! - [`Project`]: An opaque project record passed through unvalidated
//! - [`ApiRequest`] and [`CacheKey`]: Request descriptions and their fingerprints
//! - [`ResponseCache`], [`MemoryCache`] and [`NoCache`]: Pluggable response caching
//! - [`Error`]: Error types for Sentry API operations
//!
//! # Caching
//!
//! Successful GET responses are cached for 300 seconds by default, keyed by
//! method, URL, query parameters, body, and headers. The `Authorization`
//! header is part of the key, so switching tokens never returns a body
//! fetched with a different token. Failed requests are never cached.
//!
//! # Errors
//!
//! Every failure is returned to the caller and is final for that call; the
//! client never retries. The error's `Display` output is ready for display:
//!
//! | Condition | Message |
//! |---|---|
//! | HTTP 401 | `401 Unauthorized - Please check your access token is correctly configured` |
//! | HTTP 429 | `Rate limit exceeded. Please wait before making more requests` |
//! | other HTTP status | `Error fetching information. Server responded with: <status> - <reason>` |
//! | no response | `An error occurred with your request. Please try again later` |
//!
//! # Examples
//!
//! ```no_run
//! use lookout_sentry::{ClientConfig, SentryClient};
//!
//! # async fn example() -> lookout_sentry::Result<()> {
//! let client = SentryClient::new(ClientConfig::default())?
//!     .with_auth_token("sntrys_your_token");
//!
//! match client.get_projects().await {
//!     Ok(projects) => println!("Found {} projects", projects.len()),
//!     Err(e) => eprintln!("{e}"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Building a client from a configuration file:
//!
//! ```no_run
//! use lookout_sentry::SentryClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = lookout_config::Config::load()?;
//! let client = SentryClient::from_config(&settings)?;
//! let projects = client.get_projects().await?;
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod client;
pub mod error;
pub mod project;
pub mod request;

pub use cache::{MemoryCache, NoCache, ResponseCache};
pub use client::{ClientConfig, SentryClient};
pub use error::{Error, Result};
pub use project::Project;
pub use request::{ApiRequest, CacheKey};
