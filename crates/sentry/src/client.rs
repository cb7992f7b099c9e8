//! Sentry API client implementation.
//!
//! This module provides [`ClientConfig`], the caller-owned connection
//! settings, and [`SentryClient`], which issues authenticated and cached GET
//! requests against the Sentry REST API.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Method, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::cache::{MemoryCache, NoCache, ResponseCache};
use crate::error::{Error, Result};
use crate::project::Project;
use crate::request::ApiRequest;

/// Root of the Sentry v0 REST API.
pub const DEFAULT_BASE_URL: &str = "https://sentry.io/api/0";

/// Per-request timeout applied when none is configured (5 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

const USER_AGENT: &str = concat!("lookout/", env!("CARGO_PKG_VERSION"));

/// Connection settings for a [`SentryClient`].
///
/// The bearer token is stored as a [`SecretString`], so it never shows up in
/// `Debug` output or logs.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use lookout_sentry::ClientConfig;
///
/// let config = ClientConfig::default()
///     .with_timeout(Duration::from_secs(2))
///     .with_auth_token("sntrys_example");
///
/// assert_eq!(config.base_url, "https://sentry.io/api/0");
/// assert!(config.is_authenticated());
/// assert!(!format!("{config:?}").contains("sntrys_example"));
/// ```
#[derive(Debug)]
pub struct ClientConfig {
    /// API root every request path is appended to.
    pub base_url: String,
    /// Per-request timeout. Requests exceeding it fail without a response.
    pub timeout: Duration,
    auth_token: Option<SecretString>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            auth_token: None,
        }
    }
}

impl ClientConfig {
    /// Creates a configuration for a custom API root, e.g. a self-hosted
    /// Sentry instance.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Returns the configuration with a different request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the configuration with the given bearer token.
    #[must_use]
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.set_auth_token(token);
        self
    }

    /// Replaces the bearer token. Any string is accepted, including an
    /// empty one.
    pub fn set_auth_token(&mut self, token: impl Into<String>) {
        self.auth_token = Some(SecretString::from(token.into()));
    }

    /// Returns the bearer token, if one is set.
    #[must_use]
    pub fn auth_token(&self) -> Option<&SecretString> {
        self.auth_token.as_ref()
    }

    /// Returns whether a bearer token is set.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.auth_token.is_some()
    }

    /// Joins `path` onto the base URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use lookout_sentry::ClientConfig;
    ///
    /// let config = ClientConfig::new("https://sentry.example.com/api/0/");
    /// assert_eq!(
    ///     config.endpoint("/projects/"),
    ///     "https://sentry.example.com/api/0/projects/"
    /// );
    /// ```
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Sentry API client with response caching.
///
/// Every successful GET is cached under a key derived from the full request,
/// including the `Authorization` header, so changing the token never serves
/// a body fetched with another token. Failed requests are never cached.
///
/// # Examples
///
/// ```no_run
/// use lookout_sentry::{ClientConfig, SentryClient};
///
/// # async fn example() -> lookout_sentry::Result<()> {
/// let mut client = SentryClient::new(ClientConfig::default())?;
/// client.set_auth_token("sntrys_your_token");
///
/// for project in client.get_projects().await? {
///     println!("{}", project.slug().unwrap_or("<unnamed>"));
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SentryClient {
    http: reqwest::Client,
    config: ClientConfig,
    cache: Arc<dyn ResponseCache>,
}

impl SentryClient {
    /// Creates a client backed by a [`MemoryCache`] with the default TTL
    /// (300 seconds) and sweep period (60 seconds).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Client`] if the HTTP client cannot be initialized.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_cache(config, Arc::new(MemoryCache::default()))
    }

    /// Creates a client with an explicit cache implementation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Client`] if the HTTP client cannot be initialized.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use lookout_sentry::{ClientConfig, NoCache, SentryClient};
    ///
    /// let client = SentryClient::with_cache(ClientConfig::default(), Arc::new(NoCache)).unwrap();
    /// assert!(!client.is_authenticated());
    /// ```
    #[instrument(skip_all, fields(base_url = %config.base_url, authenticated = config.is_authenticated()))]
    pub fn with_cache(config: ClientConfig, cache: Arc<dyn ResponseCache>) -> Result<Self> {
        debug!(timeout = ?config.timeout, "creating Sentry client");
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(Error::Client)?;

        Ok(Self {
            http,
            config,
            cache,
        })
    }

    /// Creates a client from loaded application settings.
    ///
    /// The token is taken from `settings.auth_token` as-is; callers wanting
    /// the environment fallback store [`lookout_config::Config::resolved_token`]
    /// there first. A disabled cache in the settings selects [`NoCache`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Client`] if the HTTP client cannot be initialized.
    pub fn from_config(settings: &lookout_config::Config) -> Result<Self> {
        let mut config =
            ClientConfig::new(&settings.api.base_url).with_timeout(settings.api.timeout());
        if let Some(token) = &settings.auth_token {
            config.set_auth_token(token.as_str());
        }

        let cache: Arc<dyn ResponseCache> = if settings.cache.enabled {
            Arc::new(MemoryCache::new(
                settings.cache.ttl(),
                settings.cache.check_period(),
            ))
        } else {
            Arc::new(NoCache)
        };

        Self::with_cache(config, cache)
    }

    /// Sets the bearer token used by all subsequent requests.
    ///
    /// Any previous token is overwritten. No validation is performed.
    pub fn set_auth_token(&mut self, token: impl Into<String>) {
        self.config.set_auth_token(token);
    }

    /// Returns the client with the given bearer token.
    ///
    /// The cache is kept; entries fetched with the previous token stay
    /// unreachable because the token is part of every cache key.
    #[must_use]
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.set_auth_token(token);
        self
    }

    /// Returns whether a bearer token is set.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.config.is_authenticated()
    }

    /// Returns the connection settings.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the response cache.
    #[must_use]
    pub fn cache(&self) -> &Arc<dyn ResponseCache> {
        &self.cache
    }

    /// Drops every cached response.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Fetches the projects visible to the current token.
    ///
    /// Issues `GET <base_url>/projects/` unless a fresh cached response
    /// exists. Records are passed through without schema validation.
    ///
    /// # Errors
    ///
    /// - [`Error::Unauthorized`] for HTTP 401
    /// - [`Error::RateLimited`] for HTTP 429
    /// - [`Error::Status`] for any other unsuccessful status
    /// - [`Error::Network`] when no response was received (including timeouts)
    /// - [`Error::Decode`] when the body is not a JSON array
    #[instrument(skip(self))]
    pub async fn get_projects(&self) -> Result<Vec<Project>> {
        let projects: Vec<Project> = self.get_cached("/projects/", &[]).await?;
        debug!(count = projects.len(), "fetched projects");
        Ok(projects)
    }

    /// Performs a cached GET against `path` under the base URL.
    ///
    /// # Errors
    ///
    /// Same as [`get_projects`](Self::get_projects), except that any JSON
    /// body is accepted.
    #[instrument(skip(self, query))]
    pub async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        self.get_cached(path, query).await
    }

    /// Serves `path` from the cache or the network, decoded as `T`.
    ///
    /// Only bodies that decode as `T` are stored. A cached body of another
    /// shape is treated as a miss.
    async fn get_cached<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let request = query.iter().fold(
            ApiRequest::new(Method::GET, self.config.endpoint(path))
                .with_header(ACCEPT, "application/json")
                .with_bearer(self.config.auth_token()),
            |request, (name, value)| request.with_query(*name, *value),
        );

        let key = request.cache_key();
        if let Some(body) = self.cache.get(&key) {
            match serde_json::from_value(body) {
                Ok(decoded) => {
                    debug!(%key, "serving response from cache");
                    return Ok(decoded);
                }
                Err(e) => debug!(%key, error = %e, "cached response has another shape"),
            }
        }

        let body = self.send(&request).await?;
        let decoded = serde_json::from_value(body.clone()).map_err(|e| {
            warn!(error = %e, "response body has an unexpected shape");
            Error::Decode(e)
        })?;
        self.cache.put(key, body, self.cache.default_ttl());
        Ok(decoded)
    }

    async fn send(&self, request: &ApiRequest<'_>) -> Result<Value> {
        debug!(method = %request.method(), url = request.url(), "sending request");

        let mut builder = self
            .http
            .request(request.method().clone(), request.url())
            .query(request.query());
        for (name, value) in request.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(token) = request.bearer() {
            builder = builder.bearer_auth(token.expose_secret());
        }
        if let Some(body) = request.body() {
            builder = builder.body(body.to_string());
        }

        let response = builder.send().await.map_err(no_response)?;
        let status = response.status();
        if !status.is_success() {
            return Err(error_response(response).await);
        }

        let bytes = response.bytes().await.map_err(no_response)?;
        serde_json::from_slice(&bytes).map_err(|e| {
            warn!(error = %e, "response body is not valid JSON");
            Error::Decode(e)
        })
    }
}

/// Logs an unsuccessful response and maps it to an error.
async fn error_response(response: Response) -> Error {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    warn!(
        status = status.as_u16(),
        reason = status.canonical_reason().unwrap_or_default(),
        %body,
        "server responded with an error"
    );
    Error::from_status(status)
}

/// Logs a failure that produced no response and maps it to an error.
fn no_response(error: reqwest::Error) -> Error {
    warn!(error = %error, timeout = error.is_timeout(), "request failed without a response");
    Error::Network(error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_millis(5000));
        assert!(!config.is_authenticated());
    }

    #[test]
    fn endpoint_joins_without_double_slashes() {
        let config = ClientConfig::default();
        assert_eq!(
            config.endpoint("/projects/"),
            "https://sentry.io/api/0/projects/"
        );
        assert_eq!(
            config.endpoint("projects/"),
            "https://sentry.io/api/0/projects/"
        );

        let config = ClientConfig::new("http://localhost:9000/api/0/");
        assert_eq!(
            config.endpoint("/projects/"),
            "http://localhost:9000/api/0/projects/"
        );
    }

    #[test]
    fn set_auth_token_overwrites_previous_token() {
        let mut config = ClientConfig::default().with_auth_token("first");
        config.set_auth_token("second");
        assert_eq!(
            config.auth_token().map(|token| token.expose_secret()),
            Some("second")
        );
    }

    #[test]
    fn empty_token_is_accepted() {
        let config = ClientConfig::default().with_auth_token("");
        assert!(config.is_authenticated());
        assert_eq!(config.auth_token().map(|token| token.expose_secret()), Some(""));
    }

    #[test]
    fn config_debug_redacts_token() {
        let config = ClientConfig::default().with_auth_token("sntrys_secret");
        assert!(!format!("{config:?}").contains("sntrys_secret"));
    }

    #[test]
    fn new_client_is_unauthenticated() {
        let client = SentryClient::new(ClientConfig::default()).unwrap();
        assert!(!client.is_authenticated());
        assert_eq!(client.cache().default_ttl(), Duration::from_secs(300));
    }

    #[test]
    fn with_auth_token_returns_authenticated_client() {
        let client = SentryClient::new(ClientConfig::default())
            .unwrap()
            .with_auth_token("abc");
        assert!(client.is_authenticated());
    }

    #[test]
    fn client_debug_redacts_token() {
        let client = SentryClient::new(ClientConfig::default().with_auth_token("sntrys_secret"))
            .unwrap();
        assert!(!format!("{client:?}").contains("sntrys_secret"));
    }

    #[test]
    fn from_config_applies_settings() {
        let mut settings = lookout_config::Config::default();
        settings.api.base_url = "http://localhost:9000/api/0".to_string();
        settings.api.timeout_ms = 1500;
        settings.auth_token = Some("from-settings".to_string());
        settings.cache.ttl_secs = 30;

        let client = SentryClient::from_config(&settings).unwrap();
        assert_eq!(client.config().base_url, "http://localhost:9000/api/0");
        assert_eq!(client.config().timeout, Duration::from_millis(1500));
        assert_eq!(
            client.config().auth_token().map(|token| token.expose_secret()),
            Some("from-settings")
        );
        assert_eq!(client.cache().default_ttl(), Duration::from_secs(30));
    }

    #[test]
    fn from_config_disabled_cache_uses_no_cache() {
        let mut settings = lookout_config::Config::default();
        settings.cache.enabled = false;

        let client = SentryClient::from_config(&settings).unwrap();
        assert_eq!(client.cache().default_ttl(), Duration::ZERO);
    }

    #[test]
    fn from_config_without_token_stays_unauthenticated() {
        let settings = lookout_config::Config::default();
        let client = SentryClient::from_config(&settings).unwrap();
        assert!(!client.is_authenticated());
    }
}
