//! Request descriptions and cache key derivation.
//!
//! An [`ApiRequest`] captures everything that shapes a response: method, URL,
//! query parameters, body, and headers. Its [`CacheKey`] is a SHA-256 digest
//! over all of them, so two requests that differ only in their
//! `Authorization` header never share a cached body.

use std::collections::BTreeMap;
use std::fmt;

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};

/// A deterministic fingerprint of a request.
///
/// The inner value is a lowercase hex-encoded SHA-256 digest, so the bearer
/// token that went into it cannot be read back from the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Returns the hex digest backing this key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Full description of an outbound request.
///
/// The bearer token is borrowed rather than copied so that it stays inside
/// its [`SecretString`] until the request is sent.
///
/// # Examples
///
/// ```
/// use lookout_sentry::ApiRequest;
/// use reqwest::Method;
///
/// let a = ApiRequest::new(Method::GET, "https://sentry.io/api/0/projects/");
/// let b = ApiRequest::new(Method::GET, "https://sentry.io/api/0/projects/")
///     .with_header("accept", "application/json");
///
/// assert_ne!(a.cache_key(), b.cache_key());
/// ```
#[derive(Debug, Clone)]
pub struct ApiRequest<'a> {
    method: Method,
    url: String,
    query: BTreeMap<String, String>,
    body: Option<String>,
    headers: BTreeMap<String, String>,
    authorization: Option<&'a SecretString>,
}

impl<'a> ApiRequest<'a> {
    /// Creates a request description with no parameters, body, or headers.
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: BTreeMap::new(),
            body: None,
            headers: BTreeMap::new(),
            authorization: None,
        }
    }

    /// Adds a query parameter, replacing any previous value for `name`.
    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Adds a header. Names are lowercased so that `Accept` and `accept`
    /// describe the same request.
    #[must_use]
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    /// Attaches a bearer token to the request.
    #[must_use]
    pub fn with_bearer(mut self, token: Option<&'a SecretString>) -> Self {
        self.authorization = token;
        self
    }

    /// Returns the HTTP method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the absolute URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the query parameters in sorted order.
    #[must_use]
    pub fn query(&self) -> &BTreeMap<String, String> {
        &self.query
    }

    /// Returns the request body, if any.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Returns the non-secret headers in sorted order.
    #[must_use]
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Returns the bearer token attached to this request.
    #[must_use]
    pub fn bearer(&self) -> Option<&'a SecretString> {
        self.authorization
    }

    /// Derives the cache key for this request.
    ///
    /// The key covers the method, URL, query parameters, body, and every
    /// header including `authorization`.
    #[must_use]
    pub fn cache_key(&self) -> CacheKey {
        let mut headers = self.headers.clone();
        if let Some(token) = self.authorization {
            headers.insert(
                "authorization".to_string(),
                format!("Bearer {}", token.expose_secret()),
            );
        }

        // serde_json serializes BTreeMaps in key order, which keeps this stable
        let identity = serde_json::json!({
            "method": self.method.as_str(),
            "url": self.url,
            "params": self.query,
            "data": self.body,
            "headers": headers,
        });

        let mut hasher = Sha256::new();
        hasher.update(identity.to_string().as_bytes());
        CacheKey(hex::encode(hasher.finalize()))
    }
}
