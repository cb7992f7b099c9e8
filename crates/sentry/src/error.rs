//! Error types for Sentry API operations.
//!
//! Every failure of a fetch operation ends up as one of the variants below.
//! The `Display` implementation of each variant is the human-readable message
//! meant to be shown to the user as-is.

use reqwest::StatusCode;

/// Errors that can occur during Sentry API operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The server rejected the credentials (HTTP 401).
    #[error("401 Unauthorized - Please check your access token is correctly configured")]
    Unauthorized,

    /// The server is throttling this client (HTTP 429).
    #[error("Rate limit exceeded. Please wait before making more requests")]
    RateLimited,

    /// The server responded with any other unsuccessful status.
    #[error("Error fetching information. Server responded with: {status} - {status_text}")]
    Status {
        /// The numeric HTTP status code.
        status: u16,
        /// The canonical reason phrase for `status`, empty for unregistered
        /// codes. A custom phrase sent by the server is not preserved.
        status_text: String,
    },

    /// No response was received: connection failure, timeout, or a request
    /// that could not be built.
    #[error("An error occurred with your request. Please try again later")]
    Network(#[source] reqwest::Error),

    /// A successful response carried a body that could not be decoded.
    #[error("Unexpected response from server: {0}")]
    Decode(#[source] serde_json::Error),

    /// The underlying HTTP client could not be constructed.
    #[error("failed to initialize HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl Error {
    /// Maps an unsuccessful HTTP status to its error.
    ///
    /// The first matching rule wins: 401, then 429, then any other status.
    ///
    /// # Examples
    ///
    /// ```
    /// use lookout_sentry::Error;
    /// use reqwest::StatusCode;
    ///
    /// let err = Error::from_status(StatusCode::INTERNAL_SERVER_ERROR);
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Error fetching information. Server responded with: 500 - Internal Server Error"
    /// );
    /// ```
    #[must_use]
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => Self::Unauthorized,
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimited,
            other => Self::Status {
                status: other.as_u16(),
                status_text: other.canonical_reason().unwrap_or_default().to_string(),
            },
        }
    }

    /// Returns the HTTP status the server responded with, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use lookout_sentry::Error;
    ///
    /// assert_eq!(Error::Unauthorized.status(), Some(401));
    /// assert_eq!(Error::RateLimited.status(), Some(429));
    /// ```
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(StatusCode::UNAUTHORIZED.as_u16()),
            Self::RateLimited => Some(StatusCode::TOO_MANY_REQUESTS.as_u16()),
            Self::Status { status, .. } => Some(*status),
            Self::Network(_) | Self::Decode(_) | Self::Client(_) => None,
        }
    }
}

/// A specialized Result type for Sentry API operations.
pub type Result<T> = std::result::Result<T, Error>;
