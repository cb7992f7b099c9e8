//! Sentry token resolution.
//!
//! This module resolves the auth token with a fallback chain:
//!
//! 1. `auth_token` from the configuration file
//! 2. The `SENTRY_AUTH_TOKEN` environment variable
//! 3. Unauthenticated (returns `None`)
//!
//! Empty values are treated as absent at every step.

/// Environment variable consulted when no token is configured.
pub const TOKEN_ENV_VAR: &str = "SENTRY_AUTH_TOKEN";

/// Resolves the Sentry auth token.
///
/// # Arguments
///
/// * `config_token` - The `auth_token` from the configuration, if any
///
/// # Returns
///
/// Returns `Some(token)` if a token is available, `None` otherwise.
///
/// # Examples
///
/// ```
/// use lookout_config::auth::resolve_token;
///
/// let token = resolve_token(Some("sntrys_configured"));
/// assert_eq!(token.as_deref(), Some("sntrys_configured"));
/// ```
#[must_use]
pub fn resolve_token(config_token: Option<&str>) -> Option<String> {
    resolve_token_with(config_token, |name| std::env::var(name).ok())
}

/// Resolves the Sentry auth token using a custom environment lookup.
///
/// # Examples
///
/// ```
/// use lookout_config::auth::resolve_token_with;
///
/// let token = resolve_token_with(None, |_| Some("sntrys_from_env".to_string()));
/// assert_eq!(token.as_deref(), Some("sntrys_from_env"));
/// ```
pub fn resolve_token_with(
    config_token: Option<&str>,
    lookup: impl FnOnce(&str) -> Option<String>,
) -> Option<String> {
    // 1. Configured token
    if let Some(token) = config_token.filter(|t| !t.is_empty()) {
        return Some(token.to_string());
    }

    // 2. Environment
    lookup(TOKEN_ENV_VAR).filter(|t| !t.is_empty())
}
