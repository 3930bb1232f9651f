//! Credential and transport configuration.

use std::time::Duration;

use crate::client::ShardError;

/// Base host of the hosted Shard AI API.
pub const DEFAULT_BASE_URL: &str = "https://shard-ai.xyz";

/// A secret string type for sensitive data like API keys.
/// Prevents accidental logging or display of secrets.
#[derive(Clone)]
pub struct SecretString(String);

impl SecretString {
    /// Create a new secret string.
    pub fn new(s: String) -> Self {
        Self(s)
    }

    /// Get the underlying secret value.
    pub fn expose_secret(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretString([REDACTED])")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s.to_string())
    }
}

/// Transport configuration shared by every resource client.
///
/// # Example
/// ```rust
/// use shardai::options::TransportOptions;
/// use std::time::Duration;
///
/// let options = TransportOptions::new("sk-...")
///     .with_timeout(Duration::from_secs(30));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TransportOptions {
    /// API key sent in the `api-key` header on authenticated calls.
    pub api_key: Option<SecretString>,

    /// Base URL for API endpoints. Defaults to the hosted API.
    pub base_url: Option<String>,

    /// Per-request timeout. Unset falls through to the HTTP stack's
    /// defaults.
    pub timeout: Option<Duration>,
}

impl TransportOptions {
    /// Create new transport options with an API key.
    pub fn new(api_key: impl Into<SecretString>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            base_url: None,
            timeout: None,
        }
    }

    /// Read options from `SHARD_API_KEY` and `SHARD_BASE_URL`.
    pub fn from_env() -> Self {
        let api_key = std::env::var("SHARD_API_KEY")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(SecretString::from);

        let base_url = std::env::var("SHARD_BASE_URL")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        Self {
            api_key,
            base_url,
            timeout: None,
        }
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Resolve a path against the configured base URL.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        format!(
            "{}/{}",
            base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Fetch the configured credential, failing before any I/O happens.
    pub(crate) fn require_credential(&self) -> Result<&SecretString, ShardError> {
        match &self.api_key {
            Some(key) if !key.expose_secret().trim().is_empty() => Ok(key),
            _ => Err(ShardError::MissingCredential),
        }
    }
}
