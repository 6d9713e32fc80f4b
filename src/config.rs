//! Lookup client configuration.
//!
//! The E-utilities endpoint and throttling knobs are explicit configuration
//! handed to [`crate::EutilsClient`], never module-level constants, so tests
//! can point `base_url` at a mock server.

use std::time::Duration;

/// Default E-utilities base URL.
pub const DEFAULT_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/";

/// Default delay between requests. NCBI allows 3 requests/second without an
/// API key; 350 ms keeps us under that.
pub const DEFAULT_RATE_LIMIT_MS: u64 = 350;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default backoff before the single retry of a transient failure.
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 500;

/// Configuration for the E-utilities lookup client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for the E-utilities endpoints, with trailing slash.
    pub base_url: String,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
    /// Minimum delay between consecutive requests.
    pub rate_limit: Duration,
    /// Backoff before the one retry of a transient failure.
    pub retry_backoff: Duration,
    /// NCBI API key appended as `api_key=` when present. Raises the request
    /// quota from 3/s to 10/s.
    pub api_key: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            rate_limit: Duration::from_millis(DEFAULT_RATE_LIMIT_MS),
            retry_backoff: Duration::from_millis(DEFAULT_RETRY_BACKOFF_MS),
            api_key: None,
        }
    }
}

impl ClientConfig {
    /// Create a configuration with defaults, reading `NCBI_API_KEY` from the
    /// environment.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("NCBI_API_KEY").ok().filter(|k| !k.is_empty()),
            ..Default::default()
        }
    }

    /// Override the base URL (trailing slash added if missing).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut url = base_url.into();
        if !url.ends_with('/') {
            url.push('/');
        }
        self.base_url = url;
        self
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the inter-request delay.
    pub fn with_rate_limit(mut self, rate_limit: Duration) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    /// Override the retry backoff.
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_ncbi() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.base_url.ends_with('/'));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_with_base_url_adds_trailing_slash() {
        let config = ClientConfig::default().with_base_url("http://localhost:8080/eutils");
        assert_eq!(config.base_url, "http://localhost:8080/eutils/");
    }

    #[test]
    fn test_with_base_url_keeps_existing_slash() {
        let config = ClientConfig::default().with_base_url("http://localhost:8080/");
        assert_eq!(config.base_url, "http://localhost:8080/");
    }

    #[test]
    fn test_builder_overrides() {
        let config = ClientConfig::default()
            .with_timeout(Duration::from_secs(5))
            .with_rate_limit(Duration::from_millis(0))
            .with_retry_backoff(Duration::from_millis(10))
            .with_api_key("abc123");

        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.rate_limit, Duration::from_millis(0));
        assert_eq!(config.retry_backoff, Duration::from_millis(10));
        assert_eq!(config.api_key.as_deref(), Some("abc123"));
    }
}
