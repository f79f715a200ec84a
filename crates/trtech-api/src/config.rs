//! Backend client configuration.

use crate::retry::RetryPolicy;
use crate::timeout::TimeoutConfig;
use crate::ApiError;

/// Backend base URL when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Environment variable that overrides the base URL.
pub const BASE_URL_ENV: &str = "TRTECH_API_URL";

/// Backend client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL, including the `/api` prefix.
    pub base_url: String,
    pub timeout: TimeoutConfig,
    /// Retry policy for idempotent reads.
    pub retry: RetryPolicy,
}

impl ApiConfig {
    /// Create a configuration for a base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ApiError::InvalidUrl(base_url));
        }
        Ok(Self {
            base_url,
            timeout: TimeoutConfig::default(),
            retry: RetryPolicy::default(),
        })
    }

    /// Configuration from `TRTECH_API_URL`, falling back to the default.
    pub fn from_env() -> Result<Self, ApiError> {
        let url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::new(url)
    }

    pub fn with_timeout(mut self, timeout: TimeoutConfig) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Absolute URL for a path such as `/products`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: TimeoutConfig::default(),
            retry: RetryPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join() {
        let config = ApiConfig::new("https://api.trtech.co.za/api/").unwrap();
        assert_eq!(config.url("/orders"), "https://api.trtech.co.za/api/orders");
        assert_eq!(config.url("health"), "https://api.trtech.co.za/api/health");
    }

    #[test]
    fn test_rejects_non_http() {
        assert!(matches!(
            ApiConfig::new("localhost:5000"),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_default() {
        assert_eq!(ApiConfig::default().url("products"), "http://localhost:5000/api/products");
    }
}
