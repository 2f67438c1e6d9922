//! HTTP client configuration and building logic
//!
//! This module handles the configuration of the item endpoint and the
//! construction of the underlying `reqwest` client.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::{endpoint, http};
use crate::errors::{FetchError, FetchResult};

/// Configuration for the item endpoint and HTTP client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL the resource path is resolved against
    pub base_url: String,
    /// Path of the item list relative to `base_url`
    pub resource_path: String,
    /// Request timeout
    pub request_timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
    /// TCP nodelay (disable Nagle's algorithm)
    pub tcp_nodelay: bool,
    /// Connection pool idle timeout
    pub pool_idle_timeout: Option<Duration>,
    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: endpoint::BASE_URL.to_string(),
            resource_path: endpoint::RESOURCE_PATH.to_string(),
            request_timeout: http::DEFAULT_TIMEOUT,
            connect_timeout: http::CONNECT_TIMEOUT,
            tcp_nodelay: true,
            pool_idle_timeout: Some(http::POOL_IDLE_TIMEOUT),
            user_agent: http::USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Configuration pointing at a different base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Resolve the full endpoint URL
    ///
    /// A base URL without a trailing slash is treated as a directory, so
    /// `http://host/api` + `hiring.json` gives `http://host/api/hiring.json`.
    pub fn endpoint(&self) -> FetchResult<Url> {
        let mut base = self.base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }

        let invalid = |error: url::ParseError| FetchError::InvalidUrl {
            url: self.base_url.clone(),
            error: error.to_string(),
        };

        let base = Url::parse(&base).map_err(invalid)?;
        base.join(self.resource_path.trim_start_matches('/'))
            .map_err(invalid)
    }

    /// Builds the HTTP client with the specified configuration
    pub fn build_http_client(&self) -> FetchResult<Client> {
        let mut client_builder = Client::builder()
            .timeout(self.request_timeout)
            .connect_timeout(self.connect_timeout)
            .user_agent(self.user_agent.as_str())
            .tcp_nodelay(self.tcp_nodelay);

        if let Some(idle_timeout) = self.pool_idle_timeout {
            client_builder = client_builder.pool_idle_timeout(idle_timeout);
        }

        client_builder.build().map_err(FetchError::Http)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, endpoint::BASE_URL);
        assert_eq!(config.resource_path, "hiring.json");
        assert_eq!(config.request_timeout, http::DEFAULT_TIMEOUT);
        assert!(config.tcp_nodelay);
    }

    #[test]
    fn test_default_endpoint() {
        let url = ClientConfig::default().endpoint().unwrap();
        assert_eq!(url.as_str(), "https://fetch-hiring.s3.amazonaws.com/hiring.json");
    }

    #[test]
    fn test_endpoint_without_trailing_slash() {
        let config = ClientConfig::with_base_url("http://127.0.0.1:8080/api");
        let url = config.endpoint().unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/api/hiring.json");
    }

    #[test]
    fn test_endpoint_with_leading_slash_path() {
        let config = ClientConfig {
            resource_path: "/lists/hiring.json".to_string(),
            ..ClientConfig::with_base_url("http://localhost/base/")
        };
        let url = config.endpoint().unwrap();
        assert_eq!(url.as_str(), "http://localhost/base/lists/hiring.json");
    }

    #[test]
    fn test_invalid_base_url() {
        let config = ClientConfig::with_base_url("not a url");
        match config.endpoint() {
            Err(FetchError::InvalidUrl { url, .. }) => assert_eq!(url, "not a url"),
            other => panic!("Expected InvalidUrl, got {:?}", other),
        }
    }

    #[test]
    fn test_http_client_with_custom_config() {
        let config = ClientConfig {
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            pool_idle_timeout: None,
            ..Default::default()
        };

        let result = config.build_http_client();
        assert!(result.is_ok());
    }
}
