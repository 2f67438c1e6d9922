//! Core HTTP operations
//!
//! One GET per call, no retries. Transport errors, timeouts and non-success
//! statuses map onto the network variants of [`FetchError`]; body decoding
//! failures map onto [`FetchError::Decode`].

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::errors::{FetchError, FetchResult};

/// HTTP operations handler
#[derive(Debug, Clone)]
pub struct HttpHandler {
    client: Client,
    request_timeout: Duration,
}

impl HttpHandler {
    /// Creates a new HttpHandler around an already configured client
    ///
    /// `request_timeout` is only used to report how long a timed out request
    /// waited; the client enforces it.
    pub fn new(client: Client, request_timeout: Duration) -> Self {
        Self {
            client,
            request_timeout,
        }
    }

    /// Issues a GET and returns the response if the status is a success
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Timeout` if the request times out,
    /// `FetchError::ServerError` for non-2xx statuses and `FetchError::Http`
    /// for any other transport failure.
    pub async fn get_response(&self, url: &Url) -> FetchResult<reqwest::Response> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Server answered {} for {}", status, url);
            return Err(FetchError::ServerError {
                status: status.as_u16(),
            });
        }

        tracing::debug!("Successfully fetched response: {}", url);
        Ok(response)
    }

    /// Fetches `url` and decodes the body as JSON
    ///
    /// # Errors
    ///
    /// Everything `get_response` returns, plus `FetchError::Decode` when the
    /// body does not match `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> FetchResult<T> {
        let response = self.get_response(url).await?;
        let body = response.bytes().await.map_err(|e| self.classify(e))?;
        tracing::debug!("Received {} bytes from {}", body.len(), url);

        let value = serde_json::from_slice(&body)?;
        Ok(value)
    }

    fn classify(&self, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout {
                timeout: self.request_timeout,
            }
        } else {
            FetchError::Http(error)
        }
    }
}
