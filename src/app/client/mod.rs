//! HTTP client for the remote item list
//!
//! The module is organized into specialized components:
//! - `config`: endpoint and HTTP client configuration
//! - `http`: the single GET with error classification
//!
//! [`ItemSource`] is the seam the list processor depends on. [`FetchClient`]
//! is the network implementation; tests provide scripted ones.

use std::future::Future;

use url::Url;

use crate::app::models::Item;
use crate::errors::FetchResult;

pub mod config;
pub mod http;

pub use config::ClientConfig;

use http::HttpHandler;

/// Anything that can produce the raw (unfiltered, unsorted) item list
pub trait ItemSource: Send + Sync {
    /// Fetch the full item list once
    fn fetch_items(&self) -> impl Future<Output = FetchResult<Vec<Item>>> + Send;
}

/// Fetches the item list from the configured endpoint
#[derive(Debug, Clone)]
pub struct FetchClient {
    http_handler: HttpHandler,
    endpoint: Url,
}

impl FetchClient {
    /// Creates a client for the default endpoint
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if the HTTP client cannot be built
    pub fn new() -> FetchResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a client from explicit configuration
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidUrl` if the endpoint cannot be resolved and
    /// `FetchError::Http` if the HTTP client cannot be built
    pub fn with_config(config: ClientConfig) -> FetchResult<Self> {
        let endpoint = config.endpoint()?;
        let client = config.build_http_client()?;
        let http_handler = HttpHandler::new(client, config.request_timeout);

        tracing::debug!("Created fetch client for {}", endpoint);

        Ok(Self {
            http_handler,
            endpoint,
        })
    }

    /// Fetches and decodes the item list
    ///
    /// # Errors
    ///
    /// Returns a network-class `FetchError` on transport failure, timeout or
    /// non-2xx status, and `FetchError::Decode` for a malformed body
    pub async fn fetch_items(&self) -> FetchResult<Vec<Item>> {
        let items: Vec<Item> = self.http_handler.get_json(&self.endpoint).await?;
        tracing::info!("Fetched {} items from {}", items.len(), self.endpoint);
        Ok(items)
    }

    /// The fully resolved endpoint URL
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl ItemSource for FetchClient {
    async fn fetch_items(&self) -> FetchResult<Vec<Item>> {
        FetchClient::fetch_items(self).await
    }
}
