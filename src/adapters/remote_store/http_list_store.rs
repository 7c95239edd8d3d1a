//! HTTP List Store - RemoteListStore backed by a JSON document endpoint.
//!
//! The endpoint serves the buyer list as a JSON array on `GET` and replaces it
//! on `PUT`. Writes authenticate with an API key passed as a query parameter.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HttpListStoreConfig::new("https://store.example.com/docs/buyers", api_key)
//!     .with_api_key_param("apiKey")
//!     .with_timeout(Duration::from_secs(10));
//!
//! let store = HttpListStore::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

use crate::domain::membership::MembershipList;
use crate::ports::{RemoteListStore, StoreError};

/// Configuration for the HTTP list store.
#[derive(Debug, Clone)]
pub struct HttpListStoreConfig {
    /// Document URL.
    pub url: String,
    /// API key for writes.
    api_key: Secret<String>,
    /// Query parameter carrying the API key (default: `apiKey`).
    pub api_key_param: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl HttpListStoreConfig {
    /// Creates a new configuration for the given document URL and API key.
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: Secret::new(api_key.into()),
            api_key_param: "apiKey".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Sets the query parameter name used for the API key.
    pub fn with_api_key_param(mut self, param: impl Into<String>) -> Self {
        self.api_key_param = param.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Remote list store speaking plain HTTP + JSON.
pub struct HttpListStore {
    config: HttpListStoreConfig,
    client: Client,
}

impl HttpListStore {
    /// Creates a new store client.
    ///
    /// # Errors
    /// Returns `StoreError::Client` if the HTTP client cannot be built.
    pub fn new(config: HttpListStoreConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StoreError::Client(e.to_string()))?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl RemoteListStore for HttpListStore {
    async fn fetch_list(&self) -> Result<MembershipList, StoreError> {
        tracing::debug!("Fetching buyer list from {}", self.config.url);

        let response = self
            .client
            .get(&self.config.url)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if body.trim().is_empty() {
            return Ok(MembershipList::new());
        }

        serde_json::from_str(&body).map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn replace_list(&self, list: &MembershipList) -> Result<(), StoreError> {
        tracing::debug!("Writing {} buyers to {}", list.len(), self.config.url);

        let response = self
            .client
            .put(&self.config.url)
            .query(&[(self.config.api_key_param.as_str(), self.config.api_key())])
            .json(list)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status(status.as_u16()));
        }

        Ok(())
    }
}
