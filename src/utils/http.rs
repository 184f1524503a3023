//! HTTP client utilities.

use reqwest::Client;
use std::sync::Arc;

use crate::config::SearchConfig;
use crate::sources::SearchError;

/// Shared HTTP client.
///
/// Cloning is cheap and clones share one connection pool, so every source
/// built from the same configuration reuses connections across sequential calls.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Arc<Client>,
}

impl HttpClient {
    /// Create a client using the timeout and user agent from `config`
    pub fn from_config(config: &SearchConfig) -> Result<Self, SearchError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout())
            .connect_timeout(config.request_timeout())
            .build()
            .map_err(|e| {
                SearchError::Configuration(format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// Get the underlying client
    pub fn client(&self) -> &Client {
        &self.client
    }
}
