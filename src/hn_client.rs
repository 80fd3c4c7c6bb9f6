//! Upstream transport - the ranked-list and single-item fetches.

use crate::config::HnConfig;
use crate::error::{Error, Result};
use crate::types::{Item, ItemId};
use tracing::debug;

/// Abstraction over the upstream item API, enabling testability.
///
/// Each call is a single request/response round trip with no retry.
#[async_trait::async_trait]
pub trait ItemProvider: Send + Sync {
    /// Fetch the full ranked identifier sequence
    async fn ranked_ids(&self) -> Result<Vec<ItemId>>;

    /// Fetch one item by identifier
    async fn item(&self, id: ItemId) -> Result<Item>;
}

/// Production [`ItemProvider`] talking JSON to the Hacker News Firebase API.
#[derive(Clone, Debug)]
pub struct HackerNewsClient {
    http_client: reqwest::Client,
    endpoint: String,
}

impl HackerNewsClient {
    /// Create a client for the configured endpoint
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created
    pub fn new(config: &HnConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| Error::Config {
                message: format!("failed to create HTTP client: {}", e),
                key: Some("hn".to_string()),
            })?;

        Ok(Self {
            http_client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Base endpoint this client talks to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.http_client.get(url).send().await?;

        // Check HTTP status before trying to parse the response body
        let status = response.status();
        if !status.is_success() {
            return Err(Error::UpstreamStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait::async_trait]
impl ItemProvider for HackerNewsClient {
    async fn ranked_ids(&self) -> Result<Vec<ItemId>> {
        let url = format!("{}/topstories.json", self.endpoint);
        let ids: Vec<ItemId> = self.get_json(&url).await?;
        debug!(count = ids.len(), "Fetched ranked ids");
        Ok(ids)
    }

    async fn item(&self, id: ItemId) -> Result<Item> {
        let url = format!("{}/item/{}.json", self.endpoint, id);
        // Upstream answers `null` for identifiers it does not know
        let item: Option<Item> = self.get_json(&url).await?;
        item.ok_or(Error::ItemNotFound(id))
    }
}
