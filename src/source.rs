//! Item source - upstream fetches fronted by the lookup cache.

use std::sync::Arc;

use crate::cache::ItemCache;
use crate::error::Result;
use crate::hn_client::ItemProvider;
use crate::types::{Item, ItemId};

/// Upstream provider paired with the process-wide lookup cache
///
/// Cloning is cheap (two `Arc` clones); each fetch task holds its own clone.
#[derive(Clone)]
pub struct ItemSource {
    provider: Arc<dyn ItemProvider>,
    cache: Arc<ItemCache>,
}

impl ItemSource {
    /// Pair a provider with a cache
    pub fn new(provider: Arc<dyn ItemProvider>, cache: Arc<ItemCache>) -> Self {
        Self { provider, cache }
    }

    /// The shared lookup cache
    pub fn cache(&self) -> &Arc<ItemCache> {
        &self.cache
    }

    /// Fetch the ranked identifier sequence (never cached)
    pub async fn ranked_ids(&self) -> Result<Vec<ItemId>> {
        self.provider.ranked_ids().await
    }

    /// Fetch one item, consulting the cache first when `use_cache` is set
    ///
    /// Every successful network fetch is written to the cache, whether or not
    /// this call was allowed to read from it. Failures leave the cache untouched.
    pub async fn fetch_item(&self, id: ItemId, use_cache: bool) -> Result<Item> {
        if use_cache && let Some(item) = self.cache.get(id).await {
            tracing::trace!(item_id = id.0, "Item served from cache");
            return Ok(item);
        }

        let item = self.provider.item(id).await?;
        self.cache.put(id, item.clone()).await;
        Ok(item)
    }
}
