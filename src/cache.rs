//! In-process lookup cache for fetched items
//!
//! Upstream items are immutable once published, so entries never expire. The
//! map is unbounded for the lifetime of the process.

use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::types::{Item, ItemId};

/// Process-wide memo of successfully fetched items, keyed by identifier
///
/// Internally synchronized: share it behind an `Arc` across any number of
/// concurrent fetch tasks. A racing read and write of the same key may observe
/// either the old or the new entry.
#[derive(Debug, Default)]
pub struct ItemCache {
    entries: RwLock<HashMap<ItemId, Item>>,
}

impl ItemCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a previously stored item
    pub async fn get(&self, id: ItemId) -> Option<Item> {
        self.entries.read().await.get(&id).cloned()
    }

    /// Store (or replace) the item for `id`
    pub async fn put(&self, id: ItemId, item: Item) {
        self.entries.write().await.insert(id, item);
    }

    /// Number of cached items
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the cache holds no items
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl From<HashMap<ItemId, Item>> for ItemCache {
    fn from(entries: HashMap<ItemId, Item>) -> Self {
        Self {
            entries: RwLock::new(entries),
        }
    }
}
