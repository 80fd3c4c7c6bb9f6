//! Feed assembly split into focused submodules.
//!
//! - [`filter`] - Which items qualify as feed stories
//! - [`orchestrator`] - Windowed concurrent fetch and rank-order reassembly
//! - [`sequential`] - One-at-a-time baseline fetch

pub mod filter;
mod orchestrator;
mod sequential;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;

use std::sync::Arc;
use std::time::Instant;

use crate::cache::ItemCache;
use crate::config::{Config, FeedConfig};
use crate::error::{Error, Result};
use crate::hn_client::{HackerNewsClient, ItemProvider};
use crate::source::ItemSource;
use crate::types::{Feed, FetchMode};

pub use filter::is_qualifying;
use orchestrator::{WindowPlan, fetch_concurrent};
use sequential::fetch_sequential;

/// Assembles feeds of top stories (cloneable - all fields are Arc-wrapped)
#[derive(Clone)]
pub struct FeedService {
    /// Upstream provider fronted by the lookup cache
    source: ItemSource,
    /// Feed assembly settings
    config: Arc<FeedConfig>,
}

impl FeedService {
    /// Build a service talking to the configured upstream, with a fresh cache
    ///
    /// # Errors
    /// Returns error if the configuration is invalid or the HTTP client cannot be built
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        let client = HackerNewsClient::new(&config.hn)?;
        Ok(Self::with_provider(
            Arc::new(client),
            Arc::new(ItemCache::new()),
            config.feed.clone(),
        ))
    }

    /// Build a service over an arbitrary provider and an injected cache
    pub fn with_provider(
        provider: Arc<dyn ItemProvider>,
        cache: Arc<ItemCache>,
        config: FeedConfig,
    ) -> Self {
        Self {
            source: ItemSource::new(provider, cache),
            config: Arc::new(config),
        }
    }

    /// The lookup cache shared by every request on this service
    pub fn cache(&self) -> &Arc<ItemCache> {
        self.source.cache()
    }

    /// Feed assembly settings
    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Assemble a feed of up to `target` qualifying stories in rank order.
    ///
    /// Only a failure to fetch the ranked list is an error; item failures drop
    /// the item, and running out of ranked ids yields a shorter feed.
    ///
    /// # Errors
    /// [`Error::Validation`] if `target` is zero, or the upstream error from the
    /// ranked-list fetch.
    pub async fn get_feed(&self, mode: FetchMode, target: usize) -> Result<Feed> {
        if target == 0 {
            return Err(Error::Validation(
                "target story count must be at least 1".to_string(),
            ));
        }

        let start = Instant::now();
        let ids = self.source.ranked_ids().await?;

        let stories = match mode {
            FetchMode::Sequential => fetch_sequential(&self.source, &ids, target).await,
            FetchMode::Concurrent | FetchMode::ConcurrentWithCache => {
                fetch_concurrent(
                    &self.source,
                    &ids,
                    target,
                    mode.uses_cache(),
                    WindowPlan::from_config(&self.config),
                )
                .await
            }
        };

        let elapsed = start.elapsed();
        tracing::info!(
            mode = %mode,
            target,
            ranked = ids.len(),
            count = stories.len(),
            elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            "Feed assembled"
        );

        Ok(Feed {
            mode,
            stories,
            elapsed,
        })
    }
}
