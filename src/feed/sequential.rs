//! Sequential fetch - one item at a time, the correctness baseline.

use tracing::{debug, warn};

use crate::source::ItemSource;
use crate::types::{ItemId, Story};

use super::filter::is_qualifying;

/// Fetch items in rank order until `target` qualifying stories are found.
///
/// Never reads the cache, so every item is a fresh upstream fetch.
pub(crate) async fn fetch_sequential(
    source: &ItemSource,
    ids: &[ItemId],
    target: usize,
) -> Vec<Story> {
    let mut stories = Vec::with_capacity(target.min(ids.len()));
    if target == 0 {
        return stories;
    }

    for (rank, &id) in ids.iter().enumerate() {
        match source.fetch_item(id, false).await {
            Ok(item) if is_qualifying(&item) => {
                debug!(item_id = id.0, rank, "Qualifying story");
                stories.push(Story::from(item));
                if stories.len() >= target {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!(item_id = id.0, rank, error = %e, "Skipping item that failed to fetch");
            }
        }
    }
    stories
}
