//! Windowed concurrent fetch - parallel item fetches joined per window and
//! reassembled in rank order.
//!
//! Each window covers the current shortfall (stories still needed), so the
//! optimistic case of every item qualifying finishes in a single window. When
//! some items do not qualify, the cursor moves past the consumed window and the
//! next window is sized to the new shortfall. A window is a barrier: nothing
//! from window `k + 1` is dispatched until every task of window `k` reported.

use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::config::{FeedConfig, FetchStrategy};
use crate::source::ItemSource;
use crate::types::{FetchResult, ItemId, RankedId, Story, rank_ids};

use super::filter::is_qualifying;

/// Window sizing derived from [`FeedConfig`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct WindowPlan {
    pub(crate) strategy: FetchStrategy,
    pub(crate) max_window: Option<usize>,
}

impl WindowPlan {
    pub(crate) fn from_config(config: &FeedConfig) -> Self {
        Self {
            strategy: config.strategy,
            max_window: config.max_window,
        }
    }

    /// Length of the next window given the shortfall and the unconsumed input
    pub(crate) fn window_len(&self, shortfall: usize, remaining: usize) -> usize {
        let len = match self.strategy {
            FetchStrategy::Windowed => match self.max_window {
                Some(cap) => shortfall.min(cap.max(1)),
                None => shortfall,
            },
            FetchStrategy::Unbounded => remaining,
        };
        len.min(remaining)
    }
}

/// Fetch until `target` qualifying stories are found or `ids` is exhausted.
///
/// Output is ordered by position in `ids` regardless of completion order, and
/// holds at most `target` stories. Item failures drop the item.
pub(crate) async fn fetch_concurrent(
    source: &ItemSource,
    ids: &[ItemId],
    target: usize,
    use_cache: bool,
    plan: WindowPlan,
) -> Vec<Story> {
    let ranked = rank_ids(ids);
    let mut stories: Vec<Story> = Vec::with_capacity(target.min(ids.len()));
    let mut cursor = 0;
    let mut window_index = 0usize;

    while stories.len() < target && cursor < ranked.len() {
        let shortfall = target - stories.len();
        let len = plan.window_len(shortfall, ranked.len() - cursor);
        let window = &ranked[cursor..cursor + len];

        debug!(
            window = window_index,
            start = cursor,
            size = len,
            shortfall,
            "Dispatching fetch window"
        );

        let results = fetch_window(source, window, use_cache).await;
        let found = collect_qualifying(results);

        debug!(
            window = window_index,
            qualifying = found.len(),
            "Fetch window joined"
        );

        stories.extend(found);
        cursor += len;
        window_index += 1;
    }

    // The last window may overshoot when the unbounded strategy is in use
    stories.truncate(target);
    stories
}

/// Spawn one fetch task per identifier and wait for all of them.
///
/// Results come back sorted by rank. A panicked task is logged and dropped,
/// which is indistinguishable from a failed fetch for the caller.
pub(crate) async fn fetch_window(
    source: &ItemSource,
    window: &[RankedId],
    use_cache: bool,
) -> Vec<FetchResult> {
    let mut tasks = JoinSet::new();
    for &RankedId { id, rank } in window {
        let source = source.clone();
        tasks.spawn(async move {
            debug!(item_id = id.0, rank, "Fetching item");
            let outcome = source.fetch_item(id, use_cache).await;
            debug!(item_id = id.0, rank, ok = outcome.is_ok(), "Fetched item");
            FetchResult { rank, id, outcome }
        });
    }

    let mut results = Vec::with_capacity(window.len());
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(result) => results.push(result),
            Err(e) => warn!(error = %e, "Item fetch task panicked"),
        }
    }

    results.sort_by_key(|r| r.rank);
    results
}

/// Drop failures and non-qualifying items, preserving the input order
pub(crate) fn collect_qualifying(results: Vec<FetchResult>) -> Vec<Story> {
    results
        .into_iter()
        .filter_map(|FetchResult { rank, id, outcome }| match outcome {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(item_id = id.0, rank, error = %e, "Skipping item that failed to fetch");
                None
            }
        })
        .filter(is_qualifying)
        .map(Story::from)
        .collect()
}
