//! Shared test helpers: an in-memory item provider with injectable delays,
//! failures and panics, plus item builders.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::hn_client::ItemProvider;
use crate::types::{Item, ItemId, ItemKind};

fn base_item(id: u64, kind: ItemKind) -> Item {
    Item {
        id: ItemId(id),
        kind,
        by: "pg".to_string(),
        title: format!("item {id}"),
        url: None,
        text: None,
        score: id as i64,
        descendants: 0,
        time: 1_700_000_000 + id as i64,
        kids: Vec::new(),
        deleted: false,
        dead: false,
    }
}

/// A story with an external link (qualifies)
pub(crate) fn link_story(id: u64) -> Item {
    let mut item = base_item(id, ItemKind::Story);
    item.url = Some(format!("https://www.example.com/{id}"));
    item
}

/// A text-only story such as an Ask HN (does not qualify)
pub(crate) fn text_story(id: u64) -> Item {
    let mut item = base_item(id, ItemKind::Story);
    item.text = Some("What are you working on?".to_string());
    item
}

/// A job posting with a link (does not qualify)
pub(crate) fn job(id: u64) -> Item {
    let mut item = base_item(id, ItemKind::Job);
    item.url = Some(format!("https://jobs.example.com/{id}"));
    item
}

/// A comment (does not qualify)
pub(crate) fn comment(id: u64) -> Item {
    let mut item = base_item(id, ItemKind::Comment);
    item.text = Some("nice".to_string());
    item
}

/// Wrap raw numbers as identifiers
pub(crate) fn ids(raw: &[u64]) -> Vec<ItemId> {
    raw.iter().copied().map(ItemId).collect()
}

/// In-memory [`ItemProvider`] recording every fetch
pub(crate) struct MockProvider {
    ranked: Vec<ItemId>,
    items: HashMap<ItemId, Item>,
    delays: HashMap<ItemId, Duration>,
    default_delay: Duration,
    failing: HashSet<ItemId>,
    panicking: HashSet<ItemId>,
    ranked_list_fails: bool,
    fetches: Mutex<HashMap<ItemId, usize>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockProvider {
    /// Serve `items`, ranked in the order given
    pub(crate) fn new(items: Vec<Item>) -> Self {
        Self {
            ranked: items.iter().map(|i| i.id).collect(),
            items: items.into_iter().map(|i| (i.id, i)).collect(),
            delays: HashMap::new(),
            default_delay: Duration::ZERO,
            failing: HashSet::new(),
            panicking: HashSet::new(),
            ranked_list_fails: false,
            fetches: Mutex::new(HashMap::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Override the ranked sequence (may reference unknown ids)
    pub(crate) fn with_ranked(mut self, ranked: Vec<ItemId>) -> Self {
        self.ranked = ranked;
        self
    }

    /// Delay the fetch of one item
    pub(crate) fn with_delay(mut self, id: u64, millis: u64) -> Self {
        self.delays.insert(ItemId(id), Duration::from_millis(millis));
        self
    }

    /// Delay every fetch without an explicit delay
    pub(crate) fn with_default_delay(mut self, millis: u64) -> Self {
        self.default_delay = Duration::from_millis(millis);
        self
    }

    /// Fail fetches of these items
    pub(crate) fn failing(mut self, raw: &[u64]) -> Self {
        self.failing.extend(raw.iter().copied().map(ItemId));
        self
    }

    /// Panic inside fetches of these items
    pub(crate) fn panicking(mut self, raw: &[u64]) -> Self {
        self.panicking.extend(raw.iter().copied().map(ItemId));
        self
    }

    /// Fail the ranked-list fetch
    pub(crate) fn failing_ranked_list(mut self) -> Self {
        self.ranked_list_fails = true;
        self
    }

    /// The ranked sequence this provider serves
    pub(crate) fn ranked(&self) -> Vec<ItemId> {
        self.ranked.clone()
    }

    /// Number of item fetches that reached this provider for `id`
    pub(crate) fn fetch_count(&self, id: ItemId) -> usize {
        self.fetches.lock().unwrap().get(&id).copied().unwrap_or(0)
    }

    /// Number of item fetches that reached this provider overall
    pub(crate) fn total_fetches(&self) -> usize {
        self.fetches.lock().unwrap().values().sum()
    }

    /// Highest number of item fetches observed running at once
    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ItemProvider for MockProvider {
    async fn ranked_ids(&self) -> Result<Vec<ItemId>> {
        if self.ranked_list_fails {
            return Err(Error::UpstreamStatus {
                status: 503,
                url: "mock://topstories.json".to_string(),
            });
        }
        Ok(self.ranked.clone())
    }

    async fn item(&self, id: ItemId) -> Result<Item> {
        *self.fetches.lock().unwrap().entry(id).or_insert(0) += 1;
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let delay = self.delays.get(&id).copied().unwrap_or(self.default_delay);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        } else {
            tokio::task::yield_now().await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.panicking.contains(&id) {
            panic!("injected panic fetching item {id}");
        }
        if self.failing.contains(&id) {
            return Err(Error::UpstreamStatus {
                status: 500,
                url: format!("mock://item/{id}.json"),
            });
        }
        self.items.get(&id).cloned().ok_or(Error::ItemNotFound(id))
    }
}
