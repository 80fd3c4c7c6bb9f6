//! Core types for hn-feed

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use utoipa::ToSchema;

use crate::error::Result;

/// Upstream identifier of a Hacker News item
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl ItemId {
    /// Create a new ItemId
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the inner u64 value
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ItemId> for u64 {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ItemId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// An identifier together with its zero-based position in the upstream ranking
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RankedId {
    /// The item identifier
    pub id: ItemId,
    /// Position in the ranked sequence (unique and dense over the fetched prefix)
    pub rank: usize,
}

/// Attach rank positions to an ordered identifier sequence
pub fn rank_ids(ids: &[ItemId]) -> Vec<RankedId> {
    ids.iter()
        .enumerate()
        .map(|(rank, &id)| RankedId { id, rank })
        .collect()
}

/// Kind of a Hacker News item
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A submitted story (link or text post)
    Story,
    /// A comment on another item
    Comment,
    /// A job posting
    Job,
    /// A poll
    Poll,
    /// One option of a poll
    #[serde(rename = "pollopt")]
    PollOpt,
    /// Any kind this crate does not recognize
    #[default]
    #[serde(other)]
    Unknown,
}

/// A full item record as published by the upstream API
///
/// Upstream omits fields freely (deleted items carry little more than an id),
/// so everything except the id falls back to an empty default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    /// Item identifier
    pub id: ItemId,

    /// Item kind
    #[serde(rename = "type", default)]
    pub kind: ItemKind,

    /// Author username
    #[serde(default)]
    pub by: String,

    /// Title (stories, jobs, polls)
    #[serde(default)]
    pub title: String,

    /// External link; only one of `url` and `text` is populated for stories
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// HTML text body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Score (votes)
    #[serde(default)]
    pub score: i64,

    /// Total comment count
    #[serde(default)]
    pub descendants: i64,

    /// Creation time as Unix seconds
    #[serde(default)]
    pub time: i64,

    /// Direct child identifiers in ranked display order
    #[serde(default)]
    pub kids: Vec<ItemId>,

    /// Item was deleted
    #[serde(default)]
    pub deleted: bool,

    /// Item was flagged dead
    #[serde(default)]
    pub dead: bool,
}

impl Item {
    /// Creation time as a UTC timestamp, if representable
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.time, 0)
    }
}

/// A qualifying story ready for rendering
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct Story {
    /// The underlying item
    #[serde(flatten)]
    pub item: Item,

    /// Hostname of the story URL without a leading `www.` (empty if unparseable)
    pub host: String,
}

impl From<Item> for Story {
    fn from(item: Item) -> Self {
        let host = item
            .url
            .as_deref()
            .and_then(|u| url::Url::parse(u).ok())
            .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.").to_string()))
            .unwrap_or_default();
        Self { item, host }
    }
}

/// Outcome of one parallel item fetch, tagged with the identifier's original rank
#[derive(Debug)]
pub struct FetchResult {
    /// Position of the identifier in the ranked sequence
    pub rank: usize,
    /// The identifier that was fetched
    pub id: ItemId,
    /// The fetched item, or the failure
    pub outcome: Result<Item>,
}

/// Fetch strategy and cache policy for assembling a feed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FetchMode {
    /// One fetch at a time, in rank order, never reading the cache
    #[default]
    Sequential,
    /// Windowed parallel fetch, never reading the cache
    Concurrent,
    /// Windowed parallel fetch, satisfied from the cache when possible
    ConcurrentWithCache,
}

impl FetchMode {
    /// Whether single-item fetches in this mode may be served from the cache
    pub fn uses_cache(&self) -> bool {
        matches!(self, FetchMode::ConcurrentWithCache)
    }

    /// Stable string form used in URLs and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchMode::Sequential => "sequential",
            FetchMode::Concurrent => "concurrent",
            FetchMode::ConcurrentWithCache => "concurrent_with_cache",
        }
    }
}

impl std::fmt::Display for FetchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FetchMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "sequential" => Ok(FetchMode::Sequential),
            "concurrent" => Ok(FetchMode::Concurrent),
            "concurrent_with_cache" | "concurrent-with-cache" => {
                Ok(FetchMode::ConcurrentWithCache)
            }
            other => Err(format!("unknown fetch mode: {other}")),
        }
    }
}

/// An assembled feed of qualifying stories in ascending rank order
#[derive(Clone, Debug, Serialize)]
pub struct Feed {
    /// Mode used to assemble the feed
    pub mode: FetchMode,

    /// Qualifying stories, at most the requested count
    pub stories: Vec<Story>,

    /// Wall-clock time spent assembling the feed
    #[serde(skip)]
    pub elapsed: Duration,
}

impl Feed {
    /// Number of stories in the feed
    pub fn len(&self) -> usize {
        self.stories.len()
    }

    /// Whether the feed holds no stories
    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    /// Identifiers of the stories, in feed order
    pub fn ids(&self) -> Vec<ItemId> {
        self.stories.iter().map(|s| s.item.id).collect()
    }
}
