//! Route handlers for the REST API
//!
//! Handlers are organized by domain:
//! - [`feed`] - Feed assembly in each fetch mode
//! - [`config`] - Configuration
//! - [`system`] - Greeting, health, OpenAPI

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::types::{Feed, FetchMode, Story};

mod config;
mod feed;
mod system;

// Re-export all handlers so `routes::function_name` continues to work
pub use config::*;
pub use feed::*;
pub use system::*;

// ============================================================================
// Query/Response Types (shared across handlers)
// ============================================================================

/// Query parameters for the feed routes
#[derive(Debug, Default, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FeedQuery {
    /// Number of stories to return (default: the configured limit)
    pub limit: Option<usize>,
}

/// Response body for the feed routes
#[derive(Debug, Serialize, ToSchema)]
pub struct FeedResponse {
    /// Mode the feed was assembled with
    pub mode: FetchMode,
    /// Number of stories returned
    pub count: usize,
    /// Time spent assembling the feed, in milliseconds
    pub elapsed_ms: u64,
    /// Qualifying stories in rank order
    pub stories: Vec<Story>,
}

impl From<Feed> for FeedResponse {
    fn from(feed: Feed) -> Self {
        Self {
            mode: feed.mode,
            count: feed.stories.len(),
            elapsed_ms: u64::try_from(feed.elapsed.as_millis()).unwrap_or(u64::MAX),
            stories: feed.stories,
        }
    }
}
