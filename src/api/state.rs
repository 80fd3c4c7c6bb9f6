//! Application state for the API server

use crate::{Config, FeedService};
use std::sync::Arc;

/// Shared application state accessible to all route handlers
///
/// Cloned for each request (cheap Arc clone).
#[derive(Clone)]
pub struct AppState {
    /// Feed assembly service (owns the process-wide lookup cache)
    pub feeds: Arc<FeedService>,

    /// Configuration (read-only at runtime)
    pub config: Arc<Config>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(feeds: Arc<FeedService>, config: Arc<Config>) -> Self {
        Self { feeds, config }
    }
}
