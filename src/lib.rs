//! # hn-feed
//!
//! Assembles a feed of the top Hacker News link stories, fetching item
//! records one at a time or in concurrent windows, optionally through a
//! process-wide lookup cache.
//!
//! ## Fetch modes
//!
//! - **Sequential** - one fetch at a time, in rank order
//! - **Concurrent** - windows of parallel fetches, each window sized to the
//!   remaining shortfall, with results put back into rank order
//! - **ConcurrentWithCache** - as concurrent, but items already fetched by an
//!   earlier request are served from memory
//!
//! Every mode yields the same stories for the same upstream data.
//!
//! ## Quick Start
//!
//! ```no_run
//! use hn_feed::{Config, FeedService, FetchMode};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let feeds = FeedService::new(&Config::default())?;
//!
//!     let feed = feeds.get_feed(FetchMode::ConcurrentWithCache, 10).await?;
//!     for story in &feed.stories {
//!         println!("{} ({})", story.item.title, story.host);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// REST API module
pub mod api;
/// Process-wide item lookup cache
pub mod cache;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Feed assembly: filtering, sequential and windowed concurrent fetch
pub mod feed;
/// Hacker News HTTP client
pub mod hn_client;
/// Cache-aware single-item fetch
pub mod source;
/// Core types
pub mod types;

// Re-export commonly used types
pub use cache::ItemCache;
pub use config::{Config, FeedConfig, FetchStrategy, HnConfig};
pub use error::{ApiError, Error, ErrorDetail, Result, ToHttpStatus};
pub use feed::FeedService;
pub use hn_client::{HackerNewsClient, ItemProvider};
pub use source::ItemSource;
pub use types::{Feed, FetchMode, Item, ItemId, ItemKind, Story};

use std::sync::Arc;

/// Helper function to run the API server with graceful signal handling.
///
/// Serves until a termination signal arrives, then stops accepting
/// connections and lets in-flight requests finish.
///
/// - **Unix:** listens for SIGTERM and SIGINT, with fallbacks if signal registration fails.
/// - **Windows/other:** listens for Ctrl+C via `tokio::signal::ctrl_c()`.
///
/// # Example
///
/// ```no_run
/// use hn_feed::{Config, FeedService, run_with_shutdown};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = Arc::new(Config::default());
///     let feeds = Arc::new(FeedService::new(&config)?);
///
///     // Run with automatic signal handling
///     run_with_shutdown(feeds, config).await?;
///
///     Ok(())
/// }
/// ```
pub async fn run_with_shutdown(feeds: Arc<FeedService>, config: Arc<Config>) -> Result<()> {
    api::start_api_server_with_shutdown(feeds, config, wait_for_signal()).await
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    // Set up signal handlers - these may fail in restricted environments (containers, tests)
    let sigterm_result = signal(SignalKind::terminate());
    let sigint_result = signal(SignalKind::interrupt());

    match (sigterm_result, sigint_result) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM signal");
                }
                _ = sigint.recv() => {
                    tracing::info!("Received SIGINT signal (Ctrl+C)");
                }
            }
        }
        (Err(e), _) => {
            tracing::warn!(error = %e, "Could not register SIGTERM handler, waiting for SIGINT only");
            if let Ok(mut sigint) = signal(SignalKind::interrupt()) {
                sigint.recv().await;
                tracing::info!("Received SIGINT signal (Ctrl+C)");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
        (_, Err(e)) => {
            tracing::warn!(error = %e, "Could not register SIGINT handler, waiting for SIGTERM only");
            if let Ok(mut sigterm) = signal(SignalKind::terminate()) {
                sigterm.recv().await;
                tracing::info!("Received SIGTERM signal");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Received Ctrl+C signal");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C signal");
        }
    }
}
