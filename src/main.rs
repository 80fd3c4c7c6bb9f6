//! hn-feed server binary
//!
//! Loads configuration, applies command-line overrides and serves the feed
//! API until SIGINT or SIGTERM.

use clap::Parser;
use hn_feed::{Config, FeedService, FetchStrategy, run_with_shutdown};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Serve the top Hacker News link stories over HTTP
#[derive(Parser, Debug)]
#[command(name = "hn-feed")]
#[command(version)]
#[command(about = "Serve the top Hacker News link stories", long_about = None)]
struct Cli {
    /// JSON configuration file (defaults apply when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of stories per feed
    #[arg(short, long)]
    limit: Option<usize>,

    /// Address to listen on, e.g. 127.0.0.1:8080
    #[arg(short, long)]
    bind: Option<SocketAddr>,

    /// Base URL of the Hacker News API
    #[arg(long)]
    endpoint: Option<String>,

    /// Window sizing for concurrent fetches: windowed or unbounded
    #[arg(long)]
    batch_strategy: Option<FetchStrategy>,

    /// Upper bound on parallel fetches per window
    #[arg(long)]
    max_window: Option<usize>,
}

impl Cli {
    fn into_config(self) -> hn_feed::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_json_file(path)?,
            None => Config::default(),
        };

        if let Some(limit) = self.limit {
            config.feed.limit = limit;
        }
        if let Some(bind) = self.bind {
            config.server.api.bind_address = bind;
        }
        if let Some(endpoint) = self.endpoint {
            config.hn.endpoint = endpoint;
        }
        if let Some(strategy) = self.batch_strategy {
            config.feed.strategy = strategy;
        }
        if self.max_window.is_some() {
            config.feed.max_window = self.max_window;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Arc::new(Cli::parse().into_config()?);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        endpoint = %config.hn.endpoint,
        limit = config.feed.limit,
        strategy = ?config.feed.strategy,
        "hn-feed starting"
    );

    let feeds = Arc::new(FeedService::new(&config)?);
    run_with_shutdown(feeds, config).await?;

    Ok(())
}
