//! Configuration types for hn-feed

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, path::Path, time::Duration};
use utoipa::ToSchema;

/// Default upstream endpoint (Hacker News Firebase API, v0)
pub const DEFAULT_HN_ENDPOINT: &str = "https://hacker-news.firebaseio.com/v0";

/// Upstream item API configuration
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct HnConfig {
    /// Base URL of the item API (default: the public Hacker News endpoint)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-request timeout in seconds (default: 30)
    #[serde(default = "default_request_timeout", with = "duration_serde")]
    #[schema(value_type = u64)]
    pub request_timeout: Duration,

    /// User-Agent sent with every upstream request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HnConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            request_timeout: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// How the concurrent modes slice the ranked sequence into windows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FetchStrategy {
    /// Each window covers the current shortfall; a barrier separates windows (default)
    #[default]
    Windowed,
    /// A single window spanning the entire remaining sequence
    Unbounded,
}

impl std::str::FromStr for FetchStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "windowed" => Ok(FetchStrategy::Windowed),
            "unbounded" => Ok(FetchStrategy::Unbounded),
            other => Err(format!("unknown fetch strategy: {other}")),
        }
    }
}

/// Feed assembly configuration
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct FeedConfig {
    /// Number of stories a feed holds unless a request overrides it (default: 5)
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Window strategy for the concurrent modes
    #[serde(default)]
    pub strategy: FetchStrategy,

    /// Upper bound on a single window under the windowed strategy (None = shortfall only)
    #[serde(default)]
    pub max_window: Option<usize>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            strategy: FetchStrategy::default(),
            max_window: None,
        }
    }
}

/// REST API configuration
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiConfig {
    /// Address to bind to (default: 127.0.0.1:8080)
    #[serde(default = "default_bind_address")]
    #[schema(value_type = String)]
    pub bind_address: SocketAddr,

    /// Enable CORS for browser access (default: true)
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Allowed CORS origins (default: ["*"])
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            cors_enabled: true,
            cors_origins: default_cors_origins(),
        }
    }
}

/// API server integration configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct ServerIntegrationConfig {
    /// REST API configuration
    #[serde(default)]
    pub api: ApiConfig,
}

/// Main configuration for hn-feed
///
/// Every field has a default, so `{}` is a valid configuration file.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct Config {
    /// Upstream API settings
    #[serde(default)]
    pub hn: HnConfig,

    /// Feed assembly settings
    #[serde(default)]
    pub feed: FeedConfig,

    /// API server settings
    #[serde(default)]
    pub server: ServerIntegrationConfig,
}

impl Config {
    /// Load a configuration from a JSON file and validate it
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&raw).map_err(|e| Error::Config {
            message: format!("failed to parse {}: {}", path.display(), e),
            key: None,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the feed service cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.hn.endpoint.trim().is_empty() {
            return Err(Error::Config {
                message: "endpoint must not be empty".to_string(),
                key: Some("hn.endpoint".to_string()),
            });
        }
        if self.feed.limit == 0 {
            return Err(Error::Config {
                message: "limit must be at least 1".to_string(),
                key: Some("feed.limit".to_string()),
            });
        }
        if self.feed.max_window == Some(0) {
            return Err(Error::Config {
                message: "max_window must be at least 1 when set".to_string(),
                key: Some("feed.max_window".to_string()),
            });
        }
        Ok(())
    }
}

fn default_endpoint() -> String {
    DEFAULT_HN_ENDPOINT.to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_user_agent() -> String {
    concat!("hn-feed/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_limit() -> usize {
    5
}

fn default_true() -> bool {
    true
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

// Duration serialization helper
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
