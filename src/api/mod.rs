//! REST API server module
//!
//! Serves assembled feeds as JSON, one route per fetch mode.

use crate::{Config, FeedService, Result};
use axum::{Router, http::HeaderValue, routing::get};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod error_response;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use state::AppState;

/// Create the API router with all route definitions
///
/// # Routes
///
/// ## Feeds
/// - `GET /feed` - Sequential fetch, no cache
/// - `GET /feedc` - Concurrent fetch, no cache
/// - `GET /feedcc` - Concurrent fetch through the lookup cache
/// - `GET /feed/:mode` - Fetch with the named mode
///
/// All feed routes accept `?limit=N` to override the configured story count.
///
/// ## System
/// - `GET /hi` - Greeting
/// - `GET /health` - Health check
/// - `GET /config` - Current configuration
/// - `GET /openapi.json` - OpenAPI specification
pub fn create_router(feeds: Arc<FeedService>, config: Arc<Config>) -> Router {
    let state = AppState::new(feeds, config.clone());

    let router = Router::new()
        // Feeds
        .route("/feed", get(routes::feed_sequential))
        .route("/feedc", get(routes::feed_concurrent))
        .route("/feedcc", get(routes::feed_concurrent_cached))
        .route("/feed/:mode", get(routes::feed_by_mode))
        // System
        .route("/hi", get(routes::hi))
        .route("/health", get(routes::health_check))
        .route("/config", get(routes::get_config))
        .route("/openapi.json", get(routes::openapi_spec))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if config.server.api.cors_enabled {
        let cors = build_cors_layer(&config.server.api.cors_origins);
        router.layer(cors)
    } else {
        router
    }
}

/// Build a CORS layer based on configured origins ("*" allows any origin)
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let allow_any = origins.iter().any(|o| o == "*");

    if allow_any || origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Start the API server on the configured bind address.
///
/// Runs until the server fails; see [`start_api_server_with_shutdown`] for a
/// graceful variant.
///
/// # Example
///
/// ```no_run
/// use hn_feed::{Config, FeedService};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Arc::new(Config::default());
/// let feeds = Arc::new(FeedService::new(&config)?);
///
/// // Start API server (blocks until shutdown)
/// hn_feed::api::start_api_server(feeds, config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_api_server(feeds: Arc<FeedService>, config: Arc<Config>) -> Result<()> {
    start_api_server_with_shutdown(feeds, config, std::future::pending()).await
}

/// Start the API server and stop accepting connections once `shutdown` resolves.
pub async fn start_api_server_with_shutdown<F>(
    feeds: Arc<FeedService>,
    config: Arc<Config>,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let bind_address = config.server.api.bind_address;

    tracing::info!(address = %bind_address, "Starting API server");

    let app = create_router(feeds, config);

    let listener = TcpListener::bind(bind_address)
        .await
        .map_err(crate::error::Error::Io)?;

    tracing::info!(
        address = %listener.local_addr().unwrap_or(bind_address),
        "API server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| crate::error::Error::ApiServerError(e.to_string()))?;

    tracing::info!("API server stopped");
    Ok(())
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;
