//! OpenAPI documentation and schema generation
//!
//! Served as JSON at `/openapi.json`.

use utoipa::OpenApi;

/// OpenAPI documentation for the hn-feed REST API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "hn-feed REST API",
        description = "Top Hacker News link stories, assembled sequentially or concurrently",
        license(
            name = "MIT OR Apache-2.0"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        // Feeds
        crate::api::routes::feed_sequential,
        crate::api::routes::feed_concurrent,
        crate::api::routes::feed_concurrent_cached,
        crate::api::routes::feed_by_mode,

        // System
        crate::api::routes::hi,
        crate::api::routes::health_check,
        crate::api::routes::get_config,
        crate::api::routes::openapi_spec,
    ),
    components(
        schemas(
            crate::api::routes::FeedResponse,
            crate::types::Story,
            crate::types::Item,
            crate::types::ItemId,
            crate::types::ItemKind,
            crate::types::FetchMode,
            crate::config::Config,
            crate::config::HnConfig,
            crate::config::FeedConfig,
            crate::config::FetchStrategy,
            crate::config::ServerIntegrationConfig,
            crate::config::ApiConfig,
            crate::error::ApiError,
            crate::error::ErrorDetail,
        )
    ),
    tags(
        (name = "feed", description = "Feed assembly"),
        (name = "system", description = "Health, configuration and documentation")
    )
)]
pub struct ApiDoc;
