//! Feed handlers: one route per fetch mode, plus a mode-by-name route.

use super::{FeedQuery, FeedResponse};
use crate::api::AppState;
use crate::error::{Error, Result};
use crate::types::FetchMode;
use axum::{
    Json,
    extract::{Path, Query, State},
};

async fn render_feed(
    state: &AppState,
    mode: FetchMode,
    query: FeedQuery,
) -> Result<Json<FeedResponse>> {
    let limit = query.limit.unwrap_or(state.feeds.config().limit);
    let feed = state.feeds.get_feed(mode, limit).await?;
    Ok(Json(feed.into()))
}

/// GET /feed - Sequential fetch
#[utoipa::path(
    get,
    path = "/feed",
    tag = "feed",
    params(FeedQuery),
    responses(
        (status = 200, description = "Top link stories in rank order", body = FeedResponse),
        (status = 400, description = "Invalid limit", body = crate::error::ApiError),
        (status = 502, description = "Ranked list could not be fetched", body = crate::error::ApiError)
    )
)]
pub async fn feed_sequential(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<FeedResponse>> {
    render_feed(&state, FetchMode::Sequential, query).await
}

/// GET /feedc - Concurrent fetch, bypassing the cache
#[utoipa::path(
    get,
    path = "/feedc",
    tag = "feed",
    params(FeedQuery),
    responses(
        (status = 200, description = "Top link stories in rank order", body = FeedResponse),
        (status = 400, description = "Invalid limit", body = crate::error::ApiError),
        (status = 502, description = "Ranked list could not be fetched", body = crate::error::ApiError)
    )
)]
pub async fn feed_concurrent(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<FeedResponse>> {
    render_feed(&state, FetchMode::Concurrent, query).await
}

/// GET /feedcc - Concurrent fetch through the lookup cache
#[utoipa::path(
    get,
    path = "/feedcc",
    tag = "feed",
    params(FeedQuery),
    responses(
        (status = 200, description = "Top link stories in rank order", body = FeedResponse),
        (status = 400, description = "Invalid limit", body = crate::error::ApiError),
        (status = 502, description = "Ranked list could not be fetched", body = crate::error::ApiError)
    )
)]
pub async fn feed_concurrent_cached(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<FeedResponse>> {
    render_feed(&state, FetchMode::ConcurrentWithCache, query).await
}

/// GET /feed/:mode - Fetch with the named mode
#[utoipa::path(
    get,
    path = "/feed/{mode}",
    tag = "feed",
    params(
        ("mode" = FetchMode, Path, description = "sequential, concurrent or concurrent_with_cache"),
        FeedQuery
    ),
    responses(
        (status = 200, description = "Top link stories in rank order", body = FeedResponse),
        (status = 400, description = "Unknown mode or invalid limit", body = crate::error::ApiError),
        (status = 502, description = "Ranked list could not be fetched", body = crate::error::ApiError)
    )
)]
pub async fn feed_by_mode(
    State(state): State<AppState>,
    Path(mode): Path<String>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<FeedResponse>> {
    let mode: FetchMode = mode.parse().map_err(Error::Validation)?;
    render_feed(&state, mode, query).await
}
