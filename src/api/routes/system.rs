//! System handlers: greeting, health, OpenAPI.

use axum::{Json, response::IntoResponse};
use serde_json::json;

/// GET /hi - Greeting
#[utoipa::path(
    get,
    path = "/hi",
    tag = "system",
    responses(
        (status = 200, description = "Greeting")
    )
)]
pub async fn hi() -> impl IntoResponse {
    Json(json!({ "message": "hello there!" }))
}

/// GET /health - Health check
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses(
        (status = 200, description = "Service is healthy")
    )
)]
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /openapi.json - OpenAPI specification
#[utoipa::path(
    get,
    path = "/openapi.json",
    tag = "system",
    responses(
        (status = 200, description = "OpenAPI 3 specification in JSON format")
    )
)]
pub async fn openapi_spec() -> impl IntoResponse {
    use crate::api::openapi::ApiDoc;
    use utoipa::OpenApi;

    Json(ApiDoc::openapi())
}
