use super::*;
use crate::cache::ItemCache;
use crate::config::FeedConfig;
use crate::feed::test_helpers::{MockProvider, comment, link_story, text_story};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::time::Duration;
use tower::ServiceExt;


/// Helper to build a router over an in-memory provider
fn create_test_app(provider: Arc<MockProvider>, config: Config) -> (Router, Arc<FeedService>) {
    let feeds = Arc::new(FeedService::with_provider(
        provider,
        Arc::new(ItemCache::new()),
        config.feed.clone(),
    ));
    let app = create_router(Arc::clone(&feeds), Arc::new(config));
    (app, feeds)
}

/// Ranking used by most API tests: link stories at 1, 3, 5, 6
fn sample_provider() -> Arc<MockProvider> {
    Arc::new(MockProvider::new(vec![
        link_story(1),
        comment(2),
        link_story(3),
        text_story(4),
        link_story(5),
        link_story(6),
    ]))
}

async fn get(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}

fn story_ids(json: &serde_json::Value) -> Vec<u64> {
    json["stories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_u64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_api_server_spawns_and_shuts_down() {
    let mut config = Config::default();
    config.server.api.bind_address = "127.0.0.1:0".parse().unwrap(); // Port 0 = OS assigns a free port
    let config = Arc::new(config);
    let feeds = Arc::new(FeedService::with_provider(
        sample_provider(),
        Arc::new(ItemCache::new()),
        FeedConfig::default(),
    ));

    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    let handle = tokio::spawn(start_api_server_with_shutdown(feeds, config, async {
        rx.await.ok();
    }));

    tokio::time::sleep(Duration::from_millis(100)).await;
    tx.send(()).unwrap();

    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server should stop after shutdown signal")
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_bind_failure_is_io_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let mut config = Config::default();
    config.server.api.bind_address = listener.local_addr().unwrap();
    let feeds = Arc::new(FeedService::with_provider(
        sample_provider(),
        Arc::new(ItemCache::new()),
        FeedConfig::default(),
    ));

    let result = start_api_server(feeds, Arc::new(config)).await;
    assert!(matches!(result, Err(crate::error::Error::Io(_))));
}

#[tokio::test]
async fn test_cors_enabled() {
    let mut config = Config::default();
    config.server.api.cors_enabled = true;
    config.server.api.cors_origins = vec!["*".to_string()];
    let (app, _) = create_test_app(sample_provider(), config);

    let request = Request::builder()
        .uri("/health")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .contains_key("access-control-allow-origin"),
        "CORS header should be present when CORS is enabled"
    );
}

#[tokio::test]
async fn test_cors_disabled() {
    let mut config = Config::default();
    config.server.api.cors_enabled = false;
    let (app, _) = create_test_app(sample_provider(), config);

    let request = Request::builder()
        .uri("/health")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        !response
            .headers()
            .contains_key("access-control-allow-origin")
    );
}

#[tokio::test]
async fn test_cors_specific_origin() {
    let mut config = Config::default();
    config.server.api.cors_origins = vec!["http://allowed.example".to_string()];
    let (app, _) = create_test_app(sample_provider(), config);

    let request = Request::builder()
        .uri("/health")
        .header("Origin", "http://allowed.example")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "http://allowed.example"
    );
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (app, _) = create_test_app(sample_provider(), Config::default());
    let (status, _) = get(app, "/downloads").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
