//! A wiremock stand-in for the Hacker News API

use hn_feed::{Config, FeedService};
use serde_json::{Value, json};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Item JSON for a link story
pub fn link_story(id: u64) -> Value {
    json!({
        "id": id,
        "type": "story",
        "by": "pg",
        "title": format!("Story {id}"),
        "url": format!("https://www.example.com/{id}"),
        "score": 100 + id,
        "descendants": 3,
        "time": 1_700_000_000u64 + id,
        "kids": [id * 10, id * 10 + 1]
    })
}

/// Item JSON for an Ask HN style text post
pub fn ask_story(id: u64) -> Value {
    json!({
        "id": id,
        "type": "story",
        "by": "pg",
        "title": format!("Ask HN: {id}"),
        "text": "What are you working on?",
        "score": 5,
        "time": 1_700_000_000u64 + id
    })
}

/// Item JSON for a job posting
pub fn job(id: u64) -> Value {
    json!({
        "id": id,
        "type": "job",
        "by": "yc",
        "title": format!("Job {id}"),
        "url": format!("https://jobs.example.com/{id}"),
        "time": 1_700_000_000u64 + id
    })
}

/// Serve `ids` as the ranked list
pub async fn mount_ranked(server: &MockServer, ids: &[u64]) {
    Mock::given(method("GET"))
        .and(path("/v0/topstories.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ids))
        .mount(server)
        .await;
}

/// Serve one item, expecting exactly `hits` requests for it when `hits` is set
pub async fn mount_item(server: &MockServer, item: Value, delay_ms: u64, hits: Option<u64>) {
    let id = item["id"].as_u64().unwrap_or_default();
    let mock = Mock::given(method("GET"))
        .and(path(format!("/v0/item/{id}.json")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(item)
                .set_delay(Duration::from_millis(delay_ms)),
        );
    let mock = match hits {
        Some(n) => mock.expect(n),
        None => mock,
    };
    mock.mount(server).await;
}

/// Answer an item request with upstream `null`
pub async fn mount_null_item(server: &MockServer, id: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/v0/item/{id}.json")))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(server)
        .await;
}

/// Answer an item request with an HTTP error
pub async fn mount_failing_item(server: &MockServer, id: u64, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/v0/item/{id}.json")))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Configuration pointing at the mock upstream
pub fn config_for(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.hn.endpoint = format!("{}/v0", server.uri());
    config.hn.request_timeout = Duration::from_secs(5);
    config
}

/// Feed service talking to the mock upstream
pub fn service_for(server: &MockServer) -> FeedService {
    FeedService::new(&config_for(server)).unwrap_or_else(|e| panic!("service: {e}"))
}
