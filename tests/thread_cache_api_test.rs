//! Thread cache refreshes against a wiremock backend.

mod common;

use std::time::Duration;

use common::{thread_state_body, TestContextBuilder};
use superego::models::ThreadStatus;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_concurrent_refresh_single_backend_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/threads/thread-42/state"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(thread_state_body("busy", "first"))
                .set_delay(Duration::from_millis(150)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let ctx = TestContextBuilder::new(&server.uri()).build();
    let cache = ctx.thread_cache();
    let (a, b) = tokio::join!(cache.refresh("thread-42"), cache.refresh("thread-42"));

    let a = a.unwrap();
    assert_eq!(a, b.unwrap());
    assert_eq!(a.status, ThreadStatus::Busy);
    assert_eq!(cache.get("thread-42"), Some(a));
    assert!(ctx.known_threads().contains("thread-42"));
}

#[tokio::test]
async fn test_sequential_refreshes_fetch_again() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/threads/t-1/state"))
        .respond_with(ResponseTemplate::new(200).set_body_json(thread_state_body("idle", "x")))
        .expect(2)
        .mount(&server)
        .await;

    let ctx = TestContextBuilder::new(&server.uri()).build();
    ctx.thread_cache().refresh("t-1").await.unwrap();
    ctx.thread_cache().refresh("t-1").await.unwrap();
}

#[tokio::test]
async fn test_refresh_not_found_leaves_cache_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/threads/missing/state"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({"detail": "Thread not found"})))
        .mount(&server)
        .await;

    let ctx = TestContextBuilder::new(&server.uri()).build();
    let err = ctx.thread_cache().refresh("missing").await.unwrap_err();

    assert_eq!(err.to_string(), "HTTP error! Status: 404 - Thread not found");
    assert!(ctx.thread_cache().get("missing").is_none());
    assert!(!ctx.known_threads().contains("missing"));
}

#[tokio::test]
async fn test_unknown_status_tolerated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/threads/t-2/state"))
        .respond_with(ResponseTemplate::new(200).set_body_json(thread_state_body("paused", "y")))
        .mount(&server)
        .await;

    let ctx = TestContextBuilder::new(&server.uri()).build();
    let data = ctx.thread_cache().refresh("t-2").await.unwrap();
    assert_eq!(data.status, ThreadStatus::Unknown);
    assert_eq!(data.values["marker"], "y");
}
