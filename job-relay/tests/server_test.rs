//! HTTP tests for `/webhook` and `/worker`, driving the router with `tower::ServiceExt::oneshot`.

mod common;

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use common::{body, channel_post, photo_post, temp_repo, worker, RecordingGateway, UnavailableStore};
use job_relay::{build_router, AppState, IngestionEndpoint};
use storage::{MessageKey, MessageStore};
use tower::ServiceExt;

fn router(store: Arc<dyn MessageStore>, gateway: Arc<RecordingGateway>) -> Router {
    let state = AppState::new(
        Arc::new(IngestionEndpoint::new(store.clone())),
        Arc::new(worker(store, gateway)),
    );
    build_router(state)
}

async fn call(app: Router, method: Method, uri: &str, payload: Vec<u8>) -> (StatusCode, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_webhook_post_stores_channel_post() {
    let (_dir, repo) = temp_repo().await;
    let app = router(repo.clone(), Arc::new(RecordingGateway::new()));

    let update = channel_post(-1001, "Jobs", 12, "Rust developer, 2025 batch");
    let (status, _) = call(app, Method::POST, "/webhook", body(&update)).await;

    assert_eq!(status, StatusCode::OK);
    let record = repo.get(&MessageKey::new(-1001, 12)).await.unwrap().unwrap();
    assert_eq!(record.channel_name, "Jobs");
    assert_eq!(record.message_text, "Rust developer, 2025 batch");
    assert!(!record.is_processed);
}

#[tokio::test]
async fn test_webhook_get_is_acknowledged_without_storing() {
    let (_dir, repo) = temp_repo().await;
    let app = router(repo.clone(), Arc::new(RecordingGateway::new()));

    let (status, _) = call(app, Method::GET, "/webhook", Vec::new()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(repo.stats().await.unwrap().total_messages, 0);
}

/// **Test: Undecodable and empty updates are acknowledged and dropped**
///
/// **Setup:** Bodies that are not JSON, lack both post fields, or carry a post with no content.
///
/// **Action:** POST each to `/webhook`.
///
/// **Expected:** 200 for every request; the store stays empty.
#[tokio::test]
async fn test_webhook_drops_unusable_updates_with_ok() {
    let (_dir, repo) = temp_repo().await;
    let app = router(repo.clone(), Arc::new(RecordingGateway::new()));

    let no_content = serde_json::json!({
        "update_id": 3,
        "channel_post": {
            "message_id": 3,
            "date": 1_735_689_600,
            "chat": {"id": -1001, "title": "Jobs", "type": "channel"}
        }
    });
    let payloads = vec![
        b"not json".to_vec(),
        br#"{"update_id": 2}"#.to_vec(),
        body(&no_content),
    ];

    for payload in payloads {
        let (status, _) = call(app.clone(), Method::POST, "/webhook", payload).await;
        assert_eq!(status, StatusCode::OK);
    }
    assert_eq!(repo.stats().await.unwrap().total_messages, 0);
}

/// **Test: An oversized update is acknowledged and dropped**
///
/// **Setup:** A `channel_post` whose text pushes the body past the 2 MB extractor limit.
///
/// **Action:** POST it to `/webhook`.
///
/// **Expected:** 200; nothing is stored.
#[tokio::test]
async fn test_webhook_oversized_body_still_ok() {
    let (_dir, repo) = temp_repo().await;
    let app = router(repo.clone(), Arc::new(RecordingGateway::new()));

    let huge_text = "x".repeat(3 * 1024 * 1024);
    let update = channel_post(-1001, "Jobs", 77, &huge_text);
    let (status, _) = call(app, Method::POST, "/webhook", body(&update)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(repo.stats().await.unwrap().total_messages, 0);
}

#[tokio::test]
async fn test_webhook_store_failure_still_ok() {
    let app = router(Arc::new(UnavailableStore), Arc::new(RecordingGateway::new()));

    let update = channel_post(-1001, "Jobs", 1, "Backend role");
    let (status, _) = call(app, Method::POST, "/webhook", body(&update)).await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_webhook_photo_with_caption_stored_with_empty_text() {
    let (_dir, repo) = temp_repo().await;
    let app = router(repo.clone(), Arc::new(RecordingGateway::new()));

    let (status, _) = call(app, Method::POST, "/webhook", body(&photo_post(-1009, 5, "Poster"))).await;

    assert_eq!(status, StatusCode::OK);
    let record = repo.get(&MessageKey::new(-1009, 5)).await.unwrap().unwrap();
    assert_eq!(record.message_text, "");
}

#[tokio::test]
async fn test_worker_get_reports_alive() {
    let (_dir, repo) = temp_repo().await;
    let gateway = Arc::new(RecordingGateway::new());
    let app = router(repo.clone(), gateway.clone());

    let update = channel_post(-1001, "Jobs", 1, "Backend role");
    call(app.clone(), Method::POST, "/webhook", body(&update)).await;
    let (status, text) = call(app, Method::GET, "/worker", Vec::new()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(text, "worker alive");
    assert_eq!(gateway.sent_count(), 0);
    assert_eq!(repo.stats().await.unwrap().unprocessed_messages, 1);
}

/// **Test: POST /worker runs a pass**
///
/// **Setup:** One relevant post delivered through `/webhook`.
///
/// **Action:** POST `/worker`.
///
/// **Expected:** 200 "processed"; the post was sent and marked forwarded.
#[tokio::test]
async fn test_worker_post_processes_batch() {
    let (_dir, repo) = temp_repo().await;
    let gateway = Arc::new(RecordingGateway::new());
    let app = router(repo.clone(), gateway.clone());

    let update = channel_post(-1001, "Jobs", 1, "Backend engineer role, apply now, 2025 batch");
    call(app.clone(), Method::POST, "/webhook", body(&update)).await;
    let (status, text) = call(app, Method::POST, "/worker", Vec::new()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(text, "processed");
    assert_eq!(gateway.sent_count(), 1);
    assert!(repo.get(&MessageKey::new(-1001, 1)).await.unwrap().unwrap().is_forwarded);
}

#[tokio::test]
async fn test_worker_other_methods_not_allowed() {
    let (_dir, repo) = temp_repo().await;
    let app = router(repo, Arc::new(RecordingGateway::new()));

    for method in [Method::PUT, Method::DELETE] {
        let (status, text) = call(app.clone(), method, "/worker", Vec::new()).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(text, "method not allowed");
    }
}

#[tokio::test]
async fn test_worker_fetch_failure_is_server_error() {
    let app = router(Arc::new(UnavailableStore), Arc::new(RecordingGateway::new()));

    let (status, text) = call(app, Method::POST, "/worker", Vec::new()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(text, "failed to fetch");
}
