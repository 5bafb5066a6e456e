//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use starbook_conversation::assistant::TemplateAssistant;
use starbook_core::clock::SharedClock;
use starbook_stories::memory_repository::InMemoryStoryRepository;
use starbook_test_support::{FixedClock, fixed_now};
use tower::ServiceExt;

use starbook_api::state::AppState;

/// State backed by a fresh in-memory store and a fixed clock.
pub fn test_state() -> AppState {
    test_state_with_repository(InMemoryStoryRepository::new())
}

/// State backed by `repository`; clones of an `InMemoryStoryRepository`
/// share storage, so a test can keep a handle and inspect it.
pub fn test_state_with_repository(repository: InMemoryStoryRepository) -> AppState {
    let clock: SharedClock = Arc::new(FixedClock(fixed_now()));
    AppState::new(clock, Arc::new(repository), Arc::new(TemplateAssistant))
}

/// Build the full app router, the same way `main.rs` does minus the
/// tracing and CORS layers.
pub fn build_test_app(state: AppState) -> Router {
    starbook_api::router(state)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, json_request("POST", uri, body)).await
}

/// Send a PUT request with a JSON body and return the response.
pub async fn put_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, json_request("PUT", uri, body)).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send a DELETE request and return the response (`Null` body for 204).
pub async fn delete(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}
