//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use playground_core::clock::Clock;
use playground_test_support::FixedClock;
use tower::ServiceExt;

use playground_api::config::ApiConfig;
use playground_api::routes;
use playground_api::state::AppState;

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// Fresh application state with default configuration and a fixed clock.
pub fn test_state() -> AppState {
    test_state_with(ApiConfig::default())
}

/// Fresh application state with the given configuration.
pub fn test_state_with(config: ApiConfig) -> AppState {
    AppState::new(fixed_clock(), config)
}

/// Build the full app router over `state`. Uses the same route structure as
/// `main.rs`. Sessions live in `state`, so routers built from clones of the
/// same state see the same sessions.
pub fn build_test_app(state: AppState) -> Router {
    routes::api_router().with_state(state)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

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

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
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

/// Send a POST request without a body and return the response.
pub async fn post_empty(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, empty_request("POST", uri)).await
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
    send(app, empty_request("GET", uri)).await
}

/// Send a DELETE request and return the response.
pub async fn delete_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, empty_request("DELETE", uri)).await
}

/// Mount a session and return its id.
pub async fn mount_session(state: &AppState, body: &serde_json::Value) -> String {
    let (status, json) = post_json(build_test_app(state.clone()), "/api/v1/sessions", body).await;
    assert_eq!(status, StatusCode::OK, "mount failed: {json}");
    json["session_id"].as_str().unwrap().to_owned()
}
