//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use callscribe_core::clock::Clock;
use callscribe_store::sqlite_call_repository::SqliteCallRepository;
use callscribe_test_support::FixedClock;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

use callscribe_api::build_router;
use callscribe_api::state::AppState;

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// Build the full app router with a real `SqliteCallRepository` and a fixed
/// clock. Uses the same route structure as `main.rs`.
pub fn build_test_app(pool: SqlitePool) -> Router {
    let call_repository = Arc::new(SqliteCallRepository::new(pool));
    build_router(AppState::new(fixed_clock(), call_repository))
}

/// Encodes `pairs` as an `application/x-www-form-urlencoded` body.
pub fn form_body(pairs: &[(&str, &str)]) -> String {
    serde_urlencoded::to_string(pairs).unwrap()
}

/// Form fields of a complete transcription callback.
pub fn transcription_fields<'a>(call_sid: &'a str, caller: &'a str) -> Vec<(&'a str, &'a str)> {
    vec![
        ("CallSid", call_sid),
        ("From", caller),
        ("RecordingSid", "RE1"),
        ("RecordingUrl", "https://api.example.com/Recordings/RE1"),
        ("TranscriptionSid", "TR1"),
        ("TranscriptionText", "Hi, it's me. Call me back."),
    ]
}

/// Send a form-encoded POST request and return the response.
pub async fn post_form(app: Router, uri: &str, body: String) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
