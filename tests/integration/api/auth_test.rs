//! Authentication API integration tests
//!
//! Signup, signin, presence and health endpoints.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::TestApp;

fn credentials(username: &str, credential_hash: &str) -> Value {
    json!({ "username": username, "credential_hash": credential_hash })
}

#[tokio::test]
async fn test_signup_success() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/auth/signup")
        .json(&credentials("alice", "h1"))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["user"]["username"], "alice");
    assert!(body["user"]["created_at"].is_string());
    assert!(body["user"].get("credential_hash").is_none());
}

#[tokio::test]
async fn test_signup_duplicate_username() {
    let app = TestApp::new().await;
    app.server
        .post("/api/auth/signup")
        .json(&credentials("alice", "h1"))
        .await;

    let response = app
        .server
        .post("/api/auth/signup")
        .json(&credentials("alice", "h2"))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_error_body!(body, "DUPLICATE_USERNAME", 409);
}

#[tokio::test]
async fn test_signup_validation() {
    let app = TestApp::new().await;

    let blank = app
        .server
        .post("/api/auth/signup")
        .json(&credentials("  ", "h1"))
        .await;
    assert_eq!(blank.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = blank.json();
    assert_error_body!(body, "VALIDATION_ERROR", 400);

    let too_long = app
        .server
        .post("/api/auth/signup")
        .json(&credentials(&"x".repeat(65), "h1"))
        .await;
    assert_eq!(too_long.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signin_scenario() {
    let app = TestApp::new().await;
    app.server
        .post("/api/auth/signup")
        .json(&credentials("alice", "h1"))
        .await;

    let ok = app
        .server
        .post("/api/auth/signin")
        .json(&credentials("alice", "h1"))
        .await;
    assert_eq!(ok.status_code(), StatusCode::OK);
    let body: Value = ok.json();
    assert_eq!(body["user"]["username"], "alice");

    let wrong_hash = app
        .server
        .post("/api/auth/signin")
        .json(&credentials("alice", "h2"))
        .await;
    let unknown_user = app
        .server
        .post("/api/auth/signin")
        .json(&credentials("mallory", "h1"))
        .await;

    assert_eq!(wrong_hash.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status_code(), StatusCode::UNAUTHORIZED);
    // Indistinguishable failures
    assert_eq!(wrong_hash.json::<Value>(), unknown_user.json::<Value>());
}

#[tokio::test]
async fn test_presence_counts_registrations() {
    let app = TestApp::new().await;
    for (username, hash) in [("alice", "h1"), ("bob", "h2")] {
        app.server
            .post("/api/auth/signup")
            .json(&credentials(username, hash))
            .await;
    }

    let response = app.server.get("/api/presence").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({ "registered": 2, "online": 0 }));
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = TestApp::new().await;
    let response = app.server.get("/nope").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_error_body!(body, "REQUEST_ERROR", 404);
}
