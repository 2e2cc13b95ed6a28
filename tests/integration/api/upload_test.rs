//! Upload API integration tests

use axum::http::StatusCode;
use bytes::Bytes;
use serde_json::Value;

use crate::common::{TestApp, TEST_MAX_UPLOAD_BYTES};

#[tokio::test]
async fn test_upload_then_fetch() {
    let app = TestApp::new().await;
    let png = Bytes::from_static(b"\x89PNG\r\n\x1a\nfake");

    let response = app
        .server
        .post("/api/upload")
        .content_type("image/png")
        .bytes(png.clone())
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    let url = body["url"].as_str().expect("url in body");
    assert!(url.starts_with("http://127.0.0.1:3000/uploads/"));
    assert_contains!(url, ".png");

    let path = url.trim_start_matches("http://127.0.0.1:3000");
    let fetched = app.server.get(path).await;
    assert_eq!(fetched.status_code(), StatusCode::OK);
    assert_eq!(fetched.as_bytes(), &png);
}

#[tokio::test]
async fn test_empty_upload_rejected() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/upload")
        .content_type("image/png")
        .bytes(Bytes::new())
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_oversized_upload_rejected() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/upload")
        .content_type("image/png")
        .bytes(Bytes::from(vec![0u8; TEST_MAX_UPLOAD_BYTES + 1]))
        .await;

    assert_eq!(response.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(std::fs::read_dir(app.upload_dir.path()).map(|d| d.count()).unwrap_or(0), 0);
}
