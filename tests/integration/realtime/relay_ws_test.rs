//! Relay WebSocket integration tests
//!
//! Real clients (`tokio-tungstenite`) against a server on a local port;
//! registrations go through the HTTP API with `reqwest`.

use futures_util::SinkExt;
use pretty_assertions::assert_eq;
use relaychat::shared::{ClientEvent, ErrorPayload, PresenceSnapshot, ServerEvent};
use serde_json::json;
use std::time::Duration;

use crate::common::*;

async fn register(server: &LiveServer, username: &str, credential_hash: &str) {
    let response = reqwest::Client::new()
        .post(server.http_url("/api/auth/signup"))
        .json(&json!({ "username": username, "credential_hash": credential_hash }))
        .send()
        .await
        .expect("signup request");
    assert_eq!(response.status(), reqwest::StatusCode::CREATED);
}

#[tokio::test]
async fn test_presence_on_connect_and_disconnect() {
    let server = LiveServer::start().await;
    register(&server, "alice", "h1").await;
    register(&server, "bob", "h2").await;

    let mut alice = connect(&server.ws_url(Some("alice"))).await;
    let mut bob = connect(&server.ws_url(Some("bob"))).await;

    assert_eq!(
        wait_for_online(&mut alice, 2).await,
        PresenceSnapshot { registered: 2, online: 2 }
    );
    assert_eq!(
        wait_for_online(&mut bob, 2).await,
        PresenceSnapshot { registered: 2, online: 2 }
    );

    alice.close(None).await.expect("close alice");
    drop(alice);

    assert_eq!(
        wait_for_online(&mut bob, 1).await,
        PresenceSnapshot { registered: 2, online: 1 }
    );
    assert_eq!(server.state.registry.size().await, 1);
}

#[tokio::test]
async fn test_silent_connection_is_dropped() {
    let server = LiveServer::with_config(|mut config| {
        config.ping_interval = Duration::from_millis(200);
        config.pong_timeout = Duration::from_millis(200);
        config
    })
    .await;

    // Alice keeps reading, so her client answers every ping
    let mut alice = connect(&server.ws_url(Some("alice"))).await;
    // Bob is never polled: no reads, no pongs, no frames of any kind
    let mut bob = connect(&server.ws_url(Some("bob"))).await;

    wait_for_online(&mut alice, 2).await;
    assert_eq!(
        wait_for_online(&mut alice, 1).await,
        PresenceSnapshot { registered: 0, online: 1 }
    );
    assert_eq!(server.state.registry.size().await, 1);

    // Bob's socket was torn down behind whatever was already queued for him
    loop {
        match next_received(&mut bob, FRAME_TIMEOUT).await {
            Some(Received::Event(_)) => continue,
            Some(Received::Closed(_)) => break,
            None => panic!("silent connection was never closed"),
        }
    }
}

#[tokio::test]
async fn test_connect_without_token_is_rejected() {
    let server = LiveServer::start().await;
    let mut observer = connect(&server.ws_url(Some("observer"))).await;
    wait_for_online(&mut observer, 1).await;

    for url in [server.ws_url(None), server.ws_url(Some(""))] {
        let mut rejected = connect(&url).await;

        match next_received(&mut rejected, FRAME_TIMEOUT).await {
            Some(Received::Event(ServerEvent::Error(ErrorPayload { code, .. }))) => {
                assert_eq!(code, "NO_TOKEN");
            }
            other => panic!("expected error event, got {:?}", other),
        }
        match next_received(&mut rejected, FRAME_TIMEOUT).await {
            Some(Received::Closed(Some(frame))) => {
                assert_eq!(u16::from(frame.code), 4001);
                assert_eq!(frame.reason.as_str(), "NO_TOKEN");
            }
            other => panic!("expected close frame, got {:?}", other),
        }
    }

    assert_eq!(server.state.registry.size().await, 1);
    // No presence change was announced for the rejected attempts
    let seen = drain_events(&mut observer, Duration::from_millis(300)).await;
    assert!(seen
        .iter()
        .all(|event| !matches!(event, ServerEvent::UserCounts(s) if s.online != 1)));
}

#[tokio::test]
async fn test_message_fan_out_excludes_sender() {
    let server = LiveServer::start().await;
    let mut alice = connect(&server.ws_url(Some("alice"))).await;
    let mut bob = connect(&server.ws_url(Some("bob"))).await;
    let mut carol = connect(&server.ws_url(Some("carol"))).await;
    wait_for_online(&mut carol, 3).await;

    let payload = json!({ "text": "hello", "from": "alice" });
    send_event(&mut alice, &ClientEvent::SendMessage(payload.clone())).await;

    assert_eq!(wait_for_relayed(&mut bob).await, ServerEvent::ReceiveMessage(payload.clone()));
    assert_eq!(wait_for_relayed(&mut carol).await, ServerEvent::ReceiveMessage(payload));

    let echoed = drain_events(&mut alice, Duration::from_millis(300)).await;
    assert!(echoed
        .iter()
        .all(|event| matches!(event, ServerEvent::UserCounts(_))));
}

#[tokio::test]
async fn test_image_relay_with_uploaded_url() {
    let server = LiveServer::start().await;
    let mut alice = connect(&server.ws_url(Some("alice"))).await;
    let mut bob = connect(&server.ws_url(Some("bob"))).await;
    wait_for_online(&mut bob, 2).await;

    let response = reqwest::Client::new()
        .post(server.http_url("/api/upload"))
        .header(reqwest::header::CONTENT_TYPE, "image/png")
        .body(b"\x89PNG".to_vec())
        .send()
        .await
        .expect("upload request");
    assert_eq!(response.status(), reqwest::StatusCode::CREATED);
    let body: serde_json::Value = response.json().await.expect("upload body");
    let url = body["url"].as_str().expect("url").to_string();

    send_event(&mut alice, &ClientEvent::SendImage(json!({ "url": url }))).await;
    assert_eq!(
        wait_for_relayed(&mut bob).await,
        ServerEvent::ReceiveImage(json!({ "url": url }))
    );
}

#[tokio::test]
async fn test_malformed_frames_are_ignored() {
    let server = LiveServer::start().await;
    let mut alice = connect(&server.ws_url(Some("alice"))).await;
    let mut bob = connect(&server.ws_url(Some("bob"))).await;
    wait_for_online(&mut bob, 2).await;

    use tokio_tungstenite::tungstenite::Message;
    alice.send(Message::Text("not json".into())).await.unwrap();
    alice
        .send(Message::Text(r#"{"event":"shout","data":1}"#.into()))
        .await
        .unwrap();
    alice.send(Message::Binary(vec![1, 2, 3].into())).await.unwrap();
    send_event(&mut alice, &ClientEvent::SendMessage(json!("still here"))).await;

    // The connection survives and only the valid event is relayed
    assert_eq!(
        wait_for_relayed(&mut bob).await,
        ServerEvent::ReceiveMessage(json!("still here"))
    );
    assert_eq!(server.state.registry.size().await, 2);
}
