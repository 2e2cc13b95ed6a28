//! WebSocket relay client helpers

use futures_util::{SinkExt, StreamExt};
use relaychat::shared::{ClientEvent, PresenceSnapshot, ServerEvent};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

pub type RelaySocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// How long a helper waits for an expected frame
pub const FRAME_TIMEOUT: Duration = Duration::from_secs(5);

/// What the relay sent next
#[derive(Debug)]
pub enum Received {
    Event(ServerEvent),
    Closed(Option<CloseFrame>),
}

pub async fn connect(url: &str) -> RelaySocket {
    let (socket, _response) = connect_async(url).await.expect("WebSocket handshake");
    socket
}

pub async fn send_event(socket: &mut RelaySocket, event: &ClientEvent) {
    let frame = serde_json::to_string(event).expect("encode client event");
    socket
        .send(Message::Text(frame.into()))
        .await
        .expect("send client event");
}

/// Next relay event or close, skipping pings and pongs
pub async fn next_received(socket: &mut RelaySocket, wait: Duration) -> Option<Received> {
    loop {
        let message = match timeout(wait, socket.next()).await {
            Ok(Some(Ok(message))) => message,
            Ok(Some(Err(_))) | Ok(None) => return Some(Received::Closed(None)),
            Err(_) => return None,
        };

        match message {
            Message::Text(text) => {
                let event: ServerEvent =
                    serde_json::from_str(text.as_str()).expect("relay sent a valid event");
                return Some(Received::Event(event));
            }
            Message::Close(frame) => return Some(Received::Closed(frame)),
            _ => continue,
        }
    }
}

/// Wait for a `user_counts` event with the given online count
pub async fn wait_for_online(socket: &mut RelaySocket, online: u64) -> PresenceSnapshot {
    loop {
        match next_received(socket, FRAME_TIMEOUT).await {
            Some(Received::Event(ServerEvent::UserCounts(snapshot))) if snapshot.online == online => {
                return snapshot;
            }
            Some(Received::Event(_)) => continue,
            other => panic!("expected user_counts with online = {}, got {:?}", online, other),
        }
    }
}

/// Wait for the next relayed message or image, skipping presence updates
pub async fn wait_for_relayed(socket: &mut RelaySocket) -> ServerEvent {
    loop {
        match next_received(socket, FRAME_TIMEOUT).await {
            Some(Received::Event(ServerEvent::UserCounts(_))) => continue,
            Some(Received::Event(event)) => return event,
            other => panic!("expected a relayed event, got {:?}", other),
        }
    }
}

/// Collect every event that arrives within `window`
pub async fn drain_events(socket: &mut RelaySocket, window: Duration) -> Vec<ServerEvent> {
    let mut events = Vec::new();
    while let Some(Received::Event(event)) = next_received(socket, window).await {
        events.push(event);
    }
    events
}
