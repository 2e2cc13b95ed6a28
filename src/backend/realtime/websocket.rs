/**
 * WebSocket Transport
 *
 * Drives a [`RelayGateway`] session from an axum WebSocket at `GET /ws`.
 *
 * # Connection Lifecycle
 *
 * 1. The identity token comes from the `token` query parameter.
 * 2. The socket is upgraded unconditionally, then the gateway's admission gate
 *    runs. A rejected connection receives one `error` event with code
 *    `NO_TOKEN`, followed by a close frame with code 4001.
 * 3. An admitted connection is split into a writer task, which drains the
 *    session's event channel and sends pings, and a reader loop, which
 *    decodes client events and hands them to the gateway.
 * 4. When the reader loop ends (close frame, transport error or silence past
 *    the liveness window) the session is closed in the gateway.
 *
 * # Liveness
 *
 * The writer pings every `ping_interval` (30 seconds by default). A
 * connection that sends nothing at all, pongs included, for the ping interval
 * plus `pong_timeout` (10 seconds by default) is dropped.
 */

use axum::extract::ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::Response;
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval, timeout, MissedTickBehavior};

use crate::backend::error::BackendError;
use crate::backend::realtime::gateway::{RelayGateway, RelaySession};
use crate::shared::{AppConfig, ClientEvent, ErrorPayload, ServerEvent};

/// Close code sent when the handshake carries no identity token
pub const CLOSE_NO_TOKEN: u16 = 4001;

/// Ping cadence and silence tolerance of relay connections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Liveness {
    /// Interval between server pings
    pub ping_interval: Duration,
    /// Grace period after a ping before a silent connection is dropped
    pub pong_timeout: Duration,
}

impl Liveness {
    pub fn new(ping_interval: Duration, pong_timeout: Duration) -> Self {
        Self {
            ping_interval,
            pong_timeout,
        }
    }

    /// Longest silence a connection may keep before it is dropped
    pub fn window(&self) -> Duration {
        self.ping_interval + self.pong_timeout
    }
}

impl From<&AppConfig> for Liveness {
    fn from(config: &AppConfig) -> Self {
        Self::new(config.ping_interval, config.pong_timeout)
    }
}

/// Query parameters of the WebSocket handshake
#[derive(Debug, Default, Deserialize)]
pub struct ConnectQuery {
    /// Identity token; absent means the connection is rejected
    pub token: Option<String>,
}

/// Handle WebSocket upgrade (GET /ws?token=...)
///
/// Always upgrades. Rejection happens over the socket so the client sees the
/// `error` event and the 4001 close code instead of an HTTP error.
pub async fn ws_upgrade(
    State(gateway): State<RelayGateway>,
    State(liveness): State<Liveness>,
    Query(query): Query<ConnectQuery>,
    ws: WebSocketUpgrade,
) -> Response {
    tracing::debug!(has_token = query.token.is_some(), "[Relay] WebSocket upgrade requested");
    ws.on_upgrade(move |socket| run_connection(socket, gateway, liveness, query.token))
}

/// Run one relay connection to completion
pub async fn run_connection(
    socket: WebSocket,
    gateway: RelayGateway,
    liveness: Liveness,
    token: Option<String>,
) {
    let mut session = gateway.open(token);

    if let Err(e) = gateway.admit(&mut session).await {
        reject(socket, &e).await;
        return;
    }

    let Some(events) = session.take_events() else {
        gateway.close(&mut session).await;
        return;
    };

    let (ws_sender, mut ws_receiver) = socket.split();
    let writer_handle = tokio::spawn(writer_task(ws_sender, events, liveness.ping_interval));

    loop {
        let frame = match timeout(liveness.window(), ws_receiver.next()).await {
            Ok(Some(Ok(frame))) => frame,
            Ok(Some(Err(e))) => {
                tracing::debug!(connection_id = %session.id(), error = %e, "[Relay] Transport error");
                break;
            }
            Ok(None) => break,
            Err(_) => {
                tracing::warn!(
                    connection_id = %session.id(),
                    window_ms = liveness.window().as_millis() as u64,
                    "[Relay] Liveness timeout, dropping connection"
                );
                break;
            }
        };

        match frame {
            Message::Text(text) => handle_text(&gateway, &session, text.as_str()).await,
            Message::Binary(_) => {
                tracing::debug!(connection_id = %session.id(), "[Relay] Ignoring binary frame");
            }
            Message::Close(_) => break,
            // Pings are answered by axum; any frame counts as liveness
            Message::Ping(_) | Message::Pong(_) => {}
        }
    }

    gateway.close(&mut session).await;
    writer_handle.abort();
}

/// Decode one text frame and hand it to the gateway
async fn handle_text(gateway: &RelayGateway, session: &RelaySession, text: &str) {
    match ClientEvent::from_frame(text) {
        Ok(event) => {
            gateway.dispatch(session, event).await;
        }
        Err(e) => {
            tracing::debug!(
                connection_id = %session.id(),
                error = %e,
                "[Relay] Ignoring malformed frame: {}",
                text.chars().take(100).collect::<String>()
            );
        }
    }
}

/// Send the rejection event and close frame, then drop the socket
async fn reject(mut socket: WebSocket, error: &BackendError) {
    let event = ServerEvent::Error(ErrorPayload::new(error.code(), error.message()));
    match event.to_frame() {
        Ok(frame) => {
            let _ = socket.send(Message::Text(frame.into())).await;
        }
        Err(e) => tracing::error!(error = %e, "[Relay] Failed to encode rejection event"),
    }

    let close_frame = CloseFrame {
        code: CLOSE_NO_TOKEN,
        reason: error.code().into(),
    };
    let _ = socket.send(Message::Close(Some(close_frame))).await;
}

/// Forward queued events to the socket and keep it pinged
async fn writer_task(
    mut ws_sender: SplitSink<WebSocket, Message>,
    mut events: mpsc::UnboundedReceiver<ServerEvent>,
    ping_interval: Duration,
) {
    let mut ping_timer = interval(ping_interval);
    ping_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // First tick fires immediately
    ping_timer.tick().await;

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                let frame = match event.to_frame() {
                    Ok(frame) => frame,
                    Err(e) => {
                        tracing::error!(error = %e, event = event.name(), "[Relay] Failed to encode event");
                        continue;
                    }
                };
                if ws_sender.send(Message::Text(frame.into())).await.is_err() {
                    break;
                }
            }
            _ = ping_timer.tick() => {
                if ws_sender.send(Message::Ping(Vec::new().into())).await.is_err() {
                    break;
                }
            }
        }
    }

    let _ = ws_sender.close().await;
}
