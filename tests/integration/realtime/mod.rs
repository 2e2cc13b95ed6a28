//! Relay integration tests
//!
//! WebSocket scenarios against a server bound to a local port

mod relay_ws_test;
