//! Test servers
//!
//! Every test gets its own state around an in-memory directory and a
//! temporary upload directory, so tests never share registries or files.

use axum_test::TestServer;
use relaychat::backend::routes::create_router;
use relaychat::backend::server::{build_state, AppState};
use relaychat::shared::AppConfig;
use std::net::SocketAddr;
use std::time::Duration;
use tempfile::TempDir;
use tokio::task::JoinHandle;

/// Admin token configured on test servers
pub const TEST_ADMIN_TOKEN: &str = "test-admin-token";

/// Disconnect delay used by test servers
pub const TEST_DISCONNECT_DELAY: Duration = Duration::from_millis(100);

/// Upload limit used by test servers
pub const TEST_MAX_UPLOAD_BYTES: usize = 1024;

/// Build a configuration pointing at `upload_dir`
pub fn test_config(upload_dir: &TempDir, port: u16) -> AppConfig {
    AppConfig::builder()
        .host("127.0.0.1")
        .port(port)
        .upload_dir(upload_dir.path())
        .public_base_url(format!("http://127.0.0.1:{}", port))
        .max_upload_bytes(TEST_MAX_UPLOAD_BYTES)
        .presence_disconnect_delay(TEST_DISCONNECT_DELAY)
        .admin_token(TEST_ADMIN_TOKEN)
        .build()
        .expect("test configuration is valid")
}

/// In-process server driven through `axum_test`
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub upload_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(|config| config).await
    }

    /// Build a test app after adjusting the default test configuration
    pub async fn with_config(adjust: impl FnOnce(AppConfig) -> AppConfig) -> Self {
        let upload_dir = TempDir::new().expect("create temp upload dir");
        let config = adjust(test_config(&upload_dir, 3000));
        let state = build_state(config).await;
        let server = TestServer::new(create_router(state.clone())).expect("start test server");
        Self {
            server,
            state,
            upload_dir,
        }
    }
}

/// Server bound to a real local port, for WebSocket clients
pub struct LiveServer {
    pub addr: SocketAddr,
    pub state: AppState,
    pub upload_dir: TempDir,
    handle: JoinHandle<()>,
}

impl LiveServer {
    pub async fn start() -> Self {
        Self::with_config(|config| config).await
    }

    /// Start a live server after adjusting the default test configuration
    pub async fn with_config(adjust: impl FnOnce(AppConfig) -> AppConfig) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("listener address");

        let upload_dir = TempDir::new().expect("create temp upload dir");
        let state = build_state(adjust(test_config(&upload_dir, addr.port()))).await;
        let app = create_router(state.clone());

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve test app");
        });

        Self {
            addr,
            state,
            upload_dir,
            handle,
        }
    }

    pub fn http_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn ws_url(&self, token: Option<&str>) -> String {
        match token {
            Some(token) => format!("ws://{}/ws?token={}", self.addr, token),
            None => format!("ws://{}/ws", self.addr),
        }
    }
}

impl Drop for LiveServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
