//! Application configuration module
//!
//! Configuration is read from environment variables (a `.env` file is loaded
//! by the server binary first) and assembled through [`AppConfigBuilder`].
//! Every setting has a default suitable for local development.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_UPLOAD_DIR: &str = "uploads";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_DISCONNECT_DELAY_MS: u64 = 1000;
const DEFAULT_PING_INTERVAL_MS: u64 = 30_000;
const DEFAULT_PONG_TIMEOUT_MS: u64 = 10_000;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Interface the HTTP server binds to
    pub host: String,
    /// Port the HTTP server binds to
    pub port: u16,
    /// PostgreSQL connection string; the in-memory directory is used when unset
    pub database_url: Option<String>,
    /// Directory uploaded blobs are written to
    pub upload_dir: PathBuf,
    /// Base URL used to build public blob URLs
    pub public_base_url: String,
    /// Largest accepted upload body
    pub max_upload_bytes: usize,
    /// Delay between a disconnect and the presence rebroadcast it triggers
    pub presence_disconnect_delay: Duration,
    /// Interval between server pings on each relay connection
    pub ping_interval: Duration,
    /// Silence allowed past one ping interval before a connection is dropped
    pub pong_timeout: Duration,
    /// Shared secret for the admin routes; admin routes are disabled when unset
    pub admin_token: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_url: None,
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            public_base_url: format!("http://127.0.0.1:{}", DEFAULT_PORT),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            presence_disconnect_delay: Duration::from_millis(DEFAULT_DISCONNECT_DELAY_MS),
            ping_interval: Duration::from_millis(DEFAULT_PING_INTERVAL_MS),
            pong_timeout: Duration::from_millis(DEFAULT_PONG_TIMEOUT_MS),
            admin_token: None,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut builder = AppConfig::builder();

        if let Some(host) = get("SERVER_HOST") {
            builder = builder.host(host);
        }
        if let Some(port) = get("SERVER_PORT") {
            builder = builder.port(parse_value("SERVER_PORT", &port)?);
        }
        if let Some(url) = get("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Some(dir) = get("UPLOAD_DIR") {
            builder = builder.upload_dir(dir);
        }
        if let Some(url) = get("PUBLIC_BASE_URL") {
            builder = builder.public_base_url(url);
        }
        if let Some(bytes) = get("MAX_UPLOAD_BYTES") {
            builder = builder.max_upload_bytes(parse_value("MAX_UPLOAD_BYTES", &bytes)?);
        }
        if let Some(ms) = get("PRESENCE_DISCONNECT_DELAY_MS") {
            let ms: u64 = parse_value("PRESENCE_DISCONNECT_DELAY_MS", &ms)?;
            builder = builder.presence_disconnect_delay(Duration::from_millis(ms));
        }
        if let Some(ms) = get("PING_INTERVAL_MS") {
            let ms: u64 = parse_value("PING_INTERVAL_MS", &ms)?;
            builder = builder.ping_interval(Duration::from_millis(ms));
        }
        if let Some(ms) = get("PONG_TIMEOUT_MS") {
            let ms: u64 = parse_value("PONG_TIMEOUT_MS", &ms)?;
            builder = builder.pong_timeout(Duration::from_millis(ms));
        }
        if let Some(token) = get("ADMIN_TOKEN") {
            builder = builder.admin_token(token);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidValue {
                key: "SERVER_PORT",
                value: "0".to_string(),
            });
        }
        if self.ping_interval.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "PING_INTERVAL_MS",
                value: "0".to_string(),
            });
        }
        if self.public_base_url.trim().is_empty() {
            return Err(ConfigError::MissingValue("PUBLIC_BASE_URL"));
        }
        Ok(())
    }

    /// Socket address the server listens on
    pub fn bind_address(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|_| ConfigError::InvalidValue {
            key: "SERVER_HOST",
            value: addr,
        })
    }
}

fn parse_value<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    host: Option<String>,
    port: Option<u16>,
    database_url: Option<String>,
    upload_dir: Option<PathBuf>,
    public_base_url: Option<String>,
    max_upload_bytes: Option<usize>,
    presence_disconnect_delay: Option<Duration>,
    ping_interval: Option<Duration>,
    pong_timeout: Option<Duration>,
    admin_token: Option<String>,
}

impl AppConfigBuilder {
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn upload_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.upload_dir = Some(dir.into());
        self
    }

    pub fn public_base_url(mut self, url: impl Into<String>) -> Self {
        self.public_base_url = Some(url.into());
        self
    }

    pub fn max_upload_bytes(mut self, bytes: usize) -> Self {
        self.max_upload_bytes = Some(bytes);
        self
    }

    pub fn presence_disconnect_delay(mut self, delay: Duration) -> Self {
        self.presence_disconnect_delay = Some(delay);
        self
    }

    pub fn ping_interval(mut self, interval: Duration) -> Self {
        self.ping_interval = Some(interval);
        self
    }

    pub fn pong_timeout(mut self, timeout: Duration) -> Self {
        self.pong_timeout = Some(timeout);
        self
    }

    pub fn admin_token(mut self, token: impl Into<String>) -> Self {
        self.admin_token = Some(token.into());
        self
    }

    /// Build the configuration
    ///
    /// The public base URL defaults to the loopback address on the configured
    /// port, so it follows `port` when only the port is overridden.
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let port = self.port.unwrap_or(defaults.port);
        let config = AppConfig {
            host: self.host.unwrap_or(defaults.host),
            port,
            database_url: self.database_url,
            upload_dir: self.upload_dir.unwrap_or(defaults.upload_dir),
            public_base_url: self
                .public_base_url
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| format!("http://127.0.0.1:{}", port)),
            max_upload_bytes: self.max_upload_bytes.unwrap_or(defaults.max_upload_bytes),
            presence_disconnect_delay: self
                .presence_disconnect_delay
                .unwrap_or(defaults.presence_disconnect_delay),
            ping_interval: self.ping_interval.unwrap_or(defaults.ping_interval),
            pong_timeout: self.pong_timeout.unwrap_or(defaults.pong_timeout),
            admin_token: self.admin_token,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error("missing value: {0}")]
    MissingValue(&'static str),
}
