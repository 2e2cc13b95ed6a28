//! Uploads Module
//!
//! Blob storage for images shared in the relay. A client uploads the raw bytes
//! over HTTP, gets back a URL, and sends that URL as the payload of a
//! `send_image` event. The relay itself never touches the bytes.
//!
//! # Module Structure
//!
//! ```text
//! uploads/
//! ├── mod.rs       - BlobStore trait and errors
//! ├── local.rs     - Filesystem-backed store
//! └── handlers.rs  - POST /api/upload
//! ```

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Filesystem blob store
pub mod local;

/// Upload handler
pub mod handlers;

pub use handlers::upload;
pub use local::LocalBlobStore;

/// Errors returned by a blob store
#[derive(Debug, Error)]
pub enum BlobError {
    /// Writing the blob failed
    #[error("blob I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The store refused an empty blob
    #[error("blob is empty")]
    Empty,
}

/// Storage for uploaded blobs
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Persist `bytes` and return the public URL they are served from
    async fn store(&self, bytes: &[u8], mime_type: &str) -> Result<String, BlobError>;
}

/// Blob store handle held in the application state
pub type SharedBlobStore = Arc<dyn BlobStore>;
