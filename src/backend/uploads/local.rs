/**
 * Local Blob Store
 *
 * Writes each blob to `<upload_dir>/<uuid>.<ext>` and returns
 * `<public_base_url>/uploads/<uuid>.<ext>`. The router serves `upload_dir`
 * under `/uploads`, so the returned URL resolves as soon as the write
 * completes. The directory is created on first use.
 */

use async_trait::async_trait;
use std::path::PathBuf;
use uuid::Uuid;

use crate::backend::uploads::{BlobError, BlobStore};

/// Blob store writing to a local directory
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        let public_base_url = public_base_url.into();
        Self {
            root: root.into(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }
}

/// File extension for a MIME type
///
/// Parameters such as `; charset=utf-8` are ignored.
pub fn extension_for(mime_type: &str) -> &'static str {
    let essence = mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    match essence.as_str() {
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "text/plain" => "txt",
        _ => "bin",
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn store(&self, bytes: &[u8], mime_type: &str) -> Result<String, BlobError> {
        if bytes.is_empty() {
            return Err(BlobError::Empty);
        }

        tokio::fs::create_dir_all(&self.root).await?;

        let file_name = format!("{}.{}", Uuid::new_v4(), extension_for(mime_type));
        tokio::fs::write(self.root.join(&file_name), bytes).await?;

        tracing::debug!(file = %file_name, size = bytes.len(), "[Uploads] Stored blob");
        Ok(format!("{}/uploads/{}", self.public_base_url, file_name))
    }
}
