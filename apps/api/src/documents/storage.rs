//! Document storage — the S3 seam for generated PDFs plus the transient
//! Redis preview reference that makes a fresh document previewable (and
//! re-downloadable) until its TTL lapses.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// Pluggable object store for generated documents. Production uses S3/MinIO;
/// handler tests use the in-memory implementation.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn put_document(&self, key: &str, bytes: Bytes) -> Result<(), AppError>;
    /// Presigned GET URL valid for `expires_secs`.
    async fn presign_download(&self, key: &str, expires_secs: u64) -> Result<String, AppError>;
}

pub struct S3DocumentStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3DocumentStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: String) -> Self {
        S3DocumentStore { client, bucket }
    }
}

#[async_trait]
impl DocumentStore for S3DocumentStore {
    async fn put_document(&self, key: &str, bytes: Bytes) -> Result<(), AppError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type("application/pdf")
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| AppError::S3(format!("put {key} failed: {e}")))?;
        Ok(())
    }

    async fn presign_download(&self, key: &str, expires_secs: u64) -> Result<String, AppError> {
        let config = PresigningConfig::expires_in(Duration::from_secs(expires_secs))
            .map_err(|e| AppError::S3(format!("presigning config: {e}")))?;
        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(config)
            .await
            .map_err(|e| AppError::S3(format!("presign {key} failed: {e}")))?;
        Ok(request.uri().to_string())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Transient preview references (Redis, TTL-bound)
// ────────────────────────────────────────────────────────────────────────────

/// What the preview lookup needs to re-presign a download.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewRef {
    pub s3_key: String,
    pub page_count: usize,
    pub item_count: usize,
}

fn preview_key(document_id: Uuid) -> String {
    format!("preview:{document_id}")
}

/// Records the preview reference with `ttl_secs` to live.
pub async fn record_preview(
    redis: &redis::Client,
    document_id: Uuid,
    preview: &PreviewRef,
    ttl_secs: u64,
) -> Result<(), AppError> {
    let payload = serde_json::to_string(preview)
        .map_err(|e| AppError::Cache(format!("preview encoding failed: {e}")))?;
    let mut conn = redis
        .get_multiplexed_async_connection()
        .await
        .map_err(|e| AppError::Cache(format!("redis connect failed: {e}")))?;
    conn.set_ex::<_, _, ()>(preview_key(document_id), payload, ttl_secs)
        .await
        .map_err(|e| AppError::Cache(format!("preview write failed: {e}")))?;
    Ok(())
}

/// Resolves a preview reference; `None` once the TTL has lapsed.
pub async fn lookup_preview(
    redis: &redis::Client,
    document_id: Uuid,
) -> Result<Option<PreviewRef>, AppError> {
    let mut conn = redis
        .get_multiplexed_async_connection()
        .await
        .map_err(|e| AppError::Cache(format!("redis connect failed: {e}")))?;
    let payload: Option<String> = conn
        .get(preview_key(document_id))
        .await
        .map_err(|e| AppError::Cache(format!("preview read failed: {e}")))?;
    payload
        .map(|p| {
            serde_json::from_str(&p)
                .map_err(|e| AppError::Cache(format!("preview decoding failed: {e}")))
        })
        .transpose()
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory store for tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub struct MemoryDocumentStore {
    docs: std::sync::Mutex<std::collections::HashMap<String, Bytes>>,
}

#[cfg(test)]
impl MemoryDocumentStore {
    pub fn new() -> Self {
        MemoryDocumentStore {
            docs: std::sync::Mutex::new(std::collections::HashMap::new()),
        }
    }

    pub fn document(&self, key: &str) -> Option<Bytes> {
        self.docs.lock().unwrap().get(key).cloned()
    }
}

#[cfg(test)]
#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn put_document(&self, key: &str, bytes: Bytes) -> Result<(), AppError> {
        self.docs.lock().unwrap().insert(key.to_string(), bytes);
        Ok(())
    }

    async fn presign_download(&self, key: &str, expires_secs: u64) -> Result<String, AppError> {
        Ok(format!("memory://{key}?expires={expires_secs}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_key_shape() {
        let id = Uuid::nil();
        assert_eq!(
            preview_key(id),
            "preview:00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_preview_ref_roundtrips_through_json() {
        let preview = PreviewRef {
            s3_key: "documents/u/d.pdf".to_string(),
            page_count: 3,
            item_count: 40,
        };
        let json = serde_json::to_string(&preview).unwrap();
        let back: PreviewRef = serde_json::from_str(&json).unwrap();
        assert_eq!(back, preview);
    }

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryDocumentStore::new();
        store
            .put_document("documents/a.pdf", Bytes::from_static(&[1, 2, 3]))
            .await
            .unwrap();
        assert_eq!(
            store.document("documents/a.pdf"),
            Some(Bytes::from_static(&[1, 2, 3]))
        );
        let url = store.presign_download("documents/a.pdf", 60).await.unwrap();
        assert!(url.contains("documents/a.pdf"));
    }
}
