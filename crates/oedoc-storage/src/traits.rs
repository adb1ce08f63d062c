//! Blob store abstraction
//!
//! The document service only reads blobs. A blob either exists for a guid,
//! in which case its bytes and modification time are available, or it does not.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::Stream;
use std::pin::Pin;
use thiserror::Error;
use uuid::Uuid;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Chunked blob content.
pub type BlobStream = Pin<Box<dyn Stream<Item = Result<Bytes, StorageError>> + Send>>;

/// Read-only access to document blobs keyed by document guid.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Check if the blob for a document exists
    async fn exists(&self, guid: &Uuid) -> StorageResult<bool>;

    /// Modification time of the blob
    async fn last_modified(&self, guid: &Uuid) -> StorageResult<DateTime<Utc>>;

    /// Read the whole blob into memory (used when the blob must be rewritten)
    async fn read(&self, guid: &Uuid) -> StorageResult<Vec<u8>>;

    /// Open the blob as a stream of chunks
    async fn open_read_stream(&self, guid: &Uuid) -> StorageResult<BlobStream>;
}
