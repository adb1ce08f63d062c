use crate::keys::blob_key;
use crate::traits::{BlobStore, BlobStream, StorageError, StorageResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

/// Local filesystem blob store rooted at the service's data path.
#[derive(Clone, Debug)]
pub struct LocalBlobStore {
    base_path: PathBuf,
}

impl LocalBlobStore {
    /// Create a new LocalBlobStore
    ///
    /// # Arguments
    /// * `base_path` - Data root; blobs are read from `<base_path>/content/..`
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        let is_dir = fs::metadata(&base_path)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false);
        if !is_dir {
            return Err(StorageError::ConfigError(format!(
                "Data path {} is not a readable directory",
                base_path.display()
            )));
        }

        Ok(LocalBlobStore { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn blob_path(&self, guid: &Uuid) -> StorageResult<PathBuf> {
        resolve_within(&self.base_path, &blob_key(guid))
    }
}

/// Convert a storage key to a filesystem path below `base_path`.
///
/// Rejects keys containing `..` or starting with `/`, and keys whose resolved
/// path escapes the base directory through symlinks.
pub(crate) fn resolve_within(base_path: &Path, storage_key: &str) -> StorageResult<PathBuf> {
    if storage_key.contains("..") || storage_key.starts_with('/') {
        return Err(StorageError::InvalidKey(
            "Storage key contains invalid characters".to_string(),
        ));
    }

    let path = base_path.join(storage_key);

    let base_canonical = base_path.canonicalize().map_err(|e| {
        StorageError::ConfigError(format!("Failed to canonicalize base path: {}", e))
    })?;

    if let Ok(canonical) = path.canonicalize() {
        if canonical.strip_prefix(&base_canonical).is_err() {
            return Err(StorageError::InvalidKey(
                "Storage key resolves outside storage directory".to_string(),
            ));
        }
    }

    Ok(path)
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn exists(&self, guid: &Uuid) -> StorageResult<bool> {
        let path = self.blob_path(guid)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    async fn last_modified(&self, guid: &Uuid) -> StorageResult<DateTime<Utc>> {
        let path = self.blob_path(guid)?;
        let meta = fs::metadata(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::NotFound(guid.to_string())
            } else {
                StorageError::BackendError(e.to_string())
            }
        })?;
        let modified = meta
            .modified()
            .map_err(|e| StorageError::BackendError(e.to_string()))?;
        Ok(DateTime::<Utc>::from(modified))
    }

    async fn read(&self, guid: &Uuid) -> StorageResult<Vec<u8>> {
        let path = self.blob_path(guid)?;
        let start = std::time::Instant::now();

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(guid.to_string()));
        }

        let data = fs::read(&path).await.map_err(|e| {
            StorageError::DownloadFailed(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        tracing::debug!(
            path = %path.display(),
            guid = %guid,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Blob read into memory"
        );

        Ok(data)
    }

    async fn open_read_stream(&self, guid: &Uuid) -> StorageResult<BlobStream> {
        let path = self.blob_path(guid)?;
        open_file_stream(&path, guid.to_string()).await
    }
}

/// Open `path` as a chunked stream, logging read errors as they surface.
pub(crate) async fn open_file_stream(path: &Path, label: String) -> StorageResult<BlobStream> {
    let start = std::time::Instant::now();

    let file = fs::File::open(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            StorageError::NotFound(label.clone())
        } else {
            StorageError::DownloadFailed(format!("Failed to open file {}: {}", path.display(), e))
        }
    })?;

    let stream = tokio_util::io::ReaderStream::new(file).map(|result| {
        result.map_err(|e| StorageError::DownloadFailed(format!("Failed to read chunk: {}", e)))
    });

    let path_display = path.display().to_string();
    let logged_stream = stream.map(move |item| {
        if item.is_err() {
            tracing::error!(
                path = %path_display,
                key = %label,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Local storage stream read error"
            );
        }
        item
    });

    Ok(Box::pin(logged_stream))
}
