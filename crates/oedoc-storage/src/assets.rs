//! Static placeholder assets (the localized "no picture" images).

use crate::local::{open_file_stream, resolve_within};
use crate::traits::{BlobStream, StorageError, StorageResult};
use std::path::PathBuf;

/// Directory of named placeholder files.
#[derive(Clone, Debug)]
pub struct AssetDirectory {
    base_path: PathBuf,
}

impl AssetDirectory {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        AssetDirectory {
            base_path: base_path.into(),
        }
    }

    /// Open a named asset. Only bare file names are accepted.
    pub async fn open(&self, file_name: &str) -> StorageResult<BlobStream> {
        if file_name.is_empty() || file_name.contains('/') || file_name.contains('\\') {
            return Err(StorageError::InvalidKey(format!(
                "Invalid asset name: {}",
                file_name
            )));
        }
        let path = resolve_within(&self.base_path, file_name)?;
        open_file_stream(&path, file_name.to_string()).await
    }

    /// Names of the expected assets that are missing on disk.
    pub async fn missing(&self, file_names: &[&str]) -> Vec<String> {
        let mut missing = Vec::new();
        for name in file_names {
            let exists = tokio::fs::try_exists(self.base_path.join(name))
                .await
                .unwrap_or(false);
            if !exists {
                missing.push(name.to_string());
            }
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_open_existing_asset() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("404_nl.svg"), b"<svg/>").unwrap();
        let assets = AssetDirectory::new(dir.path());

        let mut stream = assets.open("404_nl.svg").await.unwrap();
        let mut body = Vec::new();
        while let Some(chunk) = stream.next().await {
            body.extend_from_slice(&chunk.unwrap());
        }
        assert_eq!(body, b"<svg/>");
    }

    #[tokio::test]
    async fn test_nested_names_rejected() {
        let dir = tempdir().unwrap();
        let assets = AssetDirectory::new(dir.path());
        assert!(matches!(
            assets.open("../secret.png").await,
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(
            assets.open("sub/404.png").await,
            Err(StorageError::InvalidKey(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_reports_absent_files() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("404.png"), b"png").unwrap();
        let assets = AssetDirectory::new(dir.path());

        let missing = assets.missing(&["404.png", "404_fr.png"]).await;
        assert_eq!(missing, vec!["404_fr.png".to_string()]);
    }
}
