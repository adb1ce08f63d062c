//! Blob store and placeholder asset setup

use crate::constants::PLACEHOLDER_ASSETS;
use anyhow::{Context, Result};
use oedoc_core::Config;
use oedoc_storage::{AssetDirectory, BlobStore, LocalBlobStore};
use std::sync::Arc;

pub async fn setup_storage(config: &Config) -> Result<(Arc<dyn BlobStore>, AssetDirectory)> {
    let blobs = LocalBlobStore::new(config.data_path())
        .await
        .context("Failed to open data path")?;
    tracing::info!(data_path = %blobs.base_path().display(), "Blob store ready");

    let assets = AssetDirectory::new(config.assets_path());
    let missing = assets.missing(&PLACEHOLDER_ASSETS).await;
    if missing.is_empty() {
        tracing::info!(assets_path = %config.assets_path().display(), "Placeholder assets ready");
    } else {
        tracing::warn!(
            assets_path = %config.assets_path().display(),
            missing = ?missing,
            "Placeholder assets missing, thumbnail misses for them will answer 404"
        );
    }

    Ok((Arc::new(blobs), assets))
}
