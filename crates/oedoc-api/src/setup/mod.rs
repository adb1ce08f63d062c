//! Application setup and initialization
//!
//! Everything main.rs needs to turn a [`Config`] into a running router,
//! split so tests can build the router around in-memory collaborators.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use anyhow::{Context, Result};
use oedoc_core::Config;
use oedoc_db::PgDocumentRepository;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.environment())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment(),
        route_prefix = %config.route_prefix(),
        "Configuration loaded and validated successfully"
    );

    let pool = database::setup_database(&config).await?;
    let repository = Arc::new(PgDocumentRepository::new(pool));

    let (blobs, assets) = storage::setup_storage(&config).await?;

    let state = Arc::new(AppState::new(&config, repository, blobs, assets));

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
