//! Application state shared by every handler.
//!
//! Collaborators are injected as trait objects so the router can run
//! against PostgreSQL and the data directory in production, and against
//! in-memory fakes in tests.

use crate::services::{DeliverySelector, DocumentResolver, ObjectListService, PublicUrls};
use oedoc_core::Config;
use oedoc_db::DocumentRepository;
use oedoc_processing::PdfStamper;
use oedoc_storage::{AssetDirectory, BlobStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn DocumentRepository>,
    pub blobs: Arc<dyn BlobStore>,
    pub assets: AssetDirectory,
    pub stamper: Arc<PdfStamper>,
    pub urls: PublicUrls,
}

impl AppState {
    pub fn new(
        config: &Config,
        repository: Arc<dyn DocumentRepository>,
        blobs: Arc<dyn BlobStore>,
        assets: AssetDirectory,
    ) -> Self {
        let urls = PublicUrls::from_config(config);
        Self {
            repository,
            blobs,
            assets,
            stamper: Arc::new(PdfStamper::default()),
            urls,
        }
    }

    pub fn resolver(&self) -> DocumentResolver {
        DocumentResolver::new(self.repository.clone())
    }

    pub fn object_lists(&self) -> ObjectListService {
        ObjectListService::new(self.repository.clone(), self.urls.clone())
    }

    pub fn delivery(&self) -> DeliverySelector {
        DeliverySelector::new(self.urls.clone())
    }
}
