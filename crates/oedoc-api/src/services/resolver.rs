//! Document resolution against the repository.
//!
//! A plan is an ordered list of tiers. Tiers run strictly one after the
//! other because each one is only needed when the previous ones missed.

use oedoc_core::policy::{DELIVERY_PLAN, METADATA_PLAN};
use oedoc_core::{AppError, DocumentRecord, RequestedDocument, ResolutionFilter, Tier};
use oedoc_db::DocumentRepository;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct DocumentResolver {
    repository: Arc<dyn DocumentRepository>,
}

impl DocumentResolver {
    pub fn new(repository: Arc<dyn DocumentRepository>) -> Self {
        Self { repository }
    }

    /// Resolve a document for delivery: common tier, requesting company,
    /// then the `bra` picture fallback.
    pub async fn resolve_for_delivery(
        &self,
        request: &RequestedDocument,
    ) -> Result<Option<DocumentRecord>, AppError> {
        self.resolve(request, &DELIVERY_PLAN).await
    }

    /// Resolve a document whose record alone is returned.
    pub async fn resolve_metadata(
        &self,
        request: &RequestedDocument,
    ) -> Result<Option<DocumentRecord>, AppError> {
        self.resolve(request, &METADATA_PLAN).await
    }

    /// Walk `plan` in order and stop at the first tier with a match.
    pub async fn resolve(
        &self,
        request: &RequestedDocument,
        plan: &[Tier],
    ) -> Result<Option<DocumentRecord>, AppError> {
        for tier in plan.iter().copied() {
            if !tier.applies(request) {
                continue;
            }

            tracing::debug!(
                tier = tier.name(),
                company = %request.company,
                object_type = %request.object_type,
                document_type = %request.document_type,
                object_id = request.object_id,
                "Searching tier"
            );

            let filter = tier.filter(request);
            if let Some(record) = self.find_one(&filter, tier.name()).await? {
                return Ok(Some(record));
            }
        }

        Ok(None)
    }

    /// Direct lookup by identifier.
    pub async fn find_by_guid(&self, guid: Uuid) -> Result<Option<DocumentRecord>, AppError> {
        self.find_one(&ResolutionFilter::by_guid(guid), "guid").await
    }

    async fn find_one(
        &self,
        filter: &ResolutionFilter,
        tier: &'static str,
    ) -> Result<Option<DocumentRecord>, AppError> {
        let matches = self.repository.find_matches(filter).await?;
        if matches.len() > 1 {
            tracing::warn!(
                tier = tier,
                matches = matches.len(),
                guids = ?matches.iter().map(|m| m.guid).collect::<Vec<_>>(),
                "Multiple documents match a single lookup, using the first"
            );
        }
        Ok(matches.into_iter().next())
    }
}
