//! Mock repository implementations for testing

use async_trait::async_trait;
use oedoc_core::models::{DocumentRecord, ObjectListing, ResolutionFilter};
use oedoc_core::AppError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::db::DocumentRepository;

/// Mock document repository answering canned results per exact filter.
///
/// Every call is recorded so tests can assert which lookups were issued and
/// in what order.
#[derive(Clone, Default)]
#[allow(clippy::type_complexity)]
pub struct MockDocumentRepository {
    matches: Arc<Mutex<HashMap<ResolutionFilter, Vec<DocumentRecord>>>>,
    listings: Arc<Mutex<HashMap<String, ObjectListing>>>,
    find_calls: Arc<Mutex<Vec<ResolutionFilter>>>,
    listing_calls: Arc<Mutex<Vec<(String, String, i64, Option<i32>)>>>,
    failing: Arc<AtomicBool>,
}

impl MockDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `filter` with `records` (in that order).
    pub fn add_matches(&self, filter: ResolutionFilter, records: Vec<DocumentRecord>) {
        self.matches.lock().unwrap().insert(filter, records);
    }

    /// Answer guid lookups for `record`.
    pub fn add_document(&self, record: DocumentRecord) {
        self.add_matches(ResolutionFilter::by_guid(record.guid), vec![record]);
    }

    /// Answer listing calls for `company`.
    pub fn add_listing(&self, company: &str, listing: ObjectListing) {
        self.listings
            .lock()
            .unwrap()
            .insert(company.to_string(), listing);
    }

    /// Make every subsequent call fail as if the store were unreachable.
    pub fn fail_all(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn find_calls(&self) -> Vec<ResolutionFilter> {
        self.find_calls.lock().unwrap().clone()
    }

    pub fn listing_calls(&self) -> Vec<(String, String, i64, Option<i32>)> {
        self.listing_calls.lock().unwrap().clone()
    }

    fn check_failing(&self) -> Result<(), AppError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::Internal("mock repository unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentRepository for MockDocumentRepository {
    async fn find_matches(
        &self,
        filter: &ResolutionFilter,
    ) -> Result<Vec<DocumentRecord>, AppError> {
        self.find_calls.lock().unwrap().push(filter.clone());
        self.check_failing()?;
        Ok(self
            .matches
            .lock()
            .unwrap()
            .get(filter)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_for_object(
        &self,
        company: &str,
        object_type: &str,
        object_id: i64,
        user_id: Option<i32>,
    ) -> Result<ObjectListing, AppError> {
        self.listing_calls.lock().unwrap().push((
            company.to_string(),
            object_type.to_string(),
            object_id,
            user_id,
        ));
        self.check_failing()?;
        Ok(self
            .listings
            .lock()
            .unwrap()
            .get(company)
            .cloned()
            .unwrap_or_default())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.check_failing()
    }
}
