//! Listing of every document attached to a business object.

use oedoc_core::constants::{
    COMMON_COMPANY, DOC_TYPE_DATASHEET, DOC_TYPE_DISPLAY_IMAGE, DOC_TYPE_PICTURE,
};
use oedoc_core::{AppError, ListedDocument};
use oedoc_db::DocumentRepository;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::PublicUrls;

const SESSION_EXPIRED: &str = "Session has expired!";

/// One entry of an object listing as served to clients.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ObjectListEntry {
    pub title: Option<String>,
    pub filename: String,
    pub object_type: String,
    pub document_type: String,
    pub object_ids: Vec<i64>,
    pub size: i64,
    pub languages: Vec<String>,
    pub download_url: String,
}

#[derive(Clone)]
pub struct ObjectListService {
    repository: Arc<dyn DocumentRepository>,
    urls: PublicUrls,
}

impl ObjectListService {
    pub fn new(repository: Arc<dyn DocumentRepository>, urls: PublicUrls) -> Self {
        Self { repository, urls }
    }

    /// List the requesting company's documents, followed by the common
    /// catalog's when that listing is usable.
    ///
    /// An unverified listing for the requesting company is an authorization
    /// failure, never an empty result.
    pub async fn list(
        &self,
        company: &str,
        object_type: &str,
        object_id: i64,
    ) -> Result<Vec<ObjectListEntry>, AppError> {
        let company = company.to_lowercase();
        let object_type = object_type.to_lowercase();

        let (own, common) = tokio::join!(
            self.repository
                .list_for_object(&company, &object_type, object_id, None),
            self.repository
                .list_for_object(COMMON_COMPANY, &object_type, object_id, None),
        );
        let own = own?;
        let common = common?;

        if !own.is_usable() {
            tracing::warn!(
                company = %company,
                object_type = %object_type,
                object_id = object_id,
                store_error = ?own.error,
                "Object listing not verified"
            );
            return Err(AppError::Unauthorized(
                own.error.unwrap_or_else(|| SESSION_EXPIRED.to_string()),
            ));
        }

        let mut documents = own.documents;
        if common.is_usable() {
            documents.extend(common.documents);
        }

        let display_images: Vec<ListedDocument> = documents
            .iter()
            .filter(|d| d.document_type == DOC_TYPE_PICTURE)
            .map(|d| ListedDocument {
                document_type: DOC_TYPE_DISPLAY_IMAGE.to_string(),
                ..d.clone()
            })
            .collect();
        documents.extend(display_images);

        tracing::debug!(
            company = %company,
            object_id = object_id,
            entries = documents.len(),
            "Object listing assembled"
        );

        Ok(documents
            .into_iter()
            .map(|d| self.entry(&company, &object_type, object_id, d))
            .collect())
    }

    fn entry(
        &self,
        company: &str,
        object_type: &str,
        object_id: i64,
        document: ListedDocument,
    ) -> ObjectListEntry {
        let download_url = self.download_url(company, object_type, object_id, &document);
        ObjectListEntry {
            title: document.alt,
            filename: document.name,
            object_type: object_type.to_string(),
            document_type: document.document_type,
            object_ids: vec![object_id],
            size: document.size,
            languages: document.languages.into_iter().map(|l| l.name).collect(),
            download_url,
        }
    }

    fn download_url(
        &self,
        company: &str,
        object_type: &str,
        object_id: i64,
        document: &ListedDocument,
    ) -> String {
        match (document.document_type.as_str(), document.primary_language()) {
            (DOC_TYPE_DISPLAY_IMAGE, _) => self.urls.product_image(&document.guid),
            (DOC_TYPE_DATASHEET, Some(language)) => {
                self.urls.datasheet(company, object_type, object_id, language)
            }
            _ => self.urls.file_by_guid(&document.guid),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fixtures::{GUID_A, GUID_B};
    use oedoc_core::{DocumentLanguage, ObjectListing};
    use oedoc_db::test_helpers::MockDocumentRepository;
    use uuid::Uuid;

    fn listed(guid: &str, document_type: &str, languages: &[&str]) -> ListedDocument {
        ListedDocument {
            guid: Uuid::parse_str(guid).unwrap(),
            name: format!("{}.bin", document_type),
            alt: Some(format!("{} alt", document_type)),
            document_type: document_type.to_string(),
            object_type: "artikel".to_string(),
            object_id: 1234,
            size: 2048,
            languages: languages
                .iter()
                .map(|name| DocumentLanguage {
                    name: name.to_string(),
                })
                .collect(),
        }
    }

    fn verified(documents: Vec<ListedDocument>) -> ObjectListing {
        ObjectListing {
            verified: true,
            error: None,
            documents,
        }
    }

    fn service(mock: &MockDocumentRepository) -> ObjectListService {
        ObjectListService::new(
            Arc::new(mock.clone()),
            PublicUrls::new(
                "https://pcm.groupclaes.be",
                Some("v4"),
                "oe",
                "https://pcm.groupclaes.be/v4/product-images",
            ),
        )
    }

    #[tokio::test]
    async fn test_common_listing_is_appended_when_verified() {
        let mock = MockDocumentRepository::new();
        mock.add_listing("gro", verified(vec![listed(GUID_A, "datasheet", &["nl"])]));
        mock.add_listing("alg", verified(vec![listed(GUID_B, "veiligheidsfiche", &[])]));

        let entries = service(&mock).list("GRO", "Artikel", 1234).await.unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[0].download_url,
            "https://pcm.groupclaes.be/v4/oe/file/gro/artikel/datasheet/1234/nl"
        );
        assert_eq!(
            entries[1].download_url,
            format!("https://pcm.groupclaes.be/v4/oe/file/{}", GUID_B)
        );
        assert_eq!(entries[1].object_ids, vec![1234]);

        let mut companies: Vec<String> =
            mock.listing_calls().into_iter().map(|c| c.0).collect();
        companies.sort();
        assert_eq!(companies, vec!["alg".to_string(), "gro".to_string()]);
    }

    #[tokio::test]
    async fn test_unverified_common_listing_is_ignored_but_pictures_still_aliased() {
        let mock = MockDocumentRepository::new();
        mock.add_listing("gro", verified(vec![listed(GUID_A, "foto", &[])]));
        mock.add_listing(
            "alg",
            ObjectListing {
                verified: false,
                error: None,
                documents: vec![listed(GUID_B, "foto", &[])],
            },
        );

        let entries = service(&mock).list("gro", "artikel", 1234).await.unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].document_type, "foto");
        assert_eq!(entries[1].document_type, "display-image");
        assert_eq!(
            entries[1].download_url,
            format!("https://pcm.groupclaes.be/v4/product-images/{}?s=thumb", GUID_A)
        );
        assert_eq!(entries[1].title.as_deref(), Some("foto alt"));
    }

    #[tokio::test]
    async fn test_unverified_own_listing_is_unauthorized() {
        let mock = MockDocumentRepository::new();
        mock.add_listing("alg", verified(vec![listed(GUID_B, "foto", &[])]));

        let result = service(&mock).list("gro", "artikel", 1234).await;

        match result {
            Err(AppError::Unauthorized(msg)) => assert_eq!(msg, "Session has expired!"),
            other => panic!("Expected Unauthorized, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_store_error_message_is_surfaced() {
        let mock = MockDocumentRepository::new();
        mock.add_listing(
            "gro",
            ObjectListing {
                verified: false,
                error: Some("User has no access to this object".to_string()),
                documents: vec![],
            },
        );

        let result = service(&mock).list("gro", "artikel", 1234).await;

        assert!(
            matches!(result, Err(AppError::Unauthorized(msg)) if msg == "User has no access to this object")
        );
    }

    #[tokio::test]
    async fn test_datasheet_without_languages_uses_guid_url() {
        let mock = MockDocumentRepository::new();
        mock.add_listing("gro", verified(vec![listed(GUID_A, "datasheet", &[])]));

        let entries = service(&mock).list("gro", "artikel", 1234).await.unwrap();

        assert_eq!(
            entries[0].download_url,
            format!("https://pcm.groupclaes.be/v4/oe/file/{}", GUID_A)
        );
    }

    #[tokio::test]
    async fn test_repository_failure_is_not_unauthorized() {
        let mock = MockDocumentRepository::new();
        mock.fail_all();

        let result = service(&mock).list("gro", "artikel", 1234).await;

        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    /// Answers a listing only once both listing calls are in flight.
    struct RendezvousRepository {
        barrier: tokio::sync::Barrier,
        inner: MockDocumentRepository,
    }

    #[async_trait::async_trait]
    impl DocumentRepository for RendezvousRepository {
        async fn find_matches(
            &self,
            filter: &oedoc_core::ResolutionFilter,
        ) -> Result<Vec<oedoc_core::DocumentRecord>, AppError> {
            self.inner.find_matches(filter).await
        }

        async fn list_for_object(
            &self,
            company: &str,
            object_type: &str,
            object_id: i64,
            user_id: Option<i32>,
        ) -> Result<ObjectListing, AppError> {
            self.barrier.wait().await;
            self.inner
                .list_for_object(company, object_type, object_id, user_id)
                .await
        }

        async fn health_check(&self) -> Result<(), AppError> {
            self.inner.health_check().await
        }
    }

    #[tokio::test]
    async fn test_own_and_common_listings_run_concurrently() {
        let inner = MockDocumentRepository::new();
        inner.add_listing("gro", verified(vec![listed(GUID_A, "datasheet", &["nl"])]));
        inner.add_listing("alg", verified(vec![listed(GUID_B, "foto", &[])]));
        let repository = RendezvousRepository {
            barrier: tokio::sync::Barrier::new(2),
            inner,
        };
        let service = ObjectListService::new(
            Arc::new(repository),
            PublicUrls::new(
                "https://pcm.groupclaes.be",
                Some("v4"),
                "oe",
                "https://pcm.groupclaes.be/v4/product-images",
            ),
        );

        let entries = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            service.list("gro", "artikel", 1234),
        )
        .await
        .expect("listing calls did not overlap")
        .unwrap();

        assert_eq!(entries.len(), 3);
    }
}
