use chrono::NaiveDateTime;
use oedoc_core::models::{
    DocumentLanguage, DocumentRecord, ListedDocument, ObjectListing, ResolutionFilter,
};
use oedoc_core::AppError;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Trait for document repository operations
/// This abstracts the store's routines so resolution can run against fakes.
#[async_trait::async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Every record matching the filter, in store order.
    async fn find_matches(&self, filter: &ResolutionFilter)
        -> Result<Vec<DocumentRecord>, AppError>;

    /// Company-scoped listing of all documents attached to an object.
    async fn list_for_object(
        &self,
        company: &str,
        object_type: &str,
        object_id: i64,
        user_id: Option<i32>,
    ) -> Result<ObjectListing, AppError>;

    /// Round-trip to the store, used by readiness checks.
    async fn health_check(&self) -> Result<(), AppError>;
}

/// Row type returned by `document.usp_find_one` (for FromRow).
#[derive(Debug, sqlx::FromRow)]
pub struct DocumentRow {
    pub guid: Uuid,
    pub name: String,
    pub item_name: Option<String>,
    pub item_num: String,
    pub document_type: String,
    pub object_type: String,
    pub extension: String,
    pub mime_type: String,
    pub company_id: i32,
    pub object_id: i64,
    pub last_changed: NaiveDateTime,
    pub max_age: i64,
    pub languages: Option<Json<Vec<DocumentLanguage>>>,
}

impl DocumentRow {
    pub fn into_record(self) -> DocumentRecord {
        DocumentRecord {
            guid: self.guid,
            name: self.name,
            item_name: self.item_name,
            item_num: self.item_num,
            document_type: self.document_type,
            object_type: self.object_type,
            extension: self.extension,
            mime_type: self.mime_type,
            company_id: self.company_id,
            object_id: self.object_id,
            last_changed: self.last_changed,
            max_age: self.max_age,
            languages: self.languages.map(|l| l.0).unwrap_or_default(),
        }
    }
}

/// Status row returned by `document.usp_get_object_list_oe`.
///
/// `documents` is a JSON array using the camelCase field names of
/// [`ListedDocument`]; it is ignored when `error` is set.
#[derive(Debug, sqlx::FromRow)]
pub struct ListingRow {
    pub verified: bool,
    pub error: Option<String>,
    pub documents: Option<Json<Vec<ListedDocument>>>,
}

impl ListingRow {
    pub fn into_listing(self) -> ObjectListing {
        let error = self.error.filter(|e| !e.is_empty());
        let documents = match error {
            Some(_) => Vec::new(),
            None => self.documents.map(|d| d.0).unwrap_or_default(),
        };
        ObjectListing {
            verified: self.verified,
            error,
            documents,
        }
    }
}

#[derive(Clone)]
pub struct PgDocumentRepository {
    pool: PgPool,
}

impl PgDocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl DocumentRepository for PgDocumentRepository {
    #[tracing::instrument(skip(self), fields(
        db.system = "postgresql",
        db.operation = "select",
        db.routine = "document.usp_find_one"
    ))]
    async fn find_matches(
        &self,
        filter: &ResolutionFilter,
    ) -> Result<Vec<DocumentRecord>, AppError> {
        let rows = sqlx::query_as::<Postgres, DocumentRow>(
            r#"
            SELECT guid, name, item_name, item_num, document_type, object_type,
                   extension, mime_type, company_id, object_id, last_changed,
                   max_age, languages
            FROM document.usp_find_one($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(filter.guid)
        .bind(&filter.company)
        .bind(&filter.company_oe)
        .bind(&filter.object_type)
        .bind(&filter.document_type)
        .bind(filter.object_id)
        .bind(&filter.culture)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = ?e, "Failed to execute document lookup");
            AppError::Database(e)
        })?;

        Ok(rows.into_iter().map(DocumentRow::into_record).collect())
    }

    #[tracing::instrument(skip(self), fields(
        db.system = "postgresql",
        db.operation = "select",
        db.routine = "document.usp_get_object_list_oe"
    ))]
    async fn list_for_object(
        &self,
        company: &str,
        object_type: &str,
        object_id: i64,
        user_id: Option<i32>,
    ) -> Result<ObjectListing, AppError> {
        let row = sqlx::query_as::<Postgres, ListingRow>(
            r#"
            SELECT verified, error, documents
            FROM document.usp_get_object_list_oe($1, $2, $3, $4)
            "#,
        )
        .bind(company)
        .bind(object_type)
        .bind(object_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = ?e, company = %company, "Failed to execute object listing");
            AppError::Database(e)
        })?;

        // A routine that returns no status row has not verified anything.
        Ok(row.map(ListingRow::into_listing).unwrap_or_default())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row() -> DocumentRow {
        DocumentRow {
            guid: Uuid::new_v4(),
            name: "sheet.pdf".to_string(),
            item_name: None,
            item_num: "42".to_string(),
            document_type: "datasheet".to_string(),
            object_type: "artikel".to_string(),
            extension: "pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            company_id: 2,
            object_id: 1,
            last_changed: NaiveDate::from_ymd_opt(2022, 10, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            max_age: 60,
            languages: None,
        }
    }

    #[test]
    fn test_row_without_languages_maps_to_empty_list() {
        let record = row().into_record();
        assert!(record.languages.is_empty());
        assert_eq!(record.item_num, "42");
    }

    #[test]
    fn test_row_languages_keep_order() {
        let mut r = row();
        r.languages = Some(Json(vec![
            DocumentLanguage {
                name: "fr".to_string(),
            },
            DocumentLanguage {
                name: "nl".to_string(),
            },
        ]));
        let names: Vec<String> = r.into_record().languages.into_iter().map(|l| l.name).collect();
        assert_eq!(names, vec!["fr", "nl"]);
    }

    #[test]
    fn test_listing_error_discards_documents() {
        let listing = ListingRow {
            verified: false,
            error: Some("Session has expired!".to_string()),
            documents: Some(Json(vec![])),
        }
        .into_listing();
        assert!(!listing.is_usable());
        assert_eq!(listing.error.as_deref(), Some("Session has expired!"));
    }

    #[test]
    fn test_listing_empty_error_is_ignored() {
        let listing = ListingRow {
            verified: true,
            error: Some(String::new()),
            documents: None,
        }
        .into_listing();
        assert!(listing.is_usable());
        assert!(listing.documents.is_empty());
    }
}
