use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::DocumentLanguage;

/// A document as it appears in an object's listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListedDocument {
    pub guid: Uuid,
    pub name: String,
    /// Alternative text, surfaced as the entry title.
    pub alt: Option<String>,
    pub document_type: String,
    pub object_type: String,
    pub object_id: i64,
    pub size: i64,
    #[serde(default)]
    pub languages: Vec<DocumentLanguage>,
}

/// Result of one company-scoped listing call.
///
/// `error` is authoritative: when set, `documents` is empty and the
/// listing must not be used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectListing {
    pub verified: bool,
    pub error: Option<String>,
    pub documents: Vec<ListedDocument>,
}

impl ListedDocument {
    /// First language in store order; datasheet links are built from it.
    pub fn primary_language(&self) -> Option<&str> {
        self.languages.first().map(|l| l.name.as_str())
    }
}

impl ObjectListing {
    /// A listing whose documents may be merged into a response.
    pub fn is_usable(&self) -> bool {
        self.verified && self.error.is_none()
    }
}
