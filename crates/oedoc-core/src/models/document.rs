use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A language a document is available in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DocumentLanguage {
    /// Culture name, e.g. `nl` or `fr`.
    pub name: String,
}

/// A stored document as returned by the repository.
///
/// `last_changed` is naive: it is compared against the stamp cutoff exactly as
/// the store reports it, without any timezone conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
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
    #[schema(value_type = String, format = DateTime)]
    pub last_changed: NaiveDateTime,
    /// Cache lifetime hint in seconds.
    pub max_age: i64,
    /// Ordered; the first entry is the primary language.
    #[serde(default)]
    pub languages: Vec<DocumentLanguage>,
}

impl DocumentRecord {
    /// Lowercase hyphenated guid, the key used for blob lookup and headers.
    pub fn guid_key(&self) -> String {
        self.guid.as_hyphenated().to_string()
    }

    /// Name shown to people: the item name when present, otherwise the file name.
    pub fn display_name(&self) -> &str {
        self.item_name.as_deref().unwrap_or(&self.name)
    }

    /// Single line burned into qualifying PDFs.
    pub fn stamp_text(&self) -> String {
        format!("{} {}", self.item_num, self.display_name())
    }
}
