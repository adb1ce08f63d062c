use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One repository lookup.
///
/// `company` selects the content-owning company (the common catalog in
/// practice) and `company_oe` the requesting operating company. With
/// `company_oe` unset the lookup is not scoped to an operating company.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolutionFilter {
    pub guid: Option<Uuid>,
    pub company: Option<String>,
    pub company_oe: Option<String>,
    pub object_type: Option<String>,
    pub document_type: Option<String>,
    pub object_id: Option<i64>,
    pub culture: Option<String>,
}

impl ResolutionFilter {
    /// Direct lookup by document identifier.
    pub fn by_guid(guid: Uuid) -> Self {
        Self {
            guid: Some(guid),
            ..Default::default()
        }
    }
}
