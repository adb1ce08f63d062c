use chrono::NaiveDate;
use oedoc_core::{DocumentLanguage, DocumentRecord};
use uuid::Uuid;

pub fn record(guid: &str, document_type: &str) -> DocumentRecord {
    DocumentRecord {
        guid: Uuid::parse_str(guid).unwrap(),
        name: "Fiche technique é.pdf".to_string(),
        item_name: Some("Frituurvet 10L".to_string()),
        item_num: "123456".to_string(),
        document_type: document_type.to_string(),
        object_type: "artikel".to_string(),
        extension: "pdf".to_string(),
        mime_type: "application/pdf".to_string(),
        company_id: 1,
        object_id: 1234,
        last_changed: NaiveDate::from_ymd_opt(2023, 3, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap(),
        max_age: 3600,
        languages: vec![DocumentLanguage {
            name: "nl".to_string(),
        }],
    }
}

pub const GUID_A: &str = "ab12cd34-0000-4000-8000-00000000000a";
pub const GUID_B: &str = "ab12cd34-0000-4000-8000-00000000000b";
