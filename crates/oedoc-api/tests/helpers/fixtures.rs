//! Records and PDFs used by the integration tests.

use chrono::NaiveDate;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use oedoc_core::{DocumentLanguage, DocumentRecord, ListedDocument, ObjectListing};
use uuid::Uuid;

pub fn guid(n: u8) -> Uuid {
    Uuid::parse_str(&format!("ab12cd34-0000-4000-8000-0000000000{:02x}", n)).unwrap()
}

/// A plain, non-stamped document.
pub fn record(guid: Uuid, document_type: &str) -> DocumentRecord {
    DocumentRecord {
        guid,
        name: "Fiche technique été.pdf".to_string(),
        item_name: None,
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
        max_age: 600,
        languages: vec![DocumentLanguage {
            name: "nl".to_string(),
        }],
    }
}

/// A datasheet for company 4, which is always stamped.
pub fn stamped_record(guid: Uuid) -> DocumentRecord {
    DocumentRecord {
        item_name: Some("Frituurvet 10L".to_string()),
        company_id: 4,
        ..record(guid, "datasheet")
    }
}

pub fn listed(guid: Uuid, document_type: &str, languages: &[&str]) -> ListedDocument {
    ListedDocument {
        guid,
        name: format!("{}.pdf", document_type),
        alt: Some(format!("{} title", document_type)),
        document_type: document_type.to_string(),
        object_type: "artikel".to_string(),
        object_id: 1234,
        size: 4096,
        languages: languages
            .iter()
            .map(|name| DocumentLanguage {
                name: name.to_string(),
            })
            .collect(),
    }
}

pub fn verified(documents: Vec<ListedDocument>) -> ObjectListing {
    ObjectListing {
        verified: true,
        error: None,
        documents,
    }
}

/// Single-page 600x800 PDF with one line of text.
pub fn minimal_pdf() -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id: ObjectId = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("Td", vec![100.into(), 700.into()]),
            Operation::new("Tj", vec![Object::string_literal("Hello")]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(
        lopdf::Dictionary::new(),
        content.encode().unwrap(),
    ));
    let media_box: Vec<Object> = vec![0.into(), 0.into(), 600.into(), 800.into()];
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => media_box,
        "Resources" => dictionary! { "Font" => dictionary! { "F1" => font_id } },
        "Contents" => content_id,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::from(page_id)],
            "Count" => 1i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}
