//! PDF stamping engine
//!
//! Burns `"<itemNum> <itemName>"` into the first page of a qualifying PDF.
//! Failures never propagate: the caller gets [`StampOutcome::PassThrough`]
//! and delivers the original bytes.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use oedoc_core::models::DocumentRecord;
use oedoc_core::policy::must_stamp;

use super::objects;
use super::rotation::{stamp_geometry, PageRotation, StampGeometry, StampLayout};

#[derive(Debug, thiserror::Error)]
pub enum StampError {
    #[error("Failed to load PDF: {0}")]
    Load(#[source] lopdf::Error),

    #[error("PDF has no pages")]
    NoPages,

    #[error("First page has no MediaBox")]
    MissingMediaBox,

    #[error("Invalid page structure: {0}")]
    InvalidPage(String),

    #[error("Unsupported page rotation: {0}")]
    UnsupportedRotation(i64),

    #[error("Stamp text contains a character outside WinAnsi: {0:?}")]
    UnencodableText(char),

    #[error("Failed to encode stamp content: {0}")]
    Content(String),

    #[error("Failed to serialize PDF: {0}")]
    Save(String),
}

/// Result of a stamping attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StampOutcome {
    /// The rewritten document.
    Stamped(Vec<u8>),
    /// Deliver the original bytes unchanged.
    PassThrough,
}

const FONT_NAME_PREFIX: &str = "OeStamp";

/// First-page stamper. Stateless apart from its layout.
#[derive(Debug, Clone, Default)]
pub struct PdfStamper {
    layout: StampLayout,
}

impl PdfStamper {
    /// Stamp `pdf` if `document` qualifies, degrading to pass-through on any failure.
    pub fn stamp(&self, pdf: &[u8], document: &DocumentRecord) -> StampOutcome {
        if !must_stamp(document) {
            return StampOutcome::PassThrough;
        }

        let start = std::time::Instant::now();
        match self.stamp_text(pdf, &document.stamp_text()) {
            Ok(bytes) => {
                tracing::debug!(
                    guid = %document.guid,
                    original_bytes = pdf.len(),
                    stamped_bytes = bytes.len(),
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "PDF stamped"
                );
                StampOutcome::Stamped(bytes)
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    guid = %document.guid,
                    "Error while modifying PDF, delivering original"
                );
                StampOutcome::PassThrough
            }
        }
    }

    /// Draw `text` on the first page of `pdf` and serialize the result.
    pub fn stamp_text(&self, pdf: &[u8], text: &str) -> Result<Vec<u8>, StampError> {
        let encoded = encode_win_ansi(text)?;

        let mut doc = Document::load_mem(pdf).map_err(StampError::Load)?;
        if doc.trailer.get(b"Encrypt").is_ok() {
            tracing::debug!("Stamping encrypted PDF, encryption restrictions ignored");
        }

        let page_id = doc
            .get_pages()
            .values()
            .next()
            .copied()
            .ok_or(StampError::NoPages)?;

        let (width, height) = objects::page_size(&doc, page_id)?;
        let rotation = PageRotation::from_degrees(objects::page_rotation(&doc, page_id)?)?;
        let geometry = stamp_geometry(width, height, rotation, &self.layout);

        let font_name = register_stamp_font(&mut doc, page_id)?;
        let operations = text_operations(
            &font_name,
            encoded,
            geometry,
            rotation,
            self.layout.font_size,
        );
        append_to_page(&mut doc, page_id, operations)?;

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| StampError::Save(e.to_string()))?;
        Ok(buffer)
    }
}

/// Encode for the WinAnsi Type1 font: Latin-1 plus the typographic
/// characters WinAnsi places in 0x80..=0x9F.
fn encode_win_ansi(text: &str) -> Result<Vec<u8>, StampError> {
    text.chars()
        .map(|c| match c as u32 {
            0x20..=0x7E | 0xA0..=0xFF => Ok(c as u8),
            _ => win_ansi_high(c).ok_or(StampError::UnencodableText(c)),
        })
        .collect()
}

fn win_ansi_high(c: char) -> Option<u8> {
    let byte = match c {
        '\u{20AC}' => 0x80, // €
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85, // …
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A, // Š
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C, // Œ
        '\u{017D}' => 0x8E, // Ž
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92, // ’
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95, // •
        '\u{2013}' => 0x96, // –
        '\u{2014}' => 0x97, // —
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99, // ™
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        _ => return None,
    };
    Some(byte)
}

fn page_dict_mut(doc: &mut Document, page_id: ObjectId) -> Result<&mut Dictionary, StampError> {
    doc.get_object_mut(page_id)
        .and_then(|o| o.as_dict_mut())
        .map_err(|e| StampError::InvalidPage(format!("failed to get page dictionary: {e}")))
}

fn owned_dict(doc: &Document, obj: &Object, what: &str) -> Result<Dictionary, StampError> {
    objects::dereference(doc, obj)?
        .as_dict()
        .cloned()
        .map_err(|e| StampError::InvalidPage(format!("{what} is not a dictionary: {e}")))
}

/// Add Helvetica to the page's resources and return its resource name.
///
/// Inherited or shared resources are copied onto the page so other pages
/// keep their original dictionaries.
fn register_stamp_font(doc: &mut Document, page_id: ObjectId) -> Result<Vec<u8>, StampError> {
    let mut resources = match objects::resolve_inherited(doc, page_id, b"Resources")? {
        Some(obj) => owned_dict(doc, obj, "Resources")?,
        None => Dictionary::new(),
    };
    let mut fonts = match resources.get(b"Font") {
        Ok(obj) => owned_dict(doc, obj, "Font resources")?,
        Err(_) => Dictionary::new(),
    };

    let mut index = 0u32;
    let font_name = loop {
        let candidate = format!("{FONT_NAME_PREFIX}{index}").into_bytes();
        if !fonts.has(&candidate) {
            break candidate;
        }
        index += 1;
    };

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    fonts.set(font_name.clone(), font_id);
    resources.set("Font", fonts);

    page_dict_mut(doc, page_id)?.set("Resources", resources);
    Ok(font_name)
}

/// Text drawn at the stamp origin, rotated with the page so it reads upright.
fn text_operations(
    font_name: &[u8],
    text: Vec<u8>,
    geometry: StampGeometry,
    rotation: PageRotation,
    font_size: f64,
) -> Vec<Operation> {
    let (sin, cos) = rotation.radians().sin_cos();
    let matrix = [snap(cos), snap(sin), snap(-sin), snap(cos), geometry.x, geometry.y];

    vec![
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![
                Object::Name(font_name.to_vec()),
                Object::Real(font_size as f32),
            ],
        ),
        Operation::new("g", vec![Object::Integer(0)]),
        // lopdf stores reals as f32; page coordinates stay well inside its precision.
        Operation::new(
            "Tm",
            matrix.iter().map(|v| Object::Real(*v as f32)).collect(),
        ),
        Operation::new("Tj", vec![Object::String(text, StringFormat::Literal)]),
        Operation::new("ET", vec![]),
    ]
}

// sin/cos of quarter turns leave ~1e-16 residues.
fn snap(value: f64) -> f64 {
    if value.abs() < 1e-12 {
        0.0
    } else {
        value
    }
}

fn encode_content(operations: Vec<Operation>) -> Result<Vec<u8>, StampError> {
    Content { operations }
        .encode()
        .map_err(|e| StampError::Content(e.to_string()))
}

/// Wrap the existing page content in `q`/`Q` and append the stamp after it.
fn append_to_page(
    doc: &mut Document,
    page_id: ObjectId,
    stamp: Vec<Operation>,
) -> Result<(), StampError> {
    let existing: Vec<Object> = {
        let page = doc
            .get_object(page_id)
            .and_then(|o| o.as_dict())
            .map_err(|e| StampError::InvalidPage(format!("failed to get page dictionary: {e}")))?;
        match page.get(b"Contents") {
            Ok(Object::Reference(id)) => match doc.get_object(*id) {
                Ok(Object::Array(items)) => items.clone(),
                _ => vec![Object::Reference(*id)],
            },
            Ok(Object::Array(items)) => items.clone(),
            Ok(other) => {
                return Err(StampError::InvalidPage(format!(
                    "unexpected /Contents object: {other:?}"
                )))
            }
            Err(_) => Vec::new(),
        }
    };

    let save_state = encode_content(vec![Operation::new("q", vec![])])?;
    let mut restore_and_stamp = vec![Operation::new("Q", vec![])];
    restore_and_stamp.extend(stamp);
    let stamp_content = encode_content(restore_and_stamp)?;

    let save_id = doc.add_object(Stream::new(Dictionary::new(), save_state));
    let stamp_id = doc.add_object(Stream::new(Dictionary::new(), stamp_content));

    let mut contents = Vec::with_capacity(existing.len() + 2);
    contents.push(Object::Reference(save_id));
    contents.extend(existing);
    contents.push(Object::Reference(stamp_id));

    page_dict_mut(doc, page_id)?.set("Contents", Object::Array(contents));
    Ok(())
}
