//! OE document processing
//!
//! First-page stamping of qualifying PDF documents.

pub mod pdf;

pub use pdf::{
    stamp_geometry, PageRotation, PdfStamper, StampError, StampGeometry, StampLayout,
    StampOutcome,
};
