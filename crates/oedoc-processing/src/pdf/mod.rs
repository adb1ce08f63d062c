//! PDF stamping module

mod objects;
pub mod rotation;
pub mod stamper;

pub use rotation::{stamp_geometry, PageRotation, StampGeometry, StampLayout};
pub use stamper::{PdfStamper, StampError, StampOutcome};
