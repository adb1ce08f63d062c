//! Business constants shared across the service.

/// Synthetic company code holding the shared ("general") catalog.
pub const COMMON_COMPANY: &str = "alg";

/// Operating companies whose catalogs may inherit common content.
pub const OE_COMPANIES: [&str; 3] = ["gro", "bra", "alg"];

/// Company whose pictures fall back to [`BRA_FALLBACK_COMPANY`].
pub const BRA_COMPANY: &str = "bra";
pub const BRA_FALLBACK_COMPANY: &str = "gro";

pub const OBJECT_TYPE_ARTICLE: &str = "artikel";

pub const DOC_TYPE_PICTURE: &str = "foto";
pub const DOC_TYPE_DATASHEET: &str = "datasheet";
pub const DOC_TYPE_TECHNICAL_SHEET: &str = "technische-fiche";
/// Request-facing alias for [`DOC_TYPE_PICTURE`] served as a thumbnail redirect.
pub const DOC_TYPE_DISPLAY_IMAGE: &str = "display-image";

pub const MIME_TYPE_PDF: &str = "application/pdf";

/// Document types that may come from the common catalog.
pub const COMMON_TIER_DOC_TYPES: [&str; 3] =
    [DOC_TYPE_PICTURE, DOC_TYPE_DATASHEET, DOC_TYPE_TECHNICAL_SHEET];

/// Document types that carry the identifying stamp.
pub const STAMPED_DOC_TYPES: [&str; 2] = [DOC_TYPE_DATASHEET, DOC_TYPE_TECHNICAL_SHEET];

// Stamp carve-out for company 2: object ids in this closed band are only
// stamped when changed on or after the cutoff date.
pub const STAMP_ALWAYS_COMPANY_IDS: [i32; 2] = [4, 8];
pub const STAMP_BANDED_COMPANY_ID: i32 = 2;
pub const STAMP_BAND_START: i64 = 1_500_000_000;
pub const STAMP_BAND_END: i64 = 1_509_999_999;
pub const STAMP_CUTOFF: (i32, u32, u32) = (2022, 10, 1);

/// Fixed stamp layout, in PDF user-space units.
pub const STAMP_MARGIN_X: f64 = 10.0;
pub const STAMP_MARGIN_Y: f64 = 10.0;
pub const STAMP_FONT_SIZE: f64 = 10.0;

/// Cache lifetime of the white-pixel placeholder (two days).
pub const WHITE_PIXEL_MAX_AGE_SECS: i64 = 172_800;
