//! HTTP-facing constants.

/// 1x1 white GIF served for `?swp` misses.
pub const WHITE_PIXEL_GIF_BASE64: &str = "R0lGODlhAQABAIAAAP///wAAACwAAAAAAQABAAACAkQBADs=";
pub const WHITE_PIXEL_COLOR: &str = "#FFFFFF";

pub const HEADER_DOCUMENT_GUID: &str = "document-guid";
pub const HEADER_SHOULD_MODIFY_PDF: &str = "should_modify_pdf";
pub const HEADER_IMAGE_COLOR: &str = "image-color";

/// The six placeholder files expected in the assets directory.
pub const PLACEHOLDER_ASSETS: [&str; 6] = [
    "404_nl.svg",
    "404_fr.svg",
    "404.svg",
    "404_nl.png",
    "404_fr.png",
    "404.png",
];

/// Timeout applied to dependency checks of `/ready`.
pub const READINESS_TIMEOUT_SECS: u64 = 5;
