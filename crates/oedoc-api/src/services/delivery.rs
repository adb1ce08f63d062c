//! Delivery decisions for resolved documents and misses.
//!
//! Everything here is pure: the handlers supply the resolved record, the
//! request options and the blob timestamp, and turn the decision into an
//! HTTP response.

use chrono::{DateTime, Duration, Utc};
use oedoc_core::{DocumentRecord, RequestedDocument};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS, NON_ALPHANUMERIC};

use super::PublicUrls;

/// Characters left untouched by JavaScript's `encodeURI`.
const ENCODE_URI: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b';')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'#');

/// Bytes that cannot appear inside a quoted header filename.
const QUOTED_FILENAME: &AsciiSet = &CONTROLS.add(b'"').add(b'\\');

/// `Expires` never lies further than one year from now.
const MAX_EXPIRES_SECS: i64 = 365 * 24 * 60 * 60;

/// Request options that influence delivery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryOptions {
    /// `?show`: display in the browser instead of downloading.
    pub inline: bool,
    /// `?swp`: answer a miss with a single white pixel.
    pub white_pixel: bool,
    /// The `Accept` header lists `image/svg+xml`.
    pub accepts_svg: bool,
}

impl DeliveryOptions {
    pub fn disposition(&self) -> Disposition {
        if self.inline {
            Disposition::Inline
        } else {
            Disposition::Attachment
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Inline,
    Attachment,
}

impl Disposition {
    pub fn as_str(self) -> &'static str {
        match self {
            Disposition::Inline => "inline",
            Disposition::Attachment => "attachment",
        }
    }
}

/// A localized "no picture" image shipped with the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder {
    pub file_name: &'static str,
    pub content_type: &'static str,
}

/// What to send when a resolved record's blob exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitDecision {
    /// 307 to the thumbnail service.
    Redirect(String),
    /// Stream (or stamp) the blob.
    Deliver,
}

/// What to send when resolution found nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissDecision {
    WhitePixel,
    Placeholder(Placeholder),
    NotFound,
}

/// Headers of a delivered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeaders {
    pub content_type: String,
    pub content_disposition: String,
    pub cache_control: String,
    pub expires: String,
    pub last_modified: String,
    pub document_guid: String,
}

#[derive(Clone, Debug)]
pub struct DeliverySelector {
    urls: PublicUrls,
}

impl DeliverySelector {
    pub fn new(urls: PublicUrls) -> Self {
        Self { urls }
    }

    /// `display-image` requests never receive bytes, only a redirect.
    pub fn on_hit(&self, request: &RequestedDocument, record: &DocumentRecord) -> HitDecision {
        if request.thumbnail {
            HitDecision::Redirect(self.urls.thumbnail_redirect(&record.guid))
        } else {
            HitDecision::Deliver
        }
    }

    pub fn on_miss(&self, request: &RequestedDocument, options: &DeliveryOptions) -> MissDecision {
        if options.white_pixel {
            MissDecision::WhitePixel
        } else if request.thumbnail {
            MissDecision::Placeholder(placeholder_for(&request.culture, options.accepts_svg))
        } else {
            MissDecision::NotFound
        }
    }

    pub fn file_headers(
        &self,
        record: &DocumentRecord,
        disposition: Disposition,
        last_modified: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> FileHeaders {
        FileHeaders {
            content_type: record.mime_type.clone(),
            content_disposition: content_disposition(record, disposition),
            cache_control: cache_control(record.max_age),
            expires: http_date(expires_at(now, record.max_age)),
            last_modified: http_date(last_modified),
            document_guid: record.guid_key(),
        }
    }
}

pub fn placeholder_for(culture: &str, svg: bool) -> Placeholder {
    let (file_name, content_type) = match (culture, svg) {
        ("nl", true) => ("404_nl.svg", "image/svg+xml"),
        ("fr", true) => ("404_fr.svg", "image/svg+xml"),
        (_, true) => ("404.svg", "image/svg+xml"),
        ("nl", false) => ("404_nl.png", "image/png"),
        ("fr", false) => ("404_fr.png", "image/png"),
        (_, false) => ("404.png", "image/png"),
    };
    Placeholder {
        file_name,
        content_type,
    }
}

/// `now + max_age`, with `max_age` clamped to one year either way.
pub fn expires_at(now: DateTime<Utc>, max_age: i64) -> DateTime<Utc> {
    let max_age = max_age.clamp(-MAX_EXPIRES_SECS, MAX_EXPIRES_SECS);
    Duration::try_seconds(max_age)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .unwrap_or(now)
}

pub fn cache_control(max_age: i64) -> String {
    format!("must-revalidate, max-age={}, private", max_age)
}

/// IMF-fixdate, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`.
pub fn http_date(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

pub fn encode_uri(value: &str) -> String {
    utf8_percent_encode(value, ENCODE_URI).to_string()
}

/// Attachments carry the display name in both the plain and the RFC 5987
/// form; inline files get a synthetic `<type>_<item>.<ext>` name, written
/// as-is apart from non-ASCII, control, quote and backslash bytes.
pub fn content_disposition(record: &DocumentRecord, disposition: Disposition) -> String {
    let filename = match disposition {
        Disposition::Attachment => {
            let encoded = encode_uri(&record.name);
            format!("filename=\"{}\"; filename*=UTF-8''{}", encoded, encoded)
        }
        Disposition::Inline => format!(
            "filename=\"{}\"",
            utf8_percent_encode(
                &format!(
                    "{}_{}.{}",
                    record.document_type, record.item_num, record.extension
                ),
                QUOTED_FILENAME
            )
        ),
    };
    format!("{}; {}", disposition.as_str(), filename)
}
