use crate::constants::{
    HEADER_DOCUMENT_GUID, HEADER_IMAGE_COLOR, HEADER_SHOULD_MODIFY_PDF, WHITE_PIXEL_COLOR,
    WHITE_PIXEL_GIF_BASE64,
};
use crate::error::{ErrorResponse, HttpAppError, ValidatedPath};
use crate::services::delivery::cache_control;
use crate::services::{DeliveryOptions, Disposition, HitDecision, MissDecision, Placeholder};
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, HeaderMap, Response, StatusCode},
    response::{IntoResponse, Redirect},
};
use base64::Engine;
use chrono::Utc;
use futures::StreamExt;
use oedoc_core::constants::WHITE_PIXEL_MAX_AGE_SECS;
use oedoc_core::{must_stamp, AppError, DocumentRecord, RequestedDocument};
use oedoc_processing::StampOutcome;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Identifying parameters of a parameterized lookup.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPath {
    pub company: String,
    pub object_type: String,
    pub document_type: String,
    pub object_id: i64,
    pub culture: String,
}

impl DocumentPath {
    pub fn into_request(self) -> RequestedDocument {
        RequestedDocument::new(
            &self.company,
            &self.object_type,
            &self.document_type,
            self.object_id,
            &self.culture,
        )
    }
}

/// `show` and `swp` are presence flags; their values are ignored.
fn delivery_options(query: &HashMap<String, String>, headers: &HeaderMap) -> DeliveryOptions {
    let accepts_svg = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|accept| accept.contains("image/svg+xml"))
        .unwrap_or(false);

    DeliveryOptions {
        inline: query.contains_key("show"),
        white_pixel: query.contains_key("swp"),
        accepts_svg,
    }
}

#[utoipa::path(
    get,
    path = "/file/{guid}",
    tag = "files",
    params(
        ("guid" = Uuid, Path, description = "Document identifier"),
        ("show" = Option<String>, Query, description = "Present: display inline instead of downloading")
    ),
    responses(
        (status = 200, description = "Document file, stamped when it qualifies", content_type = "application/octet-stream"),
        (status = 400, description = "Malformed identifier", body = ErrorResponse),
        (status = 404, description = "Document or file not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, query, headers),
    fields(document_guid = %guid, operation = "get_file_by_guid")
)]
pub async fn get_file_by_guid(
    State(state): State<Arc<AppState>>,
    ValidatedPath(guid): ValidatedPath<Uuid>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Result<Response<Body>, HttpAppError> {
    let options = delivery_options(&query, &headers);

    let record = state
        .resolver()
        .find_by_guid(guid)
        .await?
        .ok_or_else(|| AppError::NotFound("Document not found".to_string()))?;

    ensure_blob(&state, &record).await?;
    deliver(&state, &record, options.disposition()).await
}

#[utoipa::path(
    get,
    path = "/file/{company}/{objectType}/{documentType}/{objectId}/{culture}",
    tag = "files",
    params(
        ("company" = String, Path, description = "Requesting OE company code, e.g. gro"),
        ("objectType" = String, Path, description = "Object type, e.g. artikel"),
        ("documentType" = String, Path, description = "Document type; display-image redirects to the thumbnail service"),
        ("objectId" = i64, Path, description = "Business object id"),
        ("culture" = String, Path, description = "Culture, e.g. nl or fr"),
        ("show" = Option<String>, Query, description = "Present: display inline instead of downloading"),
        ("swp" = Option<String>, Query, description = "Present: answer a miss with a single white pixel")
    ),
    responses(
        (status = 200, description = "Document file or placeholder image", content_type = "application/octet-stream"),
        (status = 307, description = "Redirect to the thumbnail service"),
        (status = 400, description = "Malformed parameters", body = ErrorResponse),
        (status = 404, description = "Document or file not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, query, headers), fields(operation = "get_file"))]
pub async fn get_file(
    State(state): State<Arc<AppState>>,
    ValidatedPath(path): ValidatedPath<DocumentPath>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Result<Response<Body>, HttpAppError> {
    let request = path.into_request();
    let options = delivery_options(&query, &headers);
    let delivery = state.delivery();

    let Some(record) = state.resolver().resolve_for_delivery(&request).await? else {
        tracing::debug!(
            company = %request.company,
            document_type = %request.document_type,
            object_id = request.object_id,
            "No document resolved"
        );
        return miss(&state, delivery.on_miss(&request, &options)).await;
    };

    ensure_blob(&state, &record).await?;

    match delivery.on_hit(&request, &record) {
        HitDecision::Redirect(url) => Ok(Redirect::temporary(&url).into_response()),
        HitDecision::Deliver => deliver(&state, &record, options.disposition()).await,
    }
}

async fn ensure_blob(state: &AppState, record: &DocumentRecord) -> Result<(), HttpAppError> {
    if state.blobs.exists(&record.guid).await? {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("File '{}' not found", record.guid_key())).into())
    }
}

async fn deliver(
    state: &AppState,
    record: &DocumentRecord,
    disposition: Disposition,
) -> Result<Response<Body>, HttpAppError> {
    let last_modified = state.blobs.last_modified(&record.guid).await?;
    let file_headers = state
        .delivery()
        .file_headers(record, disposition, last_modified, Utc::now());

    let should_modify_pdf = must_stamp(record);
    let body = if should_modify_pdf {
        stamped_body(state, record).await?
    } else {
        stream_body(state, record).await?
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, file_headers.content_type)
        .header(header::CONTENT_DISPOSITION, file_headers.content_disposition)
        .header(header::CACHE_CONTROL, file_headers.cache_control)
        .header(header::EXPIRES, file_headers.expires)
        .header(header::LAST_MODIFIED, file_headers.last_modified)
        .header(HEADER_DOCUMENT_GUID, file_headers.document_guid)
        .header(HEADER_SHOULD_MODIFY_PDF, should_modify_pdf.to_string())
        .body(body)
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)).into())
}

async fn stream_body(state: &AppState, record: &DocumentRecord) -> Result<Body, HttpAppError> {
    let stream = state.blobs.open_read_stream(&record.guid).await?;
    let body_stream = stream.map(|result| {
        result.map_err(|e| std::io::Error::other(format!("Storage stream error: {}", e)))
    });
    Ok(Body::from_stream(body_stream))
}

/// Stamp the first page; any failure degrades to the original bytes.
async fn stamped_body(state: &AppState, record: &DocumentRecord) -> Result<Body, HttpAppError> {
    let original = match state.blobs.read(&record.guid).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(
                document_guid = %record.guid,
                error = %e,
                "Failed to read document for stamping, streaming it unmodified"
            );
            return stream_body(state, record).await;
        }
    };

    let stamper = state.stamper.clone();
    let document = record.clone();
    let stamped = tokio::task::spawn_blocking(move || match stamper.stamp(&original, &document) {
        StampOutcome::Stamped(bytes) => bytes,
        StampOutcome::PassThrough => original,
    })
    .await;

    match stamped {
        Ok(bytes) => Ok(Body::from(bytes)),
        Err(e) => {
            tracing::error!(
                document_guid = %record.guid,
                error = %e,
                "Stamping task failed, streaming document unmodified"
            );
            stream_body(state, record).await
        }
    }
}

async fn miss(state: &AppState, decision: MissDecision) -> Result<Response<Body>, HttpAppError> {
    match decision {
        MissDecision::WhitePixel => white_pixel(),
        MissDecision::Placeholder(placeholder) => placeholder_image(state, placeholder).await,
        MissDecision::NotFound => Err(AppError::NotFound("Document not found".to_string()).into()),
    }
}

fn white_pixel() -> Result<Response<Body>, HttpAppError> {
    let data = base64::engine::general_purpose::STANDARD
        .decode(WHITE_PIXEL_GIF_BASE64)
        .map_err(|e| AppError::Internal(format!("Invalid white pixel image: {}", e)))?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "image/gif")
        .header(header::CACHE_CONTROL, cache_control(WHITE_PIXEL_MAX_AGE_SECS))
        .header(HEADER_IMAGE_COLOR, WHITE_PIXEL_COLOR)
        .body(Body::from(data))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)).into())
}

async fn placeholder_image(
    state: &AppState,
    placeholder: Placeholder,
) -> Result<Response<Body>, HttpAppError> {
    let stream = state.assets.open(placeholder.file_name).await?;
    let body_stream = stream.map(|result| {
        result.map_err(|e| std::io::Error::other(format!("Asset stream error: {}", e)))
    });

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, placeholder.content_type)
        .body(Body::from_stream(body_stream))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)).into())
}
