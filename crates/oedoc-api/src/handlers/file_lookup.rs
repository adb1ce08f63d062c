use crate::error::{ErrorResponse, HttpAppError, ValidatedPath};
use crate::handlers::file::DocumentPath;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use oedoc_core::{AppError, DocumentRecord};
use std::sync::Arc;

/// Resolve a document's record without delivering it.
///
/// The common catalog is searched without operating-company scoping and the
/// `bra` picture fallback does not apply here.
#[utoipa::path(
    get,
    path = "/file/uuid/{company}/{objectType}/{documentType}/{objectId}/{culture}",
    tag = "files",
    params(
        ("company" = String, Path, description = "Requesting OE company code"),
        ("objectType" = String, Path, description = "Object type, e.g. artikel"),
        ("documentType" = String, Path, description = "Document type; display-image is looked up as foto"),
        ("objectId" = i64, Path, description = "Business object id"),
        ("culture" = String, Path, description = "Culture, e.g. nl or fr")
    ),
    responses(
        (status = 200, description = "The resolved record", body = [DocumentRecord]),
        (status = 400, description = "Malformed parameters", body = ErrorResponse),
        (status = 404, description = "Document not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "lookup_file"))]
pub async fn lookup_file(
    State(state): State<Arc<AppState>>,
    ValidatedPath(path): ValidatedPath<DocumentPath>,
) -> Result<impl IntoResponse, HttpAppError> {
    let request = path.into_request();

    let record = state
        .resolver()
        .resolve_metadata(&request)
        .await?
        .ok_or_else(|| AppError::NotFound("Document not found".to_string()))?;

    Ok(Json(vec![record]))
}
