use crate::error::{ErrorResponse, HttpAppError, ValidatedPath};
use crate::services::ObjectListEntry;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use utoipa::ToSchema;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectListPath {
    pub company: String,
    pub object_type: String,
    pub object_id: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ObjectListResponse {
    pub status: String,
    pub code: u16,
    pub data: Vec<ObjectListEntry>,
    /// Milliseconds spent assembling the listing.
    pub execution_time: f64,
}

#[utoipa::path(
    get,
    path = "/objectlist/{company}/{objectType}/{objectId}",
    tag = "objectlist",
    params(
        ("company" = String, Path, description = "Requesting OE company code"),
        ("objectType" = String, Path, description = "Object type, e.g. artikel"),
        ("objectId" = i64, Path, description = "Business object id")
    ),
    responses(
        (status = 200, description = "Documents attached to the object", body = ObjectListResponse),
        (status = 400, description = "Malformed parameters", body = ErrorResponse),
        (status = 401, description = "Listing not verified for the requesting company", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "get_object_list"))]
pub async fn get_object_list(
    State(state): State<Arc<AppState>>,
    ValidatedPath(path): ValidatedPath<ObjectListPath>,
) -> Result<impl IntoResponse, HttpAppError> {
    let start = Instant::now();

    let data = state
        .object_lists()
        .list(&path.company, &path.object_type, path.object_id)
        .await?;

    Ok(Json(ObjectListResponse {
        status: "success".to_string(),
        code: 200,
        data,
        execution_time: start.elapsed().as_secs_f64() * 1000.0,
    }))
}
