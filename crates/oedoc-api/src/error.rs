//! Rendering of [`AppError`] as JSON error responses.
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`. Anything that
//! converts into [`AppError`] can be propagated with `?` and is rendered
//! consistently (status, JSON body, log level).

use axum::{
    extract::rejection::PathRejection,
    extract::{FromRequestParts, Path},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use oedoc_core::{AppError, LogLevel};
use oedoc_storage::StorageError;
use serde::{de::DeserializeOwned, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// e.g. `NOT_FOUND`, `UNAUTHORIZED`
    pub code: String,
    pub recoverable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

impl ErrorResponse {
    fn from_app_error(app_error: &AppError, with_details: bool) -> Self {
        let class = app_error.class();
        Self {
            error: app_error.client_message(),
            details: with_details.then(|| app_error.detailed_message()),
            error_type: with_details.then(|| app_error.error_type().to_string()),
            code: class.code.to_string(),
            recoverable: class.recoverable,
            suggested_action: class.suggested_action.map(String::from),
        }
    }
}

/// [`AppError`] as an axum response; `AppError` itself lives in oedoc-core.
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(source: anyhow::Error) -> Self {
        HttpAppError(source.into())
    }
}

impl From<StorageError> for HttpAppError {
    fn from(source: StorageError) -> Self {
        HttpAppError(source.into())
    }
}

/// Malformed path segments (a guid that is not a UUID, a non-numeric object id).
impl From<PathRejection> for HttpAppError {
    fn from(rejection: PathRejection) -> Self {
        HttpAppError(AppError::InvalidInput(format!(
            "Invalid path parameter: {}",
            rejection.body_text()
        )))
    }
}

/// Path extractor that answers with our ErrorResponse format (400 + JSON)
/// instead of axum's plain-text rejection.
#[derive(Debug, Clone)]
pub struct ValidatedPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(inner) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(HttpAppError::from)?;
        Ok(ValidatedPath(inner))
    }
}

fn log_error(error: &AppError, level: LogLevel) {
    let kind = error.error_type();
    match level {
        LogLevel::Debug => tracing::debug!(error = %error, kind, "Request failed"),
        LogLevel::Warn => tracing::warn!(error = %error, kind, "Request refused"),
        LogLevel::Error => tracing::error!(error = %error, kind, "Request failed"),
    }
}

/// Mirrors `Config::is_production`.
fn is_production_env() -> bool {
    ["ENVIRONMENT", "APP_ENV"]
        .iter()
        .find_map(|key| std::env::var(key).ok())
        .is_some_and(|env| matches!(env.to_lowercase().as_str(), "production" | "prod"))
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;
        let class = app_error.class();

        let status =
            StatusCode::from_u16(class.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error, class.log_level);

        // Details only leave the process outside production, and never for sensitive errors.
        let with_details = !is_production_env() && !class.sensitive;
        let body = Json(ErrorResponse::from_app_error(app_error, with_details));

        (status, body).into_response()
    }
}
