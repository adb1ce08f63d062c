//! Error types module
//!
//! All request-level failures are unified under [`AppError`]. A resolution
//! miss is a `NotFound`, an unverified listing is `Unauthorized`, and
//! repository or blob-store faults are `Database`/`Storage`. Stamping
//! failures never reach this type; the stamping engine degrades to
//! pass-through delivery instead.
//!
//! The `Database` variant and `From<sqlx::Error>` are gated behind the `sqlx` feature.

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Expected outcomes: misses and malformed parameters
    Debug,
    /// Refused requests
    Warn,
    /// Faults in the store, the disk or the service itself
    Error,
}

/// How an error is presented to clients and operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorClass {
    pub status: u16,
    /// Machine-readable code, e.g. `NOT_FOUND`
    pub code: &'static str,
    /// Whether retrying the same request may succeed
    pub recoverable: bool,
    pub suggested_action: Option<&'static str>,
    /// Sensitive errors never expose their internal message
    pub sensitive: bool,
    pub log_level: LogLevel,
}

const FAULT_RETRY: Option<&str> = Some("Retry after a short delay");

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error: {message}")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl AppError {
    pub fn class(&self) -> ErrorClass {
        match self {
            AppError::Database(_) => ErrorClass {
                status: 500,
                code: "DATABASE_ERROR",
                recoverable: true,
                suggested_action: FAULT_RETRY,
                sensitive: true,
                log_level: LogLevel::Error,
            },
            AppError::Storage(_) => ErrorClass {
                status: 500,
                code: "STORAGE_ERROR",
                recoverable: true,
                suggested_action: FAULT_RETRY,
                sensitive: true,
                log_level: LogLevel::Error,
            },
            AppError::InvalidInput(_) => ErrorClass {
                status: 400,
                code: "INVALID_INPUT",
                recoverable: false,
                suggested_action: Some("Check request parameters and try again"),
                sensitive: false,
                log_level: LogLevel::Debug,
            },
            AppError::NotFound(_) => ErrorClass {
                status: 404,
                code: "NOT_FOUND",
                recoverable: false,
                suggested_action: Some("Verify the document identity exists"),
                sensitive: false,
                log_level: LogLevel::Debug,
            },
            AppError::Unauthorized(_) => ErrorClass {
                status: 401,
                code: "UNAUTHORIZED",
                recoverable: false,
                suggested_action: Some("Sign in again and retry"),
                sensitive: false,
                log_level: LogLevel::Warn,
            },
            AppError::Internal(_) | AppError::InternalWithSource { .. } => ErrorClass {
                status: 500,
                code: "INTERNAL_ERROR",
                recoverable: true,
                suggested_action: FAULT_RETRY,
                sensitive: true,
                log_level: LogLevel::Error,
            },
        }
    }

    /// Variant name, reported alongside details outside production.
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Database(_) => "Database",
            AppError::Storage(_) => "Storage",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::NotFound(_) => "NotFound",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::Internal(_) | AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Message safe to hand to any client.
    pub fn client_message(&self) -> String {
        match self {
            AppError::Database(_) => "Failed to access database".to_string(),
            AppError::Storage(_) => "Failed to access storage".to_string(),
            AppError::InvalidInput(msg) | AppError::NotFound(msg) | AppError::Unauthorized(msg) => {
                msg.clone()
            }
            AppError::Internal(_) | AppError::InternalWithSource { .. } => {
                "Internal server error".to_string()
            }
        }
    }

    /// Display text followed by up to five `Caused by:` lines.
    pub fn detailed_message(&self) -> String {
        let mut details = self.to_string();
        let mut source = std::error::Error::source(self);
        for _ in 0..5 {
            let Some(err) = source else {
                return details;
            };
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }
        if source.is_some() {
            details.push_str("\n  ... (truncated)");
        }
        details
    }
}
