use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use utoipa::ToSchema;

const BAD_REQUEST_TITLE: &str = "Bad Request! Consult the documentation";
const CONFLICT_TITLE: &str = "Conflict! Consult the documentation";

/// Uniform error body returned by every failing endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ExceptionDetails {
    /// Short summary of the failure class.
    pub title: String,
    /// Moment the response was produced.
    pub timestamp: DateTime<Utc>,
    /// HTTP status code, repeated in the body.
    pub status: u16,
    /// Error kind identifier.
    pub exception: String,
    /// Failing field (or "error") mapped to its message.
    pub details: BTreeMap<String, String>,
}

/// Application-specific error types.
#[derive(Debug)]
pub enum AppError {
    /// Database-related errors.
    Database(sqlx::Error),
    /// Field-level validation failures, keyed by field name.
    Validation(BTreeMap<String, String>),
    /// Domain-rule failures: invalid issuance date, unknown customer id, unknown credit code.
    Business(String),
    /// Unique-constraint conflict; carries the violated constraint name.
    Conflict(String),
    /// Opaque denial. The caller is not told whether the resource exists.
    InvalidArgument(String),
}

impl fmt::Display for AppError {
    /// Formats the error for display.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Database(e) => write!(f, "Database error: {}", e),
            AppError::Validation(fields) => {
                write!(f, "Validation failed for {} field(s)", fields.len())
            }
            AppError::Business(msg) => write!(f, "Business rule violated: {}", msg),
            AppError::Conflict(constraint) => write!(f, "Conflict on {}", constraint),
            AppError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
        }
    }
}

impl From<sqlx::Error> for AppError {
    /// Converts a `sqlx::Error` into an `AppError`.
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err)
    }
}

impl IntoResponse for AppError {
    /// Converts the error into an HTTP response.
    ///
    /// Maps each error variant to an appropriate HTTP status code and the
    /// uniform `ExceptionDetails` JSON body. Logs errors appropriately based
    /// on their severity.
    fn into_response(self) -> Response {
        let (status, title, exception, details) = match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                    "DatabaseError".to_string(),
                    BTreeMap::from([(
                        "error".to_string(),
                        "Internal server error".to_string(),
                    )]),
                )
            }
            AppError::Validation(fields) => (
                StatusCode::BAD_REQUEST,
                BAD_REQUEST_TITLE.to_string(),
                "ValidationError".to_string(),
                fields,
            ),
            AppError::Business(msg) => (
                StatusCode::BAD_REQUEST,
                BAD_REQUEST_TITLE.to_string(),
                "BusinessError".to_string(),
                BTreeMap::from([("error".to_string(), msg)]),
            ),
            AppError::Conflict(constraint) => {
                tracing::warn!("Unique constraint violated: {}", constraint);
                (
                    StatusCode::CONFLICT,
                    CONFLICT_TITLE.to_string(),
                    "DataIntegrityError".to_string(),
                    BTreeMap::from([(
                        constraint,
                        "duplicate value violates a unique constraint".to_string(),
                    )]),
                )
            }
            AppError::InvalidArgument(msg) => (
                StatusCode::BAD_REQUEST,
                BAD_REQUEST_TITLE.to_string(),
                "InvalidArgumentError".to_string(),
                BTreeMap::from([("error".to_string(), msg)]),
            ),
        };

        let body = ExceptionDetails {
            title,
            timestamp: Utc::now(),
            status: status.as_u16(),
            exception,
            details,
        };

        (status, Json(body)).into_response()
    }
}
