//! Application error taxonomy.
//!
//! Every failure a request can hit is an [`AppError`]. Callers branch on
//! [`AppError::kind`] rather than on message text, and the HTTP mapping lives
//! in the `IntoResponse` impl so handlers can simply use `?`.
//!
//! Driver messages never reach clients: database errors are reduced to a
//! sanitized message here and the driver text is only logged.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use sqlx::error::ErrorKind as DbErrorKind;
use thiserror::Error;

use crate::response::ApiResponse;

pub type AppResult<T> = Result<T, AppError>;

/// Classification used to pick the response status and log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad or missing input; never reaches the database.
    Validation,
    /// A business rule refused the request.
    Conflict,
    /// Missing or invalid credentials.
    Auth,
    NotFound,
    /// The database could not be reached.
    Connection,
    /// The database rejected a statement.
    Query,
    Internal,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::Validation | ErrorKind::Conflict | ErrorKind::Query => StatusCode::BAD_REQUEST,
            ErrorKind::Auth => StatusCode::UNAUTHORIZED,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Connection => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error("Email already registered")]
    EmailAlreadyRegistered,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    /// Database unreachable. The payload is the driver message, for logs only.
    #[error("Database connection failed: {0}")]
    DatabaseConnection(String),

    /// Statement rejected. The payload is already sanitized.
    #[error("{0}")]
    DatabaseQuery(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::MissingField(_) | AppError::Validation(_) => ErrorKind::Validation,
            AppError::EmailAlreadyRegistered => ErrorKind::Conflict,
            AppError::InvalidCredentials | AppError::Unauthorized(_) => ErrorKind::Auth,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::DatabaseConnection(_) => ErrorKind::Connection,
            AppError::DatabaseQuery(_) => ErrorKind::Query,
            AppError::Config(_) | AppError::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.kind().status()
    }

    /// Machine-readable code placed in the response envelope.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::MissingField(_) => "MISSING_FIELD",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::EmailAlreadyRegistered => "EMAIL_ALREADY_REGISTERED",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::DatabaseConnection(_) => "DATABASE_UNAVAILABLE",
            AppError::DatabaseQuery(_) => "QUERY_ERROR",
            AppError::Config(_) | AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message that is safe to show to clients.
    pub fn user_message(&self) -> String {
        match self {
            AppError::DatabaseConnection(_) => "Database connection failed".to_string(),
            AppError::Unauthorized(_) => "Missing or invalid access token".to_string(),
            AppError::Config(_) | AppError::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self.kind() {
            ErrorKind::Connection | ErrorKind::Internal => {
                tracing::error!(error = %self, "request failed");
            }
            _ => tracing::debug!(error = %self, "request rejected"),
        }

        let body = ApiResponse::err(self.code(), self.user_message());
        (self.status_code(), Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => AppError::DatabaseConnection(err.to_string()),
            sqlx::Error::Database(db_err) => {
                tracing::warn!(error = %db_err, code = ?db_err.code(), "statement rejected by database");
                let message = match db_err.kind() {
                    DbErrorKind::UniqueViolation => "Duplicate entry violates a unique constraint",
                    DbErrorKind::ForeignKeyViolation => "Referenced record does not exist",
                    DbErrorKind::NotNullViolation => "A required value is missing",
                    DbErrorKind::CheckViolation => "A value is outside the allowed range",
                    _ => "Database query failed",
                };
                AppError::DatabaseQuery(message.to_string())
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort();
        AppError::Validation(format!("Invalid value for field: {}", fields.join(", ")))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let detail = rejection.body_text();
        tracing::debug!(error = %detail, "unreadable request body");
        let message = match rejection {
            // "Failed to deserialize ...: <field>: <problem>"
            JsonRejection::JsonDataError(_) => format!(
                "Invalid request data: {}",
                detail.split_once(": ").map_or(detail.as_str(), |(_, rest)| rest)
            ),
            JsonRejection::JsonSyntaxError(_) => "Malformed JSON body".to_string(),
            JsonRejection::MissingJsonContentType(_) => {
                "Expected request with `Content-Type: application/json`".to_string()
            }
            _ => crate::middleware::json_body::NO_INPUT.to_string(),
        };
        AppError::Validation(message)
    }
}
