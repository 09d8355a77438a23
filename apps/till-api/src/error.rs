//! Error types for the Till API.
//!
//! Every failure a handler can produce ends up here and leaves as
//! `{"error": <message>, "code": <CODE>}` with the matching status.
//!
//! | Variant | Status | Code |
//! |---|---|---|
//! | `Validation` | 400 | `VALIDATION_ERROR` |
//! | `InvalidCredentials` | 401 | `INVALID_CREDENTIALS` |
//! | `Unauthorized` | 401 | `UNAUTHORIZED` |
//! | `NotFound` | 404 | `NOT_FOUND` |
//! | `InsufficientStock` | 409 | `INSUFFICIENT_STOCK` |
//! | `TotalMismatch` | 422 | `TOTAL_MISMATCH` |
//! | `TransactionFailed` | 500 | `TRANSACTION_FAILED` |
//! | `Storage` | 500 | `STORAGE_ERROR` |
//! | `Internal` | 500 | `INTERNAL_ERROR` |
//! | `Unavailable` | 503 | `SERVICE_UNAVAILABLE` |

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{debug, error};

use till_core::{CoreError, ValidationError};
use till_db::DbError;

/// Till API errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InsufficientStock(String),

    #[error("{0}")]
    TotalMismatch(String),

    #[error("Order failed and was rolled back: {0}")]
    TransactionFailed(String),

    #[error("Database error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials | ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InsufficientStock(_) => StatusCode::CONFLICT,
            ApiError::TotalMismatch(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::TransactionFailed(_) | ApiError::Storage(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::InvalidCredentials => "INVALID_CREDENTIALS",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::InsufficientStock(_) => "INSUFFICIENT_STOCK",
            ApiError::TotalMismatch(_) => "TOTAL_MISMATCH",
            ApiError::TransactionFailed(_) => "TRANSACTION_FAILED",
            ApiError::Storage(_) => "STORAGE_ERROR",
            ApiError::Internal(_) => "INTERNAL_ERROR",
            ApiError::Unavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!(status = status.as_u16(), code = self.code(), error = %self, "Request failed");
        } else {
            debug!(status = status.as_u16(), code = self.code(), error = %self, "Request rejected");
        }

        let body = ErrorBody {
            error: self.to_string(),
            code: self.code(),
        };

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(v) => v.into(),
            CoreError::OrderTooLarge { .. } | CoreError::AmountOverflow { .. } => {
                ApiError::Validation(err.to_string())
            }
            CoreError::InsufficientStock { .. } => ApiError::InsufficientStock(err.to_string()),
            CoreError::TotalMismatch { .. } => ApiError::TotalMismatch(err.to_string()),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Rejected(core) => core.into(),
            DbError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            DbError::TransactionFailed(cause) => ApiError::TransactionFailed(cause),
            other => ApiError::Storage(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}
