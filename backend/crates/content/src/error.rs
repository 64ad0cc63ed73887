//! Content Error Types
//!
//! Content-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::value_objects::FieldError;

/// Content-specific result type alias
pub type ContentResult<T> = Result<T, ContentError>;

/// Content-specific error variants
#[derive(Debug, Error)]
pub enum ContentError {
    /// Input failed validation or referenced an unknown row
    #[error("{0}")]
    Validation(String),

    /// Name collision, or a delete blocked by existing references
    #[error("{0}")]
    Conflict(String),

    /// Id does not resolve to an existing row
    #[error("{0}")]
    NotFound(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ContentError {
    pub fn invalid_category() -> Self {
        ContentError::Validation("invalid category".to_string())
    }

    pub fn invalid_tag() -> Self {
        ContentError::Validation("invalid tag".to_string())
    }

    pub fn invalid_user() -> Self {
        ContentError::Validation("invalid user".to_string())
    }

    pub fn name_taken(label: &str) -> Self {
        ContentError::Conflict(format!("{label} name already exists"))
    }

    pub fn not_found(label: &str) -> Self {
        ContentError::NotFound(format!("{label} not found"))
    }

    /// A term that posts still reference
    pub fn in_use(label: &str) -> Self {
        ContentError::Conflict(format!("{label} is still in use"))
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ContentError::Validation(_) => StatusCode::BAD_REQUEST,
            ContentError::Conflict(_) => StatusCode::CONFLICT,
            ContentError::NotFound(_) => StatusCode::NOT_FOUND,
            ContentError::Database(_) | ContentError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContentError::Validation(_) => ErrorKind::BadRequest,
            ContentError::Conflict(_) => ErrorKind::Conflict,
            ContentError::NotFound(_) => ErrorKind::NotFound,
            ContentError::Database(_) | ContentError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            ContentError::Database(_) | ContentError::Internal(_) => {
                AppError::internal("internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            ContentError::Database(e) => {
                tracing::error!(error = %e, "Content database error");
            }
            ContentError::Internal(msg) => {
                tracing::error!(message = %msg, "Content internal error");
            }
            ContentError::Conflict(msg) => {
                tracing::info!(message = %msg, "Content conflict");
            }
            _ => {
                tracing::debug!(error = %self, "Content error");
            }
        }
    }
}

impl IntoResponse for ContentError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<FieldError> for ContentError {
    fn from(err: FieldError) -> Self {
        ContentError::Validation(err.to_string())
    }
}

// Extractor rejections render as problem documents like every other input error

impl From<JsonRejection> for ContentError {
    fn from(rejection: JsonRejection) -> Self {
        ContentError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ContentError {
    fn from(rejection: PathRejection) -> Self {
        ContentError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ContentError {
    fn from(rejection: QueryRejection) -> Self {
        ContentError::Validation(rejection.body_text())
    }
}
