//! Error conversions
//!
//! SQLSTATE helpers used by the persistence adapters to translate
//! constraint violations, and the RFC 7807 rendering of [`AppError`].

#[cfg(feature = "axum")]
use super::app_error::AppError;

// ============================================================================
// SQLx helpers (feature-gated)
// ============================================================================

/// PostgreSQL SQLSTATE for `unique_violation`
pub const PG_UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL SQLSTATE for `foreign_key_violation`
pub const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

/// Whether the error is the given SQLSTATE raised by the database
#[cfg(feature = "sqlx")]
pub fn is_db_error_code(err: &sqlx::Error, sqlstate: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(sqlstate),
        _ => false,
    }
}

/// Whether the error is a unique-constraint violation
#[cfg(feature = "sqlx")]
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    is_db_error_code(err, PG_UNIQUE_VIOLATION)
}

/// Whether the error is a foreign-key violation
#[cfg(feature = "sqlx")]
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    is_db_error_code(err, PG_FOREIGN_KEY_VIOLATION)
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details for HTTP APIs
        let body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": self.message(),
            "action": self.action(),
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    #[cfg(feature = "sqlx")]
    use super::*;

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_non_database_errors_are_not_violations() {
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
        assert!(!is_foreign_key_violation(&sqlx::Error::PoolTimedOut));
    }

    #[cfg(feature = "axum")]
    #[tokio::test]
    async fn test_problem_document_shape() {
        use axum::response::IntoResponse;

        use super::AppError;

        let response = AppError::conflict("tag name already exists")
            .with_action("Choose a different name")
            .into_response();
        assert_eq!(response.status(), axum::http::StatusCode::CONFLICT);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], 409);
        assert_eq!(body["title"], "Conflict");
        assert_eq!(body["detail"], "tag name already exists");
        assert_eq!(body["action"], "Choose a different name");
    }
}
