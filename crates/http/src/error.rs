//! Error handling for the catalog HTTP layer
//!
//! Every error body is plain text. Server errors carry the underlying
//! failure message verbatim, prefixed with `Error: `.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use catalog_db::DbError;
use thiserror::Error;

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    /// First failing creation/update check, reported as-is
    #[error("{0}")]
    Validation(String),

    #[error("{entity} with ID {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// Decoding or storage failure
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a validation error
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation(reason.into())
    }

    /// Create a not found error for the given entity kind and identifier
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        Self::Internal(err.into())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            AppError::Internal(err) => {
                tracing::error!(
                    status_code = %status.as_u16(),
                    error = ?err,
                    "request failed"
                );
                format!("Error: {err}")
            }
            other => {
                tracing::warn!(
                    status_code = %status.as_u16(),
                    reason = %other,
                    "request rejected"
                );
                other.to_string()
            }
        };

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            body,
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_text(error: AppError) -> (StatusCode, String) {
        let response = error.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn validation_error_is_plain_reason() {
        let (status, body) = body_text(AppError::validation("ISBN is required")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "ISBN is required");
    }

    #[tokio::test]
    async fn not_found_names_entity_and_id() {
        let (status, body) = body_text(AppError::not_found("Book", "does-not-exist")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "Book with ID does-not-exist not found");
    }

    #[tokio::test]
    async fn internal_error_exposes_message() {
        let error = AppError::Internal(anyhow::anyhow!("Database connection failed"));
        let (status, body) = body_text(error).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Error: Database connection failed");
    }

    #[tokio::test]
    async fn storage_conflict_maps_to_server_error() {
        let error: AppError = DbError::Conflict {
            container: "books".to_string(),
            id: "book-100".to_string(),
        }
        .into();
        let (status, body) = body_text(error).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            "Error: entity with id 'book-100' already exists in container 'books'"
        );
    }

    #[test]
    fn decode_failure_is_internal() {
        let err = serde_json::from_slice::<serde_json::Value>(b"{oops").unwrap_err();
        let error: AppError = err.into();
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
