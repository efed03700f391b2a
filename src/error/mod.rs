//! Application error types and their HTTP mapping.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level errors.
#[derive(Error, Debug)]
pub enum AppError {
    /// A required request-body field is absent (or blank).
    #[error("{0} required")]
    MissingField(&'static str),

    /// Field present but malformed.
    #[error("{0}")]
    Validation(String),

    /// Body or path could not be extracted.
    #[error("{0}")]
    BadRequest(String),

    /// Lookup by id or by name found nothing.
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),
}

impl AppError {
    /// Map a unique-constraint violation to `Conflict`, anything else to `Db`.
    pub fn conflict_on_unique(err: sqlx::Error, message: &str) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict(message.to_string())
            }
            _ => AppError::Db(err),
        }
    }

    /// Map a foreign-key violation to `NotFound`, anything else to `Db`.
    pub fn not_found_on_foreign_key(err: sqlx::Error, entity: &'static str) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                AppError::NotFound(entity)
            }
            _ => AppError::Db(err),
        }
    }

    /// Map a foreign-key violation to `Conflict`, anything else to `Db`.
    pub fn conflict_on_foreign_key(err: sqlx::Error, message: &str) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                AppError::Conflict(message.to_string())
            }
            _ => AppError::Db(err),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingField(_) | AppError::Validation(_) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let res = err.into_response();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn missing_field_is_bad_request() {
        let (status, body) = body_json(AppError::MissingField("username")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "username required");
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let (status, body) = body_json(AppError::NotFound("user")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "user not found");
    }

    #[tokio::test]
    async fn conflict_is_409() {
        let (status, body) =
            body_json(AppError::Conflict("username already exists".to_string())).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "username already exists");
    }

    #[tokio::test]
    async fn bad_request_is_400_with_json_body() {
        let (status, body) =
            body_json(AppError::BadRequest("Invalid URL".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid URL");
    }

    #[tokio::test]
    async fn store_failures_are_500() {
        let (status, body) = body_json(AppError::Db(sqlx::Error::PoolTimedOut)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().starts_with("Database error"));
    }

    #[test]
    fn non_constraint_errors_stay_db() {
        let err = AppError::conflict_on_unique(sqlx::Error::RowNotFound, "dup");
        assert!(matches!(err, AppError::Db(sqlx::Error::RowNotFound)));
        let err = AppError::conflict_on_foreign_key(sqlx::Error::PoolClosed, "in use");
        assert!(matches!(err, AppError::Db(sqlx::Error::PoolClosed)));
        let err = AppError::not_found_on_foreign_key(sqlx::Error::PoolTimedOut, "user");
        assert!(matches!(err, AppError::Db(sqlx::Error::PoolTimedOut)));
    }
}
