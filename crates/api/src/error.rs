use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use wiki_core::error::CoreError;

use crate::views;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`sqlx::Error`] for store
/// failures. Implements [`IntoResponse`] to render an HTML error page.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `wiki_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// HTTP status and user-facing message for this error.
    ///
    /// A rejected submission (missing or empty field) is answered exactly
    /// like a missing page: no handler accepted the request.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, key } => (
                    StatusCode::NOT_FOUND,
                    format!("{entity} '{key}' not found"),
                ),
                CoreError::Validation(msg) => {
                    tracing::debug!(reason = %msg, "Submission rejected");
                    not_found()
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            },
            AppError::Database(err) => classify_sqlx_error(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, views::error_page(status, &message)).into_response()
    }
}

fn not_found() -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, "Not found".to_string())
}

fn internal() -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "An internal error occurred".to_string(),
    )
}

/// Classify a sqlx error into an HTTP status and message.
///
/// - `RowNotFound` maps to 404.
/// - Everything else maps to 500 with a sanitized message. Handlers that
///   expect a constraint violation translate it into a [`CoreError`] first.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, String) {
    match err {
        sqlx::Error::RowNotFound => not_found(),
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}
