pub mod pages;
pub mod versions;

use axum::http::Uri;
use wiki_core::error::CoreError;

use crate::error::AppError;

/// Fallback for requests no route accepts.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::Core(CoreError::not_found("Path", uri.path()))
}
