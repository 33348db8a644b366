//! Handlers for a page's version history.

use axum::extract::{Path, State};
use axum::response::Html;

use wiki_core::error::CoreError;
use wiki_core::types::DbId;
use wiki_db::repositories::VersionRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::pages::{current_version, ensure_page};
use crate::state::AppState;
use crate::views;

/// GET /{name}/versions
///
/// List all versions of the page, newest first.
pub async fn list_versions(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Html<String>> {
    let page = ensure_page(&state.pool, &name).await?;
    let versions = VersionRepo::list_for_page(&state.pool, page.id).await?;
    Ok(views::history(&page, &versions))
}

/// GET /{name}/versions/new
///
/// Edit form prefilled with the current version.
pub async fn edit_form(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Html<String>> {
    let page = ensure_page(&state.pool, &name).await?;
    let version = current_version(&state.pool, &page).await?;
    Ok(views::edit_form(&page, &version))
}

/// GET /{name}/versions/{version_id}
///
/// Render one historical version. The version must belong to the page.
pub async fn show_version(
    State(state): State<AppState>,
    Path((name, version_id)): Path<(String, String)>,
) -> AppResult<Html<String>> {
    let not_found = || AppError::Core(CoreError::not_found("Version", &version_id));

    let id: DbId = version_id.parse().map_err(|_| not_found())?;
    let page = ensure_page(&state.pool, &name).await?;
    let version = VersionRepo::find_for_page(&state.pool, page.id, id)
        .await?
        .ok_or_else(not_found)?;

    Ok(views::show(&page, &version))
}
