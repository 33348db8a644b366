//! Handlers for the page index, page display, page creation and edits.

use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use axum::Form;
use serde::Deserialize;

use wiki_core::error::CoreError;
use wiki_core::page::{page_path, require, validate_body, validate_name, validate_title};
use wiki_db::models::page::{NewPage, Page};
use wiki_db::models::version::{NewVersion, Version};
use wiki_db::repositories::{PageRepo, VersionRepo};
use wiki_db::{versioning, DbPool};

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::views;

/* --------------------------------------------------------------------------
Form types
-------------------------------------------------------------------------- */

/// Body of `POST /`.
#[derive(Debug, Deserialize)]
pub struct CreatePageForm {
    pub name: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
}

/// Body of `PUT /{name}`.
#[derive(Debug, Deserialize)]
pub struct UpdatePageForm {
    pub title: Option<String>,
    pub body: Option<String>,
}

/// Body of `POST /{name}`: an update tunnelled through POST.
#[derive(Debug, Deserialize)]
pub struct OverrideForm {
    #[serde(rename = "__method")]
    pub method: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
}

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

/// Fetch a page by name or return 404.
pub(crate) async fn ensure_page(pool: &DbPool, name: &str) -> AppResult<Page> {
    PageRepo::find_by_name(pool, name)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Page", name)))
}

/// Fetch the version a page currently points at, or return 404.
pub(crate) async fn current_version(pool: &DbPool, page: &Page) -> AppResult<Version> {
    let missing = || AppError::Core(CoreError::not_found("Current version of page", &page.name));
    let version_id = page.version_id.ok_or_else(missing)?;
    VersionRepo::find_for_page(pool, page.id, version_id)
        .await?
        .ok_or_else(missing)
}

fn validated_version(title: Option<&str>, body: Option<&str>) -> Result<NewVersion, CoreError> {
    let title = require("title", title)?;
    let body = require("body", body)?;
    validate_title(title)?;
    validate_body(body)?;
    Ok(NewVersion {
        title: title.to_string(),
        body: body.to_string(),
    })
}

/* --------------------------------------------------------------------------
Reads
-------------------------------------------------------------------------- */

/// GET /
///
/// List every page with the title of its current version.
pub async fn list_pages(State(state): State<AppState>) -> AppResult<Html<String>> {
    let pages = PageRepo::list_with_current_version(&state.pool).await?;
    Ok(views::index(&pages))
}

/// GET /new
pub async fn new_page_form() -> Html<String> {
    views::new_page_form()
}

/// GET /{name}
///
/// Render the page's current version.
pub async fn show_page(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Html<String>> {
    let page = ensure_page(&state.pool, &name).await?;
    let version = current_version(&state.pool, &page).await?;
    Ok(views::show(&page, &version))
}

/* --------------------------------------------------------------------------
Writes
-------------------------------------------------------------------------- */

/// POST /
///
/// Create a page and its first version, then redirect to it.
pub async fn create_page(
    State(state): State<AppState>,
    Form(form): Form<CreatePageForm>,
) -> AppResult<Redirect> {
    let name = require("name", form.name.as_deref())?;
    validate_name(name)?;
    let version = validated_version(form.title.as_deref(), form.body.as_deref())?;

    let input = NewPage {
        name: name.to_string(),
        title: version.title,
        body: version.body,
    };
    let (page, version) = versioning::create_page(&state.pool, &input)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => AppError::Core(
                CoreError::Conflict(format!("A page named '{}' already exists", input.name)),
            ),
            other => AppError::Database(other),
        })?;

    tracing::info!(
        page_id = page.id,
        version_id = version.id,
        name = %page.name,
        "Page created"
    );

    Ok(Redirect::to(&page_path(&page.name)))
}

/// PUT /{name}
///
/// Append a new version to the page and make it current.
pub async fn update_page(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Form(form): Form<UpdatePageForm>,
) -> AppResult<Redirect> {
    apply_update(&state, &name, form.title.as_deref(), form.body.as_deref()).await
}

/// POST /{name}
///
/// Accepts an update from an HTML form that names its real verb in the
/// `__method` field. Only `PUT` is recognised.
pub async fn override_page(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Form(form): Form<OverrideForm>,
) -> AppResult<Redirect> {
    match form.method.as_deref() {
        Some(method) if method.eq_ignore_ascii_case("PUT") => {
            apply_update(&state, &name, form.title.as_deref(), form.body.as_deref()).await
        }
        other => {
            tracing::debug!(method = ?other, name = %name, "Unsupported method override");
            Err(AppError::Core(CoreError::not_found("Route", format!("POST /{name}"))))
        }
    }
}

async fn apply_update(
    state: &AppState,
    name: &str,
    title: Option<&str>,
    body: Option<&str>,
) -> AppResult<Redirect> {
    let input = validated_version(title, body)?;
    let page = ensure_page(&state.pool, name).await?;

    let version = versioning::append_version(&state.pool, page.id, &input).await?;

    tracing::info!(
        page_id = page.id,
        version_id = version.id,
        name = %page.name,
        "Page updated"
    );

    Ok(Redirect::to(&page_path(&page.name)))
}
