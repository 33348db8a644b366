//! Version manager: the write paths that keep a page's current-version
//! pointer in step with its history.
//!
//! Every write here is "insert version, then repoint the page", optionally
//! preceded by inserting the page itself. The steps share one transaction,
//! so a failure anywhere leaves neither an orphaned version nor a page
//! without a current version.
//!
//! Each transaction opens with a write. SQLite cannot upgrade a read
//! transaction to a write one while another writer is active, so a leading
//! read would turn concurrent edits into `database is locked` errors instead
//! of queueing them behind the busy timeout.

use chrono::Utc;
use wiki_core::types::{Author, DbId};

use crate::models::page::{NewPage, Page};
use crate::models::version::{NewVersion, Version};
use crate::repositories::{PageRepo, VersionRepo};
use crate::DbPool;

/// Author recorded for edits made through the wiki. There is no login, so
/// this is always the anonymous sentinel.
pub const EDITOR: Author = Author::Anonymous;

/// Create a page and its first version, and point the page at it.
pub async fn create_page(pool: &DbPool, input: &NewPage) -> Result<(Page, Version), sqlx::Error> {
    let now = Utc::now();
    let mut tx = pool.begin().await?;

    let page_id = PageRepo::insert(&mut *tx, &input.name, now).await?;
    let version_id =
        VersionRepo::insert(&mut *tx, page_id, EDITOR, &input.title, &input.body, now).await?;
    PageRepo::set_current_version(&mut *tx, page_id, version_id).await?;

    let page = PageRepo::find_by_id(&mut *tx, page_id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;
    let version = VersionRepo::find_by_id(&mut *tx, version_id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;

    tx.commit().await?;

    tracing::debug!(page_id, version_id, name = %page.name, "Page created");
    Ok((page, version))
}

/// Append a version to an existing page and make it current.
///
/// Concurrent appends to one page are last-write-wins on the pointer.
///
/// Returns [`sqlx::Error::RowNotFound`] if the page does not exist.
pub async fn append_version(
    pool: &DbPool,
    page_id: DbId,
    input: &NewVersion,
) -> Result<Version, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let version_id = VersionRepo::insert(
        &mut *tx,
        page_id,
        EDITOR,
        &input.title,
        &input.body,
        Utc::now(),
    )
    .await
    .map_err(missing_page_as_not_found)?;
    PageRepo::set_current_version(&mut *tx, page_id, version_id).await?;

    let version = VersionRepo::find_by_id(&mut *tx, version_id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;

    tx.commit().await?;

    tracing::debug!(page_id, version_id, "Version appended");
    Ok(version)
}

/// A version insert against an unknown `page_id` trips the foreign key.
fn missing_page_as_not_found(err: sqlx::Error) -> sqlx::Error {
    match err {
        sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => sqlx::Error::RowNotFound,
        other => other,
    }
}
