//! Repository for the `pages` table.

use sqlx::SqliteExecutor;
use wiki_core::types::{DbId, Timestamp};

use crate::models::page::{Page, PageSummary};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at, version_id";

/// Provides lookups and writes for pages.
pub struct PageRepo;

impl PageRepo {
    /// Find a page by its unique name.
    pub async fn find_by_name(
        executor: impl SqliteExecutor<'_>,
        name: &str,
    ) -> Result<Option<Page>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pages WHERE name = ?1");
        sqlx::query_as::<_, Page>(&query)
            .bind(name)
            .fetch_optional(executor)
            .await
    }

    /// Find a page by its internal ID.
    pub async fn find_by_id(
        executor: impl SqliteExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Page>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pages WHERE id = ?1");
        sqlx::query_as::<_, Page>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List every page that has a current version, joined to that version.
    ///
    /// Ordered by page name.
    pub async fn list_with_current_version(
        executor: impl SqliteExecutor<'_>,
    ) -> Result<Vec<PageSummary>, sqlx::Error> {
        sqlx::query_as::<_, PageSummary>(
            "SELECT p.id, p.name, p.version_id, v.title, v.created_at AS updated_at
             FROM pages p
             JOIN versions v ON v.id = p.version_id
             ORDER BY p.name",
        )
        .fetch_all(executor)
        .await
    }

    /// Insert a page with no current version, returning its ID.
    pub async fn insert(
        executor: impl SqliteExecutor<'_>,
        name: &str,
        created_at: Timestamp,
    ) -> Result<DbId, sqlx::Error> {
        let result = sqlx::query("INSERT INTO pages (name, created_at) VALUES (?1, ?2)")
            .bind(name)
            .bind(created_at)
            .execute(executor)
            .await?;
        Ok(result.last_insert_rowid())
    }

    /// Point a page at one of its own versions.
    ///
    /// The update only applies when `version_id` belongs to `page_id`;
    /// otherwise (or if the page does not exist) returns
    /// [`sqlx::Error::RowNotFound`].
    pub async fn set_current_version(
        executor: impl SqliteExecutor<'_>,
        page_id: DbId,
        version_id: DbId,
    ) -> Result<(), sqlx::Error> {
        let result = sqlx::query(
            "UPDATE pages SET version_id = ?2
             WHERE id = ?1
               AND EXISTS (SELECT 1 FROM versions WHERE id = ?2 AND page_id = ?1)",
        )
        .bind(page_id)
        .bind(version_id)
        .execute(executor)
        .await?;

        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }
        Ok(())
    }
}
