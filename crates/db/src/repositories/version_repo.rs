//! Repository for the `versions` table.
//!
//! Versions are append-only: there is no update or delete.

use sqlx::SqliteExecutor;
use wiki_core::types::{Author, DbId, Timestamp};

use crate::models::version::Version;

/// Column list for versions queries.
const COLUMNS: &str = "id, page_id, user_id, title, body, created_at";

/// Provides read and insert operations for versions.
pub struct VersionRepo;

impl VersionRepo {
    /// Find a version by its ID, regardless of page.
    pub async fn find_by_id(
        executor: impl SqliteExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Version>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM versions WHERE id = ?1");
        sqlx::query_as::<_, Version>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a version only if it belongs to the given page.
    pub async fn find_for_page(
        executor: impl SqliteExecutor<'_>,
        page_id: DbId,
        version_id: DbId,
    ) -> Result<Option<Version>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM versions WHERE page_id = ?1 AND id = ?2");
        sqlx::query_as::<_, Version>(&query)
            .bind(page_id)
            .bind(version_id)
            .fetch_optional(executor)
            .await
    }

    /// List all versions of a page, newest first.
    ///
    /// Ties on `created_at` fall back to the later insert.
    pub async fn list_for_page(
        executor: impl SqliteExecutor<'_>,
        page_id: DbId,
    ) -> Result<Vec<Version>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM versions
             WHERE page_id = ?1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Version>(&query)
            .bind(page_id)
            .fetch_all(executor)
            .await
    }

    /// Insert a version, returning its ID.
    pub async fn insert(
        executor: impl SqliteExecutor<'_>,
        page_id: DbId,
        author: Author,
        title: &str,
        body: &str,
        created_at: Timestamp,
    ) -> Result<DbId, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO versions (page_id, user_id, title, body, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(page_id)
        .bind(author.user_id())
        .bind(title)
        .bind(body)
        .bind(created_at)
        .execute(executor)
        .await?;
        Ok(result.last_insert_rowid())
    }
}
