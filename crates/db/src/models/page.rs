//! Page entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use wiki_core::types::{DbId, Timestamp};

/// A row from the `pages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Page {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    /// Current version. `None` only between the page insert and the pointer
    /// update, which the version manager performs in one transaction.
    pub version_id: Option<DbId>,
}

/// A page joined to its current version, as listed on the index.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PageSummary {
    pub id: DbId,
    pub name: String,
    pub version_id: DbId,
    pub title: String,
    pub updated_at: Timestamp,
}

/// DTO for creating a page together with its first version.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPage {
    pub name: String,
    pub title: String,
    pub body: String,
}
