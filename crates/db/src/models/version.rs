//! Version model.
//!
//! Versions are immutable snapshots of a page's title and body.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use wiki_core::types::{Author, DbId, Timestamp};

/// A row from the `versions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Version {
    pub id: DbId,
    pub page_id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub body: String,
    pub created_at: Timestamp,
}

impl Version {
    pub fn author(&self) -> Author {
        Author::from_user_id(self.user_id)
    }
}

/// DTO for appending a version to an existing page.
#[derive(Debug, Clone, Deserialize)]
pub struct NewVersion {
    pub title: String,
    pub body: String,
}
