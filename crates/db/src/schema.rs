//! Schema provisioning and seed data.
//!
//! Provisioning is idempotent: when both tables already exist nothing is
//! touched. Otherwise the tables, constraints and indexes are created (and
//! optionally seeded) in a single transaction.

use chrono::{Duration, Utc};
use sqlx::{Sqlite, Transaction};
use wiki_core::types::{Author, DbId, Timestamp};

use crate::repositories::{PageRepo, VersionRepo};
use crate::DbPool;

const SCHEMA: &str = include_str!("schema.sql");

/// Whether to insert the demo pages after creating the tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedData {
    Include,
    Skip,
}

/// Outcome of [`provision`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provisioned {
    /// Both tables were already present; nothing was changed.
    AlreadyPresent,
    /// Tables were created. `seeded` reports whether demo rows were added.
    Created { seeded: bool },
}

/// Seed pages, in insertion order (ids 1..=4).
const SEED_PAGES: &[&str] = &["home", "api", "ui", "db"];

struct SeedVersion {
    page_id: DbId,
    user_id: DbId,
    title: &'static str,
    body: &'static str,
    /// Seconds after the seed time.
    offset_secs: i64,
}

/// Seed versions, in insertion order (ids 1..=7).
const SEED_VERSIONS: &[SeedVersion] = &[
    SeedVersion { page_id: 1, user_id: 1, title: "Home", body: "Welcome to the wiki homepage.", offset_secs: 0 },
    SeedVersion { page_id: 2, user_id: 1, title: "API docs", body: "iframes all the way, man!", offset_secs: 0 },
    SeedVersion { page_id: 2, user_id: 2, title: "API docs", body: "binary all the way, man!", offset_secs: 1 },
    SeedVersion { page_id: 2, user_id: 1, title: "API docs", body: "RESTful all the way, man!", offset_secs: 2 },
    SeedVersion { page_id: 3, user_id: 1, title: "UI spec", body: "It's a GUI interface in Visual Basic that will be capable of tracking an IP address.", offset_secs: 0 },
    SeedVersion { page_id: 3, user_id: 2, title: "UI spec", body: "It's a GUI interface in Visual Basic that's capable of tracking an IP address.", offset_secs: 1 },
    SeedVersion { page_id: 4, user_id: 3, title: "DB schema", body: "There's multiple tables", offset_secs: 0 },
];

/// Current-version pointers for the seed pages: `(page_id, version_id)`.
const SEED_POINTERS: &[(DbId, DbId)] = &[(1, 1), (2, 4), (3, 6), (4, 7)];

/// True when both `pages` and `versions` exist.
pub async fn tables_exist(pool: &DbPool) -> Result<bool, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM sqlite_master
         WHERE type = 'table' AND name IN ('pages', 'versions')",
    )
    .fetch_one(pool)
    .await?;
    Ok(count == 2)
}

/// Create the schema unless it is already present.
pub async fn provision(pool: &DbPool, seed: SeedData) -> Result<Provisioned, sqlx::Error> {
    if tables_exist(pool).await? {
        tracing::debug!("Schema already present, skipping provisioning");
        return Ok(Provisioned::AlreadyPresent);
    }

    let mut tx = pool.begin().await?;
    sqlx::raw_sql(SCHEMA).execute(&mut *tx).await?;

    let seeded = seed == SeedData::Include;
    if seeded {
        insert_seed_data(&mut tx, Utc::now()).await?;
    }

    tx.commit().await?;
    tracing::info!(seeded, "Schema provisioned");
    Ok(Provisioned::Created { seeded })
}

async fn insert_seed_data(
    tx: &mut Transaction<'_, Sqlite>,
    now: Timestamp,
) -> Result<(), sqlx::Error> {
    for name in SEED_PAGES {
        PageRepo::insert(&mut **tx, name, now).await?;
    }

    for v in SEED_VERSIONS {
        VersionRepo::insert(
            &mut **tx,
            v.page_id,
            Author::User(v.user_id),
            v.title,
            v.body,
            now + Duration::seconds(v.offset_secs),
        )
        .await?;
    }

    for &(page_id, version_id) in SEED_POINTERS {
        PageRepo::set_current_version(&mut **tx, page_id, version_id).await?;
    }

    tracing::debug!(
        pages = SEED_PAGES.len(),
        versions = SEED_VERSIONS.len(),
        "Seed data inserted"
    );
    Ok(())
}
