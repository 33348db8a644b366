//! Backing-store selection at process startup.

use wiki_db::schema::{self, SeedData};
use wiki_db::DbPool;

use crate::config::{ServerConfig, StoreConfig};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    #[error("Database is not migrated; run wiki-migrate against DATABASE_URL first")]
    NotMigrated,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Seed policy for a deployment mode: demo pages everywhere but production.
pub fn seed_policy(config: &ServerConfig) -> SeedData {
    if config.environment.is_production() {
        SeedData::Skip
    } else {
        SeedData::Include
    }
}

/// Open the configured store.
///
/// A persistent store must already hold the schema. The in-memory store is
/// provisioned (and seeded) on the spot, since it starts empty every time.
pub async fn open(config: &ServerConfig) -> Result<DbPool, StoreError> {
    let log_statements = !config.environment.is_production();

    match config.store()? {
        StoreConfig::Persistent { url } => {
            let pool = wiki_db::create_pool(&url, log_statements).await?;
            tracing::info!("Database connection pool created");

            wiki_db::health_check(&pool).await?;
            tracing::info!("Database health check passed");

            if !schema::tables_exist(&pool).await? {
                return Err(StoreError::NotMigrated);
            }
            Ok(pool)
        }
        StoreConfig::Ephemeral => {
            let pool = wiki_db::create_ephemeral_pool(log_statements).await?;
            tracing::warn!("DATABASE_URL not set, using an in-memory database");

            let outcome = schema::provision(&pool, seed_policy(config)).await?;
            tracing::info!(?outcome, "In-memory database provisioned");
            Ok(pool)
        }
    }
}
