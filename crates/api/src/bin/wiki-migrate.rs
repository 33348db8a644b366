//! Provision the schema of a persistent wiki database.
//!
//! Reads `DATABASE_URL` (required) and `APP_ENV`. Seed pages are added
//! only outside production. Running it against an already provisioned
//! database changes nothing.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wiki_api::config::ServerConfig;
use wiki_api::store::seed_policy;
use wiki_db::schema::{self, Provisioned};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wiki_migrate=info,wiki_db=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env().context("Invalid configuration")?;
    let url = config
        .database_url
        .as_deref()
        .context("Not given a database to migrate: DATABASE_URL is not set")?;

    let pool = wiki_db::create_pool(url, !config.environment.is_production())
        .await
        .context("Failed to connect to database")?;

    match schema::provision(&pool, seed_policy(&config))
        .await
        .context("Failed to provision schema")?
    {
        Provisioned::AlreadyPresent => tracing::info!("Schema already present, nothing to do"),
        Provisioned::Created { seeded } => tracing::info!(seeded, "Schema created"),
    }

    pool.close().await;
    Ok(())
}
