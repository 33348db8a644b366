//! Storage layer for the wiki: pool construction, schema provisioning,
//! row models, repositories and the version manager.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::ConnectOptions;

pub mod models;
pub mod repositories;
pub mod schema;
pub mod versioning;

pub type DbPool = sqlx::SqlitePool;

/// URL of the ephemeral store used when no `DATABASE_URL` is configured.
pub const IN_MEMORY_URL: &str = "sqlite::memory:";

/// Create a connection pool for a persistent store.
///
/// The database file is created if missing so `wiki-migrate` can provision a
/// fresh deployment. Statement logging is routed through `tracing` only when
/// `log_statements` is set.
pub async fn create_pool(database_url: &str, log_statements: bool) -> Result<DbPool, sqlx::Error> {
    let options = connect_options(database_url, log_statements)?.create_if_missing(true);
    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

/// Create a pool backed by a private in-memory database.
///
/// The pool holds exactly one connection that is never reaped: an in-memory
/// SQLite database lives only as long as the connection that opened it.
pub async fn create_ephemeral_pool(log_statements: bool) -> Result<DbPool, sqlx::Error> {
    let options = connect_options(IN_MEMORY_URL, log_statements)?;
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}

fn connect_options(url: &str, log_statements: bool) -> Result<SqliteConnectOptions, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(url)?.foreign_keys(true);
    Ok(if log_statements {
        options
    } else {
        options.disable_statement_logging()
    })
}

/// Verify the pool can reach the database.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
