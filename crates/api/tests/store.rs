//! Tests for backing-store selection at startup.

mod common;

use assert_matches::assert_matches;
use wiki_api::config::{ConfigError, Environment};
use wiki_api::store::{self, StoreError};
use wiki_db::repositories::PageRepo;
use wiki_db::schema::{self, SeedData};

#[tokio::test]
async fn development_without_url_opens_seeded_memory_store() {
    let config = common::test_config();

    let pool = store::open(&config).await.unwrap();

    assert!(schema::tables_exist(&pool).await.unwrap());
    let pages = PageRepo::list_with_current_version(&pool).await.unwrap();
    assert_eq!(pages.len(), 4);
}

#[tokio::test]
async fn production_without_url_is_fatal() {
    let mut config = common::test_config();
    config.environment = Environment::Production;

    let result = store::open(&config).await;

    assert_matches!(
        result,
        Err(StoreError::Config(ConfigError::MissingDatabaseUrl))
    );
}

#[tokio::test]
async fn persistent_store_must_be_migrated_first() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("wiki.db").display());
    let mut config = common::test_config();
    config.database_url = Some(url.clone());

    assert_matches!(store::open(&config).await, Err(StoreError::NotMigrated));

    let pool = wiki_db::create_pool(&url, false).await.unwrap();
    schema::provision(&pool, SeedData::Skip).await.unwrap();
    pool.close().await;

    let pool = store::open(&config).await.unwrap();
    assert!(schema::tables_exist(&pool).await.unwrap());
    assert!(PageRepo::find_by_name(&pool, "home").await.unwrap().is_none());
}
