//! Embedded single-file backend

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use super::VisitStore;
use crate::{config::SqliteConfig, Result};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS visits (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    timestamp TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
)";

/// Visit store backed by a single database file.
#[derive(Clone)]
pub struct SqliteVisitStore {
    pool: SqlitePool,
}

impl SqliteVisitStore {
    /// Open the database file (creating it if absent) and provision the
    /// schema. Pool bounds come from configuration.
    pub async fn connect(config: &SqliteConfig) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(&config.path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .max_lifetime(Duration::from_secs(config.max_lifetime_seconds))
            .connect_with(options)
            .await?;

        sqlx::query(CREATE_TABLE).execute(&pool).await?;
        info!(path = %config.path, "sqlite store ready");

        Ok(Self { pool })
    }

    /// Store over an in-memory database. Used in tests; the single
    /// connection keeps the database alive for the pool's lifetime.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::new().in_memory(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .connect_with(options)
            .await?;

        sqlx::query(CREATE_TABLE).execute(&pool).await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl VisitStore for SqliteVisitStore {
    async fn increment_visit(&self, timestamp: DateTime<Utc>) -> Result<()> {
        sqlx::query("INSERT INTO visits (timestamp) VALUES (?)")
            .bind(timestamp)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn visit_count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM visits")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fresh_store_counts_zero() {
        let store = SqliteVisitStore::in_memory().await.expect("open store");

        assert_eq!(store.visit_count().await.expect("count"), 0);
    }

    #[tokio::test]
    async fn increment_raises_count_by_one() {
        let store = SqliteVisitStore::in_memory().await.expect("open store");

        let before = store.visit_count().await.expect("count");
        store.increment_visit(Utc::now()).await.expect("increment");
        let after = store.visit_count().await.expect("count");

        assert_eq!(after, before + 1);
    }

    #[tokio::test]
    async fn two_increments_count_two() {
        let store = SqliteVisitStore::in_memory().await.expect("open store");

        store.increment_visit(Utc::now()).await.expect("increment");
        store.increment_visit(Utc::now()).await.expect("increment");

        assert_eq!(store.visit_count().await.expect("count"), 2);
    }

    #[tokio::test]
    async fn connect_creates_file_and_provisions_schema() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("visits.db");
        let config = SqliteConfig {
            path: path.to_string_lossy().into_owned(),
            ..SqliteConfig::default()
        };

        let store = SqliteVisitStore::connect(&config).await.expect("connect");

        assert!(path.exists());
        assert_eq!(store.visit_count().await.expect("count"), 0);
        store.close().await;
    }

    #[tokio::test]
    async fn schema_provisioning_is_idempotent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("visits.db");
        let config = SqliteConfig {
            path: path.to_string_lossy().into_owned(),
            ..SqliteConfig::default()
        };

        let store = SqliteVisitStore::connect(&config).await.expect("first open");
        store.increment_visit(Utc::now()).await.expect("increment");
        store.close().await;

        // Reopening must not recreate the table or lose rows
        let store = SqliteVisitStore::connect(&config).await.expect("second open");
        assert_eq!(store.visit_count().await.expect("count"), 1);
        store.close().await;
    }

    #[tokio::test]
    async fn ping_succeeds_on_open_store() {
        let store = SqliteVisitStore::in_memory().await.expect("open store");

        assert!(store.ping().await.is_ok());
    }
}
