//! Networked connection-pooled backend

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{error, info};

use super::VisitStore;
use crate::{config::PostgresConfig, Error, Result};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS visits (
    id BIGSERIAL PRIMARY KEY,
    timestamp TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
)";

/// Visit store backed by a pooled postgres connection.
#[derive(Clone)]
pub struct PostgresVisitStore {
    pool: PgPool,
}

impl PostgresVisitStore {
    /// Connect to the server, verify reachability, and provision the
    /// schema. Either failure fails construction; callers are expected to
    /// abort startup.
    pub async fn connect(config: &PostgresConfig) -> Result<Self> {
        let pool: PgPool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .max_lifetime(Duration::from_secs(config.max_lifetime_seconds))
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .connect(&config.url())
            .await
            .map_err(|e| {
                error!("Failed to connect to postgres: {}", e);
                Error::StorageConnection(e)
            })?;

        // Explicit reachability check before touching the schema
        sqlx::query("SELECT 1")
            .execute(&pool)
            .await
            .map_err(Error::StorageConnection)?;

        sqlx::query(CREATE_TABLE).execute(&pool).await?;
        info!(host = %config.host, database = %config.database, "postgres store ready");

        Ok(Self { pool })
    }
}

#[async_trait]
impl VisitStore for PostgresVisitStore {
    async fn increment_visit(&self, timestamp: DateTime<Utc>) -> Result<()> {
        sqlx::query("INSERT INTO visits (timestamp) VALUES ($1)")
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

    #[tokio::test]
    #[ignore = "Requires a postgres instance"]
    async fn connect_fails_against_unreachable_server() {
        // Construction must fail when the reachability check fails
    }

    #[tokio::test]
    #[ignore = "Requires a postgres instance"]
    async fn increment_and_count_roundtrip() {
        // Same contract as the sqlite backend, exercised against postgres
    }
}
