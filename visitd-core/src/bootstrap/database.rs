//! Storage initialization

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::config::{Config, StorageBackend};
use crate::storage::{PostgresVisitStore, SqliteVisitStore, VisitStore};

/// Build the configured storage backend.
///
/// Selection happens exactly once; request-path code only ever sees the
/// trait object. Construction failures (unreachable backend, failed schema
/// provisioning) abort startup.
pub async fn init_store(config: &Config) -> Result<Arc<dyn VisitStore>> {
    let store: Arc<dyn VisitStore> = match config.storage.backend {
        StorageBackend::Sqlite => {
            info!(path = %config.storage.sqlite.path, "Using embedded sqlite storage");
            Arc::new(SqliteVisitStore::connect(&config.storage.sqlite).await?)
        }
        StorageBackend::Postgres => {
            info!(host = %config.storage.postgres.host, "Using networked postgres storage");
            Arc::new(PostgresVisitStore::connect(&config.storage.postgres).await?)
        }
    };

    Ok(store)
}
