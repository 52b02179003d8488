//! Storage abstraction for visit records
//!
//! The HTTP layer only ever sees `dyn VisitStore`; which backend sits behind
//! it is decided once at startup by `bootstrap::init_store`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::Result;

pub mod postgres;
pub mod sqlite;

pub use postgres::PostgresVisitStore;
pub use sqlite::SqliteVisitStore;

/// Backend-agnostic persistence for visit records.
#[async_trait]
pub trait VisitStore: Send + Sync {
    /// Insert one visit record with the given timestamp.
    ///
    /// Errors are propagated to the caller as-is; there are no retries.
    async fn increment_visit(&self, timestamp: DateTime<Utc>) -> Result<()>;

    /// Count all recorded visits. An empty store yields 0.
    async fn visit_count(&self) -> Result<i64>;

    /// Cheap connectivity check for readiness probes.
    async fn ping(&self) -> Result<()>;

    /// Close the underlying connection pool.
    async fn close(&self);
}
