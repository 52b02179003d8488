//! Test doubles shared across HTTP tests.

use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use visitd_core::{storage::VisitStore, Error, Result};

/// In-memory store standing in for a real backend. Counts calls so tests
/// can assert the handler was (or was not) reached.
#[derive(Default)]
pub struct FakeStore {
    visits: AtomicI64,
    calls: AtomicUsize,
}

impl FakeStore {
    pub fn with_count(visits: i64) -> Self {
        Self {
            visits: AtomicI64::new(visits),
            calls: AtomicUsize::new(0),
        }
    }

    /// Current visit count.
    pub fn count(&self) -> i64 {
        self.visits.load(Ordering::SeqCst)
    }

    /// Number of increment/count operations the handlers issued.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VisitStore for FakeStore {
    async fn increment_visit(&self, _timestamp: DateTime<Utc>) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.visits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn visit_count(&self) -> Result<i64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.visits.load(Ordering::SeqCst))
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn close(&self) {}
}

/// Store whose every operation fails with a connection error.
pub struct FailingStore;

#[async_trait]
impl VisitStore for FailingStore {
    async fn increment_visit(&self, _timestamp: DateTime<Utc>) -> Result<()> {
        Err(Error::StorageConnection(sqlx::Error::PoolClosed))
    }

    async fn visit_count(&self) -> Result<i64> {
        Err(Error::StorageConnection(sqlx::Error::PoolClosed))
    }

    async fn ping(&self) -> Result<()> {
        Err(Error::StorageConnection(sqlx::Error::PoolClosed))
    }

    async fn close(&self) {}
}
