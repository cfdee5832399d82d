//! Application state shared across all handlers
//!
//! The canonical snapshot lives in a `LibraryStore` behind an async
//! `RwLock`. Reads clone nothing until a handler asks for it; every
//! mutation runs under the write lock, so checkouts and returns on the same
//! book are serialised.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::config::Config;
use crate::domain::{DomainError, Snapshot};

/// Versioned holder of the current snapshot
#[derive(Debug, Default)]
pub struct LibraryStore {
    version: u64,
    snapshot: Snapshot,
}

impl LibraryStore {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            version: 0,
            snapshot,
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Apply `op` to the current snapshot and install its result.
    ///
    /// `expected_version`, when given, must match the store's version.
    /// On any error the store is left exactly as it was.
    pub fn commit<T>(
        &mut self,
        expected_version: Option<u64>,
        op: impl FnOnce(&Snapshot) -> Result<(Snapshot, T), DomainError>,
    ) -> Result<(u64, T), DomainError> {
        if let Some(expected) = expected_version {
            if expected != self.version {
                return Err(DomainError::Conflict {
                    expected,
                    actual: self.version,
                });
            }
        }

        let (next, value) = op(&self.snapshot)?;
        self.snapshot = next;
        self.version += 1;
        tracing::debug!("Store committed version {}", self.version);

        Ok((self.version, value))
    }
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    store: Arc<RwLock<LibraryStore>>,
    pub config: Arc<Config>,
    clock: fn() -> DateTime<Utc>,
}

impl AppState {
    pub fn new(snapshot: Snapshot, config: Config) -> Self {
        Self {
            store: Arc::new(RwLock::new(LibraryStore::new(snapshot))),
            config: Arc::new(config),
            clock: Utc::now,
        }
    }

    /// Replace the wall clock, for tests that need a fixed "now"
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    pub fn store(&self) -> &RwLock<LibraryStore> {
        &self.store
    }

    /// Run a mutation under the write lock
    pub async fn commit<T>(
        &self,
        expected_version: Option<u64>,
        op: impl FnOnce(&Snapshot) -> Result<(Snapshot, T), DomainError>,
    ) -> Result<(u64, T), DomainError> {
        let mut store = self.store.write().await;
        store.commit(expected_version, op).inspect_err(|e| {
            tracing::warn!("Rejected store mutation: {}", e);
        })
    }
}
