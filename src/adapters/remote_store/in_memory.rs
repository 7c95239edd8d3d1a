//! In-Memory List Store Adapter
//!
//! Holds the buyer list in memory. Useful for testing and development.
//! Failures can be switched on to exercise the fail-open paths.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::domain::membership::MembershipList;
use crate::ports::{RemoteListStore, StoreError};

/// In-memory remote list store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryListStore {
    list: Arc<RwLock<MembershipList>>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
    latency: Option<Duration>,
}

impl InMemoryListStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with `list`
    pub fn with_list(list: MembershipList) -> Self {
        Self {
            list: Arc::new(RwLock::new(list)),
            ..Self::default()
        }
    }

    /// Delay every read and write by `latency` to widen race windows in tests.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Make subsequent reads fail with a transport error
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent writes fail with a transport error
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Current contents, bypassing failure switches
    pub async fn snapshot(&self) -> MembershipList {
        self.list.read().await.clone()
    }

    /// Number of successful writes
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    async fn delay(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl RemoteListStore for InMemoryListStore {
    async fn fetch_list(&self) -> Result<MembershipList, StoreError> {
        self.delay().await;
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Transport("simulated network error".to_string()));
        }
        Ok(self.list.read().await.clone())
    }

    async fn replace_list(&self, list: &MembershipList) -> Result<(), StoreError> {
        self.delay().await;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Transport("simulated network error".to_string()));
        }
        *self.list.write().await = list.clone();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
