//! In-Memory List Cache Adapter
//!
//! Keeps the mirrored list in memory. Useful for testing and development.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::membership::MembershipList;
use crate::ports::{CacheError, ListCache};

/// In-memory mirror
#[derive(Debug, Clone, Default)]
pub struct InMemoryListCache {
    list: Arc<RwLock<Option<MembershipList>>>,
    fail_writes: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
}

impl InMemoryListCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent writes fail with an IO error
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Last persisted list, if any
    pub async fn snapshot(&self) -> Option<MembershipList> {
        self.list.read().await.clone()
    }

    /// Number of successful writes
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ListCache for InMemoryListCache {
    async fn persist(&self, list: &MembershipList) -> Result<(), CacheError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CacheError::Io("simulated disk failure".to_string()));
        }
        *self.list.write().await = Some(list.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn load(&self) -> Result<Option<MembershipList>, CacheError> {
        Ok(self.list.read().await.clone())
    }
}
