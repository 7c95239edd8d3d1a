//! List Cache Port - Local disaster-recovery mirror of the buyer list.

use async_trait::async_trait;

use crate::domain::membership::MembershipList;

/// Errors that can occur while writing or reading the mirror.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Failed to serialize list: {0}")]
    Serialize(String),

    #[error("Failed to deserialize list: {0}")]
    Deserialize(String),

    #[error("IO error: {0}")]
    Io(String),
}

/// Port for the local mirror.
///
/// The live path only writes through this port. `load` exists for the
/// startup check and manual recovery.
#[async_trait]
pub trait ListCache: Send + Sync {
    /// Persist `list` as the last known-good copy.
    async fn persist(&self, list: &MembershipList) -> Result<(), CacheError>;

    /// Read the mirror back.
    ///
    /// Returns `Ok(None)` if nothing has been persisted yet.
    async fn load(&self) -> Result<Option<MembershipList>, CacheError>;
}
