//! Remote List Store Port - Interface for the authoritative buyer list document.
//!
//! The remote store holds the canonical copy of the membership list as one
//! JSON document. Reads and writes always move the whole list.

use async_trait::async_trait;

use crate::domain::membership::MembershipList;

/// Errors from the remote list store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Remote store unreachable: {0}")]
    Transport(String),

    #[error("Remote store returned status {0}")]
    Status(u16),

    #[error("Failed to decode remote list: {0}")]
    Decode(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

/// Port for reading and replacing the remote buyer list.
#[async_trait]
pub trait RemoteListStore: Send + Sync {
    /// Fetch the current list.
    ///
    /// An absent or empty document is an empty list, not an error.
    ///
    /// # Errors
    /// Returns `StoreError` if the store cannot be reached or the document
    /// cannot be decoded.
    async fn fetch_list(&self) -> Result<MembershipList, StoreError>;

    /// Overwrite the document with `list`. No retries.
    ///
    /// # Errors
    /// Returns `StoreError` if the write was not accepted.
    async fn replace_list(&self, list: &MembershipList) -> Result<(), StoreError>;
}
