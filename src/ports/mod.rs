//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application layer and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `RemoteListStore` - Authoritative buyer list document
//! - `ListCache` - Local best-effort mirror of the last successful write

mod list_cache;
mod remote_list_store;

pub use list_cache::{CacheError, ListCache};
pub use remote_list_store::{RemoteListStore, StoreError};
