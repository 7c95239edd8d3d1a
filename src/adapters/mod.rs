//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `remote_store` - Authoritative buyer list document (HTTP, in-memory)
//! - `cache` - Local buyer list mirror (file, in-memory)
//! - `http` - Axum routes for webhooks, verification and health

pub mod cache;
pub mod http;
pub mod remote_store;

pub use cache::{FileListCache, InMemoryListCache};
pub use remote_store::{HttpListStore, HttpListStoreConfig, InMemoryListStore};
