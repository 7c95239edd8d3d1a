//! Remote Store Adapters
//!
//! Implementations of the RemoteListStore port.
//!
//! ## Available Adapters
//!
//! - **HttpListStore** - JSON document over HTTP (GET / PUT with API key)
//! - **InMemoryListStore** - In-process list (testing/development)

mod http_list_store;
mod in_memory;

pub use http_list_store::{HttpListStore, HttpListStoreConfig};
pub use in_memory::InMemoryListStore;
