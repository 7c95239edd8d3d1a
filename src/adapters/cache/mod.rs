//! Cache Adapters
//!
//! Implementations of the ListCache port for the local buyer list mirror.
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::cache::{FileListCache, InMemoryListCache};
//!
//! // Production: JSON file on disk
//! let cache = FileListCache::new("./data/buyers.json");
//!
//! // Testing: in-memory mirror
//! let cache = InMemoryListCache::new();
//! ```

mod file_list_cache;
mod in_memory;

pub use file_list_cache::FileListCache;
pub use in_memory::InMemoryListCache;
