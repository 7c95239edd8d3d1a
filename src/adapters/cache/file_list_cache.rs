//! File-based List Cache Adapter
//!
//! Mirrors the buyer list to a single pretty-printed JSON file on disk.
//! The file is replaced atomically: the list is written to a sibling temp
//! file which is then renamed over the target.

use async_trait::async_trait;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::membership::MembershipList;
use crate::ports::{CacheError, ListCache};

/// File-based mirror of the buyer list
#[derive(Debug, Clone)]
pub struct FileListCache {
    path: PathBuf,
}

impl FileListCache {
    /// Create a cache writing to `path`
    ///
    /// # Example
    /// ```ignore
    /// let cache = FileListCache::new("./data/buyers.json");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("buyers.json"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn ensure_parent_dir(&self) -> Result<(), CacheError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
                .await
                .map_err(|e| CacheError::Io(e.to_string())),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl ListCache for FileListCache {
    async fn persist(&self, list: &MembershipList) -> Result<(), CacheError> {
        self.ensure_parent_dir().await?;

        let json = serde_json::to_string_pretty(list)
            .map_err(|e| CacheError::Serialize(e.to_string()))?;

        let temp = self.temp_path();
        fs::write(&temp, json)
            .await
            .map_err(|e| CacheError::Io(e.to_string()))?;

        fs::rename(&temp, &self.path)
            .await
            .map_err(|e| CacheError::Io(e.to_string()))?;

        Ok(())
    }

    async fn load(&self) -> Result<Option<MembershipList>, CacheError> {
        let json = match fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CacheError::Io(e.to_string())),
        };

        let list = serde_json::from_str(&json)
            .map_err(|e| CacheError::Deserialize(e.to_string()))?;

        Ok(Some(list))
    }
}
