//! File-backed key-value store.
//!
//! One JSON file per key under a configured directory. Writes go through a
//! temporary file and an atomic rename so a crash mid-write never corrupts
//! the previous snapshot.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use tracker_core::{Error, Result};

use crate::kv::KeyValueStore;

/// File store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileStoreConfig {
    /// Directory holding the persisted documents
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
}

fn default_dir() -> PathBuf {
    PathBuf::from(".mercato-usage")
}

impl Default for FileStoreConfig {
    fn default() -> Self {
        Self { dir: default_dir() }
    }
}

/// Key-value store persisting each key as `<dir>/<key>.json`.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates the store, making the directory if needed.
    pub fn new(config: FileStoreConfig) -> Result<Self> {
        std::fs::create_dir_all(&config.dir)
            .map_err(|e| Error::storage(format!("create {}: {e}", config.dir.display())))?;
        Ok(Self { dir: config.dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn save(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));

        tokio::fs::write(&tmp, value)
            .await
            .map_err(|e| Error::storage(format!("write {}: {e}", tmp.display())))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| Error::storage(format!("rename {}: {e}", path.display())))?;
        Ok(())
    }

    async fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::storage(format!("read {}: {e}", path.display()))),
        }
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::storage(format!("remove {}: {e}", path.display()))),
        }
    }
}
