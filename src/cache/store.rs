// Cache stores for lookup results.
// Key-value contract plus an in-memory session store and a filesystem store.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::warn;

use crate::error::{LensError, Result};

use super::entry::CacheEntry;
use super::paths;

/// Key-value store addressed by normalized query key.
pub trait CacheStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<CacheEntry>>;
    fn set(&self, key: &str, entry: &CacheEntry) -> Result<()>;
    fn delete(&self, key: &str) -> Result<()>;
}

/// Session-scoped store. Entries live as long as the store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop every entry (end of session).
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl CacheStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<CacheEntry>> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, entry: &CacheEntry) -> Result<()> {
        self.lock().insert(key.to_string(), entry.clone());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.lock().remove(key);
        Ok(())
    }
}

/// Filesystem store: one JSON file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Store under the platform cache directory.
    pub fn in_cache_dir() -> Result<Self> {
        paths::cache_dir()
            .map(Self::new)
            .ok_or_else(|| LensError::Config("could not determine cache directory".to_string()))
    }

    pub fn base(&self) -> &Path {
        &self.base
    }
}

impl CacheStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<CacheEntry>> {
        let path = paths::entry_path(&self.base, key);
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)?;
        match serde_json::from_str::<CacheEntry>(&contents) {
            Ok(entry) => Ok(Some(entry)),
            Err(e) => {
                warn!(key, error = %e, "discarding unreadable cache file");
                fs::remove_file(&path)?;
                Ok(None)
            }
        }
    }

    fn set(&self, key: &str, entry: &CacheEntry) -> Result<()> {
        let path = paths::entry_path(&self.base, key);
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(entry)?;

        // Write atomically via temp file
        let temp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, &path)?;

        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let path = paths::entry_path(&self.base, key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}
