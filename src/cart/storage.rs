//! Key-value storage port for persisted cart state

use crate::error::CatalogResult;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Synchronous string key-value storage
pub trait CartStorage {
    fn get_item(&self, key: &str) -> CatalogResult<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> CatalogResult<()>;
}

/// In-memory storage, for tests and ephemeral sessions
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with a single key
    pub fn with_item(key: &str, value: &str) -> Self {
        let mut storage = Self::new();
        storage.items.insert(key.to_string(), value.to_string());
        storage
    }
}

impl CartStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> CatalogResult<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> CatalogResult<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON file holding a map of keys to string values
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored entries. A missing file is empty and corrupt JSON is dropped
    /// with a warning; any other read failure is an error so a write never
    /// clobbers keys it could not see.
    fn read_all(&self) -> CatalogResult<BTreeMap<String, String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "ignoring corrupt storage file");
            BTreeMap::new()
        }))
    }
}

impl CartStorage for FileStorage {
    fn get_item(&self, key: &str) -> CatalogResult<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> CatalogResult<()> {
        let mut items = self.read_all()?;
        items.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&items)?)?;
        Ok(())
    }
}
