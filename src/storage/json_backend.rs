//! File-backed cache store persisted as a single JSON object.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::Mutex,
};

use rust_decimal::Decimal;
use tracing::debug;

use super::{CacheStore, Result, StoreError};
use crate::utils::persistence::{load_json_from_path, save_json_to_path};

/// Cache store that rewrites its JSON file atomically on every `set`.
#[derive(Debug)]
pub struct JsonCacheStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, Decimal>>,
}

impl JsonCacheStore {
    /// Opens the store at `path`, starting empty when the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            load_json_from_path(&path)?
        } else {
            BTreeMap::new()
        };
        debug!(path = %path.display(), entries = entries.len(), "opened balance cache");
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CacheStore for JsonCacheStore {
    fn get(&self, key: &str) -> Result<Option<Decimal>> {
        let entries = self
            .entries
            .lock()
            .map_err(|err| StoreError::Poisoned(err.to_string()))?;
        Ok(entries.get(key).copied())
    }

    fn set(&self, key: &str, amount: Decimal) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|err| StoreError::Poisoned(err.to_string()))?;
        let previous = entries.insert(key.to_string(), amount);
        if let Err(err) = save_json_to_path(&*entries, &self.path) {
            match previous {
                Some(value) => entries.insert(key.to_string(), value),
                None => entries.remove(key),
            };
            return Err(err);
        }
        Ok(())
    }
}
