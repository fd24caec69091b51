//! Key-value persistence used for the set of StaffIDs that already spun.
//!
//! The browser build talks to `window.localStorage`; native builds and tests use
//! the in-memory [`MemoryStore`]. Both are synchronous, matching the single
//! threaded event/frame sequence the wheel runs on.

use std::collections::HashMap;

use thiserror::Error;
use web_sys::{Storage, window};

/// Storage key holding the JSON array of used StaffIDs.
pub const STORAGE_KEY: &str = "enteredStaffIDs";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("persistent storage is not available")]
    Unavailable,
    #[error("failed to read key '{key}': {reason}")]
    Read { key: String, reason: String },
    #[error("failed to write key '{key}': {reason}")]
    Write { key: String, reason: String },
    #[error("stored value is not a JSON string array: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Minimal string key-value store (the subset of the Web Storage API we need).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store. `fail_writes` simulates a quota / private-mode failure.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    writes: usize,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store primed with a single entry, e.g. a previous session's used set.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::default();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Number of successful `set` calls since creation.
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Write {
                key: key.to_string(),
                reason: "writes disabled".to_string(),
            });
        }
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// `window.localStorage` wrapper.
pub struct LocalStore {
    storage: Storage,
}

impl LocalStore {
    pub fn open() -> Result<Self, StorageError> {
        let storage = window()
            .ok_or(StorageError::Unavailable)?
            .local_storage()
            .map_err(|_| StorageError::Unavailable)?
            .ok_or(StorageError::Unavailable)?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage.get_item(key).map_err(|e| StorageError::Read {
            key: key.to_string(),
            reason: format!("{:?}", e),
        })
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage.set_item(key, value).map_err(|e| StorageError::Write {
            key: key.to_string(),
            reason: format!("{:?}", e),
        })
    }
}

/// Local storage, or memory when local storage is blocked.
pub enum AnyStore {
    Local(LocalStore),
    Memory(MemoryStore),
}

impl KeyValueStore for AnyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            AnyStore::Local(s) => s.get(key),
            AnyStore::Memory(s) => s.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            AnyStore::Local(s) => s.set(key, value),
            AnyStore::Memory(s) => s.set(key, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert!(store.get(STORAGE_KEY).unwrap().is_none());
        store.set(STORAGE_KEY, "[\"BOB\"]").unwrap();
        assert_eq!(store.get(STORAGE_KEY).unwrap().as_deref(), Some("[\"BOB\"]"));
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn test_failing_store_rejects_writes_and_keeps_old_value() {
        let mut store = MemoryStore::with_entry(STORAGE_KEY, "[]").failing_writes();
        let err = store.set(STORAGE_KEY, "[\"EVE\"]").unwrap_err();
        assert!(matches!(err, StorageError::Write { .. }));
        assert_eq!(store.raw(STORAGE_KEY), Some("[]"));
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn test_any_store_delegates_to_memory() {
        let mut store = AnyStore::Memory(MemoryStore::new());
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
