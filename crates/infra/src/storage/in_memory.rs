use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use super::r#trait::{KeyValueStorage, StorageError};

/// In-memory key/value storage.
///
/// Intended for tests/dev. A byte quota and an availability switch let tests
/// reproduce the failure modes of real client storage (full, or disabled by
/// the user).
#[derive(Debug)]
pub struct InMemoryStorage {
    entries: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
    available: AtomicBool,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            quota: None,
            available: AtomicBool::new(true),
        }
    }

    /// Storage that rejects any value longer than `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota: Some(bytes),
            ..Self::new()
        }
    }

    /// Pre-seed a key, e.g. with data written by an earlier session.
    pub fn seeded(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::new();
        if let Ok(mut map) = storage.entries.write() {
            map.insert(key.into(), value.into());
        }
        storage
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Raw stored value, bypassing availability (test inspection).
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn ensure_available(&self) -> Result<(), StorageError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StorageError::Unavailable("storage disabled".to_string()))
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStorage for InMemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.ensure_available()?;
        let map = self
            .entries
            .read()
            .map_err(|_| StorageError::Unavailable("lock poisoned".to_string()))?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.ensure_available()?;
        if let Some(quota) = self.quota {
            if value.len() > quota {
                return Err(StorageError::QuotaExceeded {
                    needed: value.len(),
                    quota,
                });
            }
        }
        let mut map = self
            .entries
            .write()
            .map_err(|_| StorageError::Unavailable("lock poisoned".to_string()))?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_as_none() {
        let storage = InMemoryStorage::new();
        assert!(storage.get("nothing-here").unwrap().is_none());
    }

    #[test]
    fn set_then_get_returns_value() {
        let storage = InMemoryStorage::new();
        storage.set("k", "[]").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn quota_rejects_oversized_value_and_keeps_previous() {
        let storage = InMemoryStorage::with_quota(4);
        storage.set("k", "[]").unwrap();
        let err = storage.set("k", "[1,2,3]").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { needed: 7, quota: 4 }));
        assert_eq!(storage.raw("k").as_deref(), Some("[]"));
    }

    #[test]
    fn disabled_storage_fails_both_ways() {
        let storage = InMemoryStorage::seeded("k", "[]");
        storage.set_available(false);
        assert!(matches!(storage.get("k"), Err(StorageError::Unavailable(_))));
        assert!(matches!(storage.set("k", "[]"), Err(StorageError::Unavailable(_))));
    }
}
