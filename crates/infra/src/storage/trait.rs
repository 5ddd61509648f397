use std::sync::Arc;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    /// Storage is switched off or cannot be reached at all.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// A write would exceed the storage quota.
    #[error("storage quota exceeded (needed {needed} bytes, quota {quota} bytes)")]
    QuotaExceeded { needed: usize, quota: usize },

    /// The key cannot be represented by this backend.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Synchronous string key/value storage.
///
/// ## Semantics
///
/// - `get` returns `Ok(None)` when the key has never been written.
/// - `set` replaces the whole value for the key; a failed `set` leaves the
///   previous value in place.
///
/// Callers decide what a failure means; the reservation store treats any
/// error as "persistence is gone for this session".
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S> KeyValueStorage for Arc<S>
where
    S: KeyValueStorage + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

impl<S> KeyValueStorage for Box<S>
where
    S: KeyValueStorage + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}
