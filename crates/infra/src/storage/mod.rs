//! Client-side key/value storage boundary.
//!
//! The reservation store persists its whole collection under a single key.
//! This module abstracts where that key lives without making any other
//! storage assumptions.

pub mod file;
pub mod in_memory;
pub mod r#trait;

pub use file::FileStorage;
pub use in_memory::InMemoryStorage;
pub use r#trait::{KeyValueStorage, StorageError};
