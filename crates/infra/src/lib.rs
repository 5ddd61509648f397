//! Infrastructure layer: client-side storage, the reservation store, and the
//! read-only projections derived from it.

pub mod projections;
pub mod storage;
pub mod store;

#[cfg(test)]
mod test_support;

pub use storage::{FileStorage, InMemoryStorage, KeyValueStorage, StorageError};
pub use store::{PersistenceState, ReservationStore};
