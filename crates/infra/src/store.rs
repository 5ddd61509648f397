//! The authoritative reservation collection and its persistence round-trip.

use serde::{Deserialize, Serialize};

use tablebook_core::entity::ids_are_unique;
use tablebook_core::{DomainError, DomainResult, Entity, ReservationId};
use tablebook_reservations::{Reservation, VenueCatalog};

use crate::storage::KeyValueStorage;

/// Whether writes still reach durable storage.
///
/// Once `Disabled`, it stays that way for the rest of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersistenceState {
    Available,
    Disabled,
}

impl PersistenceState {
    pub fn is_available(self) -> bool {
        self == PersistenceState::Available
    }
}

/// Ordered reservation collection with exclusive ownership.
///
/// - Insertion order is preserved and is the iteration order everywhere.
/// - Every mutation is followed by a persistence attempt.
/// - Persistence failures never reach the caller: they flip
///   [`PersistenceState`] to `Disabled` and the session continues in memory.
/// - Business rules (required fields, conflicts) are the caller's job; the
///   store only checks structure (unique id, `table ∈ area`).
#[derive(Debug)]
pub struct ReservationStore<S> {
    storage: S,
    key: String,
    catalog: VenueCatalog,
    reservations: Vec<Reservation>,
    persistence: PersistenceState,
}

impl<S: KeyValueStorage> ReservationStore<S> {
    /// Restore the collection persisted under `key`.
    ///
    /// Never fails: unreadable storage or malformed data yields an empty
    /// collection with persistence disabled. An absent key or an empty string
    /// is simply an empty board. Anything else must parse as a reservation
    /// array, so a whitespace-only value counts as malformed.
    pub fn load(storage: S, key: impl Into<String>, catalog: VenueCatalog) -> Self {
        let key = key.into();

        let (reservations, persistence) = match storage.get(&key) {
            Ok(None) => (Vec::new(), PersistenceState::Available),
            Ok(Some(raw)) if raw.is_empty() => (Vec::new(), PersistenceState::Available),
            Ok(Some(raw)) => match decode(&raw) {
                Ok(reservations) => {
                    tracing::debug!(key = %key, count = reservations.len(), "reservations loaded");
                    (reservations, PersistenceState::Available)
                }
                Err(err) => {
                    tracing::warn!(key = %key, error = %err, "discarding malformed reservations; persistence disabled");
                    (Vec::new(), PersistenceState::Disabled)
                }
            },
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "storage unavailable; persistence disabled");
                (Vec::new(), PersistenceState::Disabled)
            }
        };

        Self {
            storage,
            key,
            catalog,
            reservations,
            persistence,
        }
    }

    /// Append an already-validated reservation, then persist.
    pub fn add(&mut self, reservation: Reservation) -> DomainResult<()> {
        if self.get(reservation.id()).is_some() {
            return Err(DomainError::conflict(format!(
                "reservation {} already exists",
                reservation.id()
            )));
        }
        if !self.catalog.contains(reservation.area(), reservation.table()) {
            return Err(DomainError::invariant(format!(
                "table {} does not belong to area {}",
                reservation.table(),
                reservation.area()
            )));
        }

        tracing::info!(
            reservation_id = %reservation.id(),
            table = reservation.table(),
            date_time = %reservation.date_time(),
            "reservation added"
        );
        self.reservations.push(reservation);
        self.persist();
        Ok(())
    }

    /// Remove the reservation with `id`, if present.
    ///
    /// Absent ids are a no-op, not an error.
    pub fn remove(&mut self, id: &ReservationId) -> Option<Reservation> {
        let idx = self.reservations.iter().position(|r| r.id() == id)?;
        let removed = self.reservations.remove(idx);
        tracing::info!(reservation_id = %id, "reservation removed");
        self.persist();
        Some(removed)
    }

    /// Drop every reservation and persist the empty collection.
    ///
    /// Asking the user for confirmation is up to the caller.
    pub fn clear_all(&mut self) -> usize {
        let cleared = self.reservations.len();
        self.reservations.clear();
        tracing::info!(cleared, "all reservations cleared");
        self.persist();
        cleared
    }

    /// Write the full collection to storage.
    ///
    /// A failed write disables persistence for the rest of the session.
    pub fn persist(&mut self) {
        if !self.persistence.is_available() {
            return;
        }

        let result = serde_json::to_string(&self.reservations)
            .map_err(|e| e.to_string())
            .and_then(|raw| self.storage.set(&self.key, &raw).map_err(|e| e.to_string()));

        if let Err(err) = result {
            tracing::warn!(key = %self.key, error = %err, "persisting reservations failed; continuing in memory only");
            self.persistence = PersistenceState::Disabled;
        }
    }

    pub fn persistence(&self) -> PersistenceState {
        self.persistence
    }

    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn get(&self, id: &ReservationId) -> Option<&Reservation> {
        self.reservations.iter().find(|r| r.id() == id)
    }

    pub fn len(&self) -> usize {
        self.reservations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reservations.is_empty()
    }

    pub fn catalog(&self) -> &VenueCatalog {
        &self.catalog
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

fn decode(raw: &str) -> Result<Vec<Reservation>, String> {
    let reservations: Vec<Reservation> = serde_json::from_str(raw).map_err(|e| e.to_string())?;
    if !ids_are_unique(&reservations) {
        return Err("duplicate reservation ids".to_string());
    }
    Ok(reservations)
}
