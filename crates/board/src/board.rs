use chrono::NaiveDate;

use tablebook_core::{Clock, Entity, ReservationId, SystemClock};
use tablebook_infra::projections::{DailyMetrics, ListFilter, TableOccupancy, listing, metrics, occupancy};
use tablebook_infra::{FileStorage, KeyValueStorage, PersistenceState, ReservationStore};
use tablebook_reservations::{
    Conflict, ConflictDetector, Reservation, ReservationForm, SubmissionError, VenueCatalog,
};

use crate::config::{BoardConfig, ConfigError};

/// The reservation board: validation, conflict detection, the store and the
/// projections behind one owner.
///
/// Every intent runs to completion synchronously. Queries always read the
/// store's current collection, so views are consistent with the last
/// mutation.
#[derive(Debug)]
pub struct ReservationBoard<S, C = SystemClock> {
    store: ReservationStore<S>,
    detector: ConflictDetector,
    clock: C,
}

impl ReservationBoard<FileStorage, SystemClock> {
    /// Open the board described by `config`, backed by files on disk.
    pub fn from_config(config: &BoardConfig) -> Result<Self, ConfigError> {
        let catalog = config.load_catalog()?;
        let detector = config.conflict_detector()?;
        let storage = FileStorage::new(&config.storage_dir);
        Ok(Self::open(storage, &config.storage_key, catalog, detector))
    }
}

impl<S: KeyValueStorage> ReservationBoard<S, SystemClock> {
    pub fn open(
        storage: S,
        key: impl Into<String>,
        catalog: VenueCatalog,
        detector: ConflictDetector,
    ) -> Self {
        Self::with_clock(storage, key, catalog, detector, SystemClock)
    }
}

impl<S: KeyValueStorage, C: Clock> ReservationBoard<S, C> {
    pub fn with_clock(
        storage: S,
        key: impl Into<String>,
        catalog: VenueCatalog,
        detector: ConflictDetector,
        clock: C,
    ) -> Self {
        let store = ReservationStore::load(storage, key, catalog);
        if !store.persistence().is_available() {
            tracing::warn!("reservation board opened without persistence; changes will not survive a reload");
        }
        Self {
            store,
            detector,
            clock,
        }
    }

    /// Validate, check for a double booking, then record the reservation.
    ///
    /// Nothing is mutated unless the whole submission is accepted.
    pub fn submit_reservation(
        &mut self,
        form: &ReservationForm,
    ) -> Result<Reservation, SubmissionError> {
        let candidate = form.parse(self.store.catalog())?;

        if let Some(existing) = self
            .detector
            .find_conflict(self.store.reservations(), candidate.slot())
        {
            tracing::info!(
                table = candidate.table(),
                existing = %existing.id(),
                "submission rejected: table already booked"
            );
            return Err(SubmissionError::Conflict(Conflict::from_existing(existing)));
        }

        let reservation = candidate.into_reservation(ReservationId::new(), self.clock.now_utc());
        self.store.add(reservation.clone())?;
        Ok(reservation)
    }

    /// Cancel by id; returns whether anything was removed.
    pub fn cancel_reservation(&mut self, id: &ReservationId) -> bool {
        self.store.remove(id).is_some()
    }

    /// Remove every reservation. The caller asks for confirmation first.
    pub fn clear_all_reservations(&mut self) -> usize {
        self.store.clear_all()
    }

    pub fn query_occupancy(&self, area: &str, date: Option<NaiveDate>) -> Vec<TableOccupancy> {
        occupancy::project(self.store.catalog(), self.store.reservations(), area, date)
    }

    pub fn query_list(&self, date: Option<NaiveDate>, search: &str) -> Vec<&Reservation> {
        listing::project(self.store.reservations(), &ListFilter::new(date, search))
    }

    pub fn query_metrics(&self) -> DailyMetrics<'_> {
        metrics::project(self.store.reservations(), self.clock.now_local())
    }

    /// Whether changes still reach durable storage.
    pub fn persistence(&self) -> PersistenceState {
        self.store.persistence()
    }

    pub fn catalog(&self) -> &VenueCatalog {
        self.store.catalog()
    }

    pub fn reservations(&self) -> &[Reservation] {
        self.store.reservations()
    }

    pub fn get(&self, id: &ReservationId) -> Option<&Reservation> {
        self.store.get(id)
    }

    pub fn conflict_detector(&self) -> ConflictDetector {
        self.detector
    }
}
