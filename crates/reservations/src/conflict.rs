//! Double-booking detection.
//!
//! Two bookings on the same table conflict when their date-times are closer
//! than the tolerance window. Bookings on different tables never conflict.
//!
//! Distances are measured between venue-local wall-clock readings, as entered
//! on the form. No time zone is attached, so a pair of bookings spanning a
//! daylight-saving change is compared by the clock on the wall, not by
//! elapsed time.

use chrono::{Duration, NaiveTime};

use tablebook_core::{DomainError, DomainResult, Entity, ReservationId};

use crate::reservation::{Reservation, Slot};

/// Minimum separation between two bookings on the same table.
pub const DEFAULT_CONFLICT_WINDOW_MINUTES: i64 = 90;

/// The existing booking a candidate collided with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub reservation_id: ReservationId,
    pub table: String,
    pub time: NaiveTime,
    pub customer_name: String,
}

impl Conflict {
    pub fn from_existing(existing: &Reservation) -> Self {
        Self {
            reservation_id: *existing.id(),
            table: existing.table().to_string(),
            time: existing.time(),
            customer_name: existing.customer_name().to_string(),
        }
    }
}

impl core::fmt::Display for Conflict {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Heads up: {} is already booked at {} for {}.",
            self.table,
            self.time.format("%H:%M"),
            self.customer_name
        )
    }
}

/// Same-table collision check with a configurable tolerance window.
///
/// The comparison is strict: bookings exactly one window apart are fine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConflictDetector {
    window: Duration,
}

impl ConflictDetector {
    pub fn new(window: Duration) -> DomainResult<Self> {
        if window <= Duration::zero() {
            return Err(DomainError::validation("conflict window must be positive"));
        }
        Ok(Self { window })
    }

    pub fn from_minutes(minutes: i64) -> DomainResult<Self> {
        let window = Duration::try_minutes(minutes).ok_or_else(|| {
            DomainError::validation(format!("conflict window of {minutes} minutes is out of range"))
        })?;
        Self::new(window)
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Whether two slots are too close on the same table.
    pub fn collides(&self, a: Slot<'_>, b: Slot<'_>) -> bool {
        a.table == b.table && (a.date_time - b.date_time).abs() < self.window
    }

    /// First existing reservation, in iteration order, that collides with
    /// `candidate`.
    pub fn find_conflict<'a, I>(&self, existing: I, candidate: Slot<'_>) -> Option<&'a Reservation>
    where
        I: IntoIterator<Item = &'a Reservation>,
    {
        existing
            .into_iter()
            .find(|r| self.collides(r.slot(), candidate))
    }
}

impl Default for ConflictDetector {
    fn default() -> Self {
        Self {
            window: Duration::minutes(DEFAULT_CONFLICT_WINDOW_MINUTES),
        }
    }
}
