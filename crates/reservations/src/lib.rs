//! Reservations domain module.
//!
//! This crate contains the business rules for table reservations, implemented
//! purely as deterministic domain logic (no IO, no storage).

pub mod catalog;
pub mod conflict;
pub mod reservation;

pub use catalog::{Area, VenueCatalog};
pub use conflict::{Conflict, ConflictDetector, DEFAULT_CONFLICT_WINDOW_MINUTES};
pub use reservation::{
    NewReservation, Reservation, ReservationForm, Slot, SubmissionError, parse_local_date_time,
};
