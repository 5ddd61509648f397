//! Read-only views derived from the reservation collection.
//!
//! Every projection is a pure function of the current collection plus the
//! caller's parameters (area, date, search term, current time). Nothing is
//! cached: views are recomputed after each mutation, so they can never drift
//! from the store.

pub mod listing;
pub mod metrics;
pub mod occupancy;

pub use listing::ListFilter;
pub use metrics::{DailyMetrics, NextUpcoming};
pub use occupancy::{Booking, TableOccupancy};
