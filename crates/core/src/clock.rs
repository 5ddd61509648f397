//! Wall-clock abstraction.
//!
//! Reservations are entered and displayed in venue-local time, so the clock
//! exposes both the local wall-clock reading (for "today" and "upcoming") and
//! the UTC instant (for `created_at` stamps).

use chrono::{DateTime, Local, NaiveDateTime, Utc};

/// Source of the current time.
pub trait Clock {
    /// Current instant in UTC.
    fn now_utc(&self) -> DateTime<Utc>;

    /// Current venue-local wall-clock time.
    fn now_local(&self) -> NaiveDateTime;
}

/// Production clock backed by the operating system.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn now_local(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Fixed clock for deterministic tests.
///
/// The local reading is the UTC reading with the offset dropped.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    local: NaiveDateTime,
}

impl FixedClock {
    pub fn new(local: NaiveDateTime) -> Self {
        Self { local }
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.local.and_utc()
    }

    fn now_local(&self) -> NaiveDateTime {
        self.local
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_utc(&self) -> DateTime<Utc> {
        (**self).now_utc()
    }

    fn now_local(&self) -> NaiveDateTime {
        (**self).now_local()
    }
}
