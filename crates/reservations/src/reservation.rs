use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use tablebook_core::{DomainError, Entity, ReservationId};

use crate::catalog::VenueCatalog;
use crate::conflict::Conflict;

const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";
const TIME_FORMAT: &str = "%H:%M";

/// Parse a venue-local date-time as produced by a local date-time picker.
///
/// Accepts `YYYY-MM-DDTHH:MM` with optional seconds and fractional seconds;
/// the result is truncated to minute precision.
pub fn parse_local_date_time(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .and_then(|dt| dt.with_second(0))
        .and_then(|dt| dt.with_nanosecond(0))
}

mod local_minute {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&value.format(super::DATE_TIME_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_local_date_time(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid dateTime: {raw}")))
    }
}

mod clock_minute {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(value: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&value.format(super::TIME_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveTime::parse_from_str(&raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(|e| de::Error::custom(format!("invalid time {raw}: {e}")))
    }
}

/// Position of a booking in (table, time) space; all the conflict detector
/// needs to know about a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot<'a> {
    pub table: &'a str,
    pub date_time: NaiveDateTime,
}

/// A booking linking a customer to one table at one date/time.
///
/// Immutable once created; the only way to change a booking is to cancel it
/// and submit a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    id: ReservationId,
    customer_name: String,
    #[serde(default)]
    phone: String,
    party_size: u32,
    area: String,
    table: String,
    #[serde(default)]
    notes: String,
    date: NaiveDate,
    #[serde(with = "clock_minute")]
    time: NaiveTime,
    #[serde(with = "local_minute")]
    date_time: NaiveDateTime,
    created_at: DateTime<Utc>,
}

impl Reservation {
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn party_size(&self) -> u32 {
        self.party_size
    }

    pub fn area(&self) -> &str {
        &self.area
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn date_time(&self) -> NaiveDateTime {
        self.date_time
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn slot(&self) -> Slot<'_> {
        Slot {
            table: &self.table,
            date_time: self.date_time,
        }
    }
}

impl Entity for Reservation {
    type Id = ReservationId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Raw form fields as collected by the presentation layer.
///
/// Nothing here is trusted; `parse` turns it into a [`NewReservation`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReservationForm {
    pub customer_name: String,
    pub phone: String,
    pub party_size: String,
    pub area: String,
    pub table: String,
    pub notes: String,
    pub date_time: Option<String>,
}

/// Why a submission was turned down.
///
/// The `Display` text is the user-facing message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Please select a date and time.")]
    MissingDateTime,

    #[error("Unrecognised date and time: {0}.")]
    InvalidDateTime(String),

    #[error("Name, phone, party size, and time are required.")]
    MissingRequiredFields,

    #[error("Unknown area: {0}.")]
    UnknownArea(String),

    #[error("Table {table} does not belong to {area}.")]
    UnknownTable { area: String, table: String },

    #[error("{0}")]
    Conflict(Conflict),

    /// The store refused the record on structural grounds.
    #[error("Reservation rejected: {0}")]
    Rejected(#[from] DomainError),
}

impl SubmissionError {
    /// Conflicts and validation failures are both recoverable by re-submitting;
    /// this tells them apart for the caller.
    pub fn is_conflict(&self) -> bool {
        matches!(self, SubmissionError::Conflict(_))
    }
}

/// A validated submission: required fields present, `table ∈ area`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    customer_name: String,
    phone: String,
    party_size: u32,
    area: String,
    table: String,
    notes: String,
    date_time: NaiveDateTime,
}

impl ReservationForm {
    /// Validate the raw fields against the catalog.
    ///
    /// Checks run in order: date/time present, date/time parseable, required
    /// fields, area known, table within area.
    pub fn parse(&self, catalog: &VenueCatalog) -> Result<NewReservation, SubmissionError> {
        let raw_date_time = self
            .date_time
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(SubmissionError::MissingDateTime)?;

        let date_time = parse_local_date_time(raw_date_time)
            .ok_or_else(|| SubmissionError::InvalidDateTime(raw_date_time.to_string()))?;

        let customer_name = self.customer_name.trim();
        let phone = self.phone.trim();
        let party_size = self
            .party_size
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0);

        let party_size = match party_size {
            Some(n) if !customer_name.is_empty() && !phone.is_empty() => n,
            _ => return Err(SubmissionError::MissingRequiredFields),
        };

        let area = catalog
            .area(&self.area)
            .ok_or_else(|| SubmissionError::UnknownArea(self.area.clone()))?;

        if !area.contains(&self.table) {
            return Err(SubmissionError::UnknownTable {
                area: self.area.clone(),
                table: self.table.clone(),
            });
        }

        Ok(NewReservation {
            customer_name: customer_name.to_string(),
            phone: phone.to_string(),
            party_size,
            area: self.area.clone(),
            table: self.table.clone(),
            notes: self.notes.trim().to_string(),
            date_time,
        })
    }
}

impl NewReservation {
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn area(&self) -> &str {
        &self.area
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn date_time(&self) -> NaiveDateTime {
        self.date_time
    }

    pub fn slot(&self) -> Slot<'_> {
        Slot {
            table: &self.table,
            date_time: self.date_time,
        }
    }

    /// Stamp the submission with its identity, deriving `date`/`time` from
    /// the single `date_time` value.
    pub fn into_reservation(self, id: ReservationId, created_at: DateTime<Utc>) -> Reservation {
        Reservation {
            id,
            customer_name: self.customer_name,
            phone: self.phone,
            party_size: self.party_size,
            area: self.area,
            table: self.table,
            notes: self.notes,
            date: self.date_time.date(),
            time: self.date_time.time(),
            date_time: self.date_time,
            created_at,
        }
    }
}
