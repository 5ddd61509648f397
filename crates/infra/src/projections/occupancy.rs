//! Per-table availability badges for one area.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use tablebook_core::{Entity, ReservationId};
use tablebook_reservations::{Reservation, VenueCatalog};

/// The booking that makes a table show as reserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Booking {
    pub reservation_id: ReservationId,
    pub time: NaiveTime,
    pub customer_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableOccupancy {
    pub table: String,
    pub booking: Option<Booking>,
}

impl TableOccupancy {
    pub fn is_available(&self) -> bool {
        self.booking.is_none()
    }
}

/// Occupancy of every table in `area`, in catalog order.
///
/// A table is occupied when some reservation names it and, if `date` is
/// given, falls on that day. Without a date any day matches. The first
/// matching reservation in insertion order is reported. Unknown areas yield
/// an empty view.
pub fn project(
    catalog: &VenueCatalog,
    reservations: &[Reservation],
    area: &str,
    date: Option<NaiveDate>,
) -> Vec<TableOccupancy> {
    let Some(tables) = catalog.tables(area) else {
        return Vec::new();
    };

    tables
        .iter()
        .map(|table| {
            let booking = reservations
                .iter()
                .find(|r| r.table() == table && date.is_none_or(|d| r.date() == d))
                .map(|r| Booking {
                    reservation_id: *r.id(),
                    time: r.time(),
                    customer_name: r.customer_name().to_string(),
                });
            TableOccupancy {
                table: table.clone(),
                booking,
            }
        })
        .collect()
}
