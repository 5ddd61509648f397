use chrono::Utc;

use tablebook_core::ReservationId;
use tablebook_reservations::{Reservation, ReservationForm, VenueCatalog};

/// Build a reservation on the default venue, locating the table's area.
pub(crate) fn reservation(table: &str, date_time: &str, customer: &str) -> Reservation {
    let catalog = VenueCatalog::default_venue();
    let area = catalog
        .areas()
        .find(|a| a.contains(table))
        .map(|a| a.name.clone())
        .unwrap();
    ReservationForm {
        customer_name: customer.to_string(),
        phone: "6900000000".to_string(),
        party_size: "2".to_string(),
        area,
        table: table.to_string(),
        notes: String::new(),
        date_time: Some(date_time.to_string()),
    }
    .parse(&catalog)
    .unwrap()
    .into_reservation(ReservationId::new(), Utc::now())
}
