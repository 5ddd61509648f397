//! Daily headline numbers: today's count and the next upcoming booking.

use chrono::{NaiveDate, NaiveDateTime};

use tablebook_reservations::Reservation;

/// The soonest booking at or after "now", or explicitly none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextUpcoming<'a> {
    Reservation(&'a Reservation),
    None,
}

impl<'a> NextUpcoming<'a> {
    pub fn reservation(&self) -> Option<&'a Reservation> {
        match *self {
            NextUpcoming::Reservation(r) => Some(r),
            NextUpcoming::None => None,
        }
    }
}

impl core::fmt::Display for NextUpcoming<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            NextUpcoming::Reservation(r) => {
                write!(f, "{} • {}", r.time().format("%H:%M"), r.table())
            }
            NextUpcoming::None => f.write_str("–"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyMetrics<'a> {
    pub today: NaiveDate,
    pub today_count: usize,
    pub next_upcoming: NextUpcoming<'a>,
}

/// Metrics relative to the venue-local instant `now`.
pub fn project(reservations: &[Reservation], now: NaiveDateTime) -> DailyMetrics<'_> {
    let today = now.date();
    let today_count = reservations.iter().filter(|r| r.date() == today).count();

    // `min_by_key` keeps the first of equal minima, matching a stable sort.
    let next_upcoming = reservations
        .iter()
        .filter(|r| r.date_time() >= now)
        .min_by_key(|r| r.date_time())
        .map_or(NextUpcoming::None, NextUpcoming::Reservation);

    DailyMetrics {
        today,
        today_count,
        next_upcoming,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::reservation;
    use tablebook_reservations::parse_local_date_time;

    fn at(s: &str) -> NaiveDateTime {
        parse_local_date_time(s).unwrap()
    }

    #[test]
    fn counts_only_same_day_and_picks_soonest_upcoming() {
        let data = vec![
            reservation("Δ1", "2024-06-01T21:00", "Ana"),
            reservation("Δ2", "2024-06-01T12:00", "Babis"),
            reservation("Δ3", "2024-06-02T13:00", "Christina"),
            reservation("Δ4", "2024-06-01T19:30", "Dimitris"),
        ];

        let metrics = project(&data, at("2024-06-01T15:00"));
        assert_eq!(metrics.today, at("2024-06-01T00:00").date());
        assert_eq!(metrics.today_count, 3);
        let next = metrics.next_upcoming.reservation().unwrap();
        assert_eq!(next.customer_name(), "Dimitris");
        assert_eq!(metrics.next_upcoming.to_string(), "19:30 • Δ4");
    }

    #[test]
    fn booking_exactly_now_is_upcoming() {
        let data = vec![reservation("Δ1", "2024-06-01T19:00", "Ana")];
        let metrics = project(&data, at("2024-06-01T19:00"));
        assert_eq!(metrics.next_upcoming.reservation().unwrap().customer_name(), "Ana");
    }

    #[test]
    fn all_past_reports_none_explicitly() {
        let data = vec![
            reservation("Δ1", "2024-05-31T21:00", "Ana"),
            reservation("Δ2", "2024-06-01T12:00", "Babis"),
        ];
        let metrics = project(&data, at("2024-06-01T15:00"));
        assert_eq!(metrics.today_count, 1);
        assert_eq!(metrics.next_upcoming, NextUpcoming::None);
        assert_eq!(metrics.next_upcoming.to_string(), "–");
    }

    #[test]
    fn empty_collection() {
        let metrics = project(&[], at("2024-06-01T15:00"));
        assert_eq!(metrics.today_count, 0);
        assert_eq!(metrics.next_upcoming, NextUpcoming::None);
    }

    #[test]
    fn upcoming_may_be_on_a_later_day() {
        let data = vec![reservation("Ο1", "2024-06-03T10:00", "Eleni")];
        let metrics = project(&data, at("2024-06-01T15:00"));
        assert_eq!(metrics.today_count, 0);
        assert_eq!(metrics.next_upcoming.to_string(), "10:00 • Ο1");
    }
}
