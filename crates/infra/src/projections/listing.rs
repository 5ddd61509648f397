//! Filtered, time-ordered reservation list.

use chrono::NaiveDate;

use tablebook_reservations::Reservation;

/// Caller-supplied list filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Keep only reservations on this day.
    pub date: Option<NaiveDate>,
    /// Case-insensitive substring of customer name, table or area.
    pub search: String,
}

impl ListFilter {
    pub fn new(date: Option<NaiveDate>, search: impl Into<String>) -> Self {
        Self {
            date,
            search: search.into(),
        }
    }
}

/// Apply `filter` and sort ascending by date-time.
///
/// The sort is stable, so equal date-times keep insertion order. An empty
/// result means "no reservations", not an error.
pub fn project<'a>(reservations: &'a [Reservation], filter: &ListFilter) -> Vec<&'a Reservation> {
    let term = filter.search.trim().to_lowercase();

    let mut rows: Vec<&Reservation> = reservations
        .iter()
        .filter(|r| filter.date.is_none_or(|d| r.date() == d))
        .filter(|r| {
            term.is_empty()
                || r.customer_name().to_lowercase().contains(&term)
                || r.table().to_lowercase().contains(&term)
                || r.area().to_lowercase().contains(&term)
        })
        .collect();

    rows.sort_by_key(|r| r.date_time());
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::reservation;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn names<'a>(rows: &[&'a Reservation]) -> Vec<&'a str> {
        rows.iter().map(|r| r.customer_name()).collect()
    }

    fn sample() -> Vec<Reservation> {
        vec![
            reservation("Δ1", "2024-06-01T21:00", "Ana"),
            reservation("Α2", "2024-06-01T13:00", "Babis"),
            reservation("Ο4", "2024-06-02T20:00", "Christina"),
            reservation("ΚΜ", "2024-06-01T19:30", "dimitris"),
        ]
    }

    #[test]
    fn sorts_by_date_time_without_filters() {
        let data = sample();
        let rows = project(&data, &ListFilter::default());
        assert_eq!(names(&rows), vec!["Babis", "dimitris", "Ana", "Christina"]);
    }

    #[test]
    fn day_filter_keeps_only_that_day() {
        let data = sample();
        let rows = project(&data, &ListFilter::new(Some(day("2024-06-02")), ""));
        assert_eq!(names(&rows), vec!["Christina"]);
    }

    #[test]
    fn search_is_case_insensitive_across_name_table_and_area() {
        let data = sample();

        let by_name = project(&data, &ListFilter::new(None, "DIMI"));
        assert_eq!(names(&by_name), vec!["dimitris"]);

        let by_table = project(&data, &ListFilter::new(None, "κμ"));
        assert_eq!(names(&by_table), vec!["dimitris"]);

        let by_area = project(&data, &ListFilter::new(None, "outside"));
        assert_eq!(names(&by_area), vec!["Babis"]);
    }

    #[test]
    fn search_term_is_trimmed() {
        let data = sample();
        let rows = project(&data, &ListFilter::new(None, "  floor "));
        assert_eq!(names(&rows), vec!["dimitris", "Ana", "Christina"]);
    }

    #[test]
    fn date_and_search_combine() {
        let data = sample();
        let rows = project(&data, &ListFilter::new(Some(day("2024-06-01")), "floor"));
        assert_eq!(names(&rows), vec!["dimitris", "Ana"]);
    }

    #[test]
    fn no_match_is_empty_not_error() {
        let data = sample();
        assert!(project(&data, &ListFilter::new(None, "nobody")).is_empty());
        assert!(project(&[], &ListFilter::default()).is_empty());
    }

    #[test]
    fn equal_times_keep_insertion_order() {
        let data = vec![
            reservation("Δ2", "2024-06-01T19:00", "First"),
            reservation("Δ1", "2024-06-01T19:00", "Second"),
        ];
        let rows = project(&data, &ListFilter::default());
        assert_eq!(names(&rows), vec!["First", "Second"]);
    }
}
