//! Query utilities for booking listing.

use std::collections::HashSet;

use crate::error::StudioError;
use crate::models::BookingData;

/// Filter bookings by common fields.
///
/// # Arguments
/// * `bookings` - Bookings to filter.
/// * `status` - Status filter (key form, e.g. "pending").
/// * `package` - Package filter.
/// * `client` - Client name filter (case-insensitive exact match).
/// * `staff` - Assigned staff member filter.
pub fn filter_bookings(
    bookings: Vec<BookingData>,
    status: Option<&str>,
    package: Option<&str>,
    client: Option<&str>,
    staff: Option<&str>,
) -> Vec<BookingData> {
    bookings
        .into_iter()
        .filter(|booking| status.is_none_or(|value| booking.status.key() == value))
        .filter(|booking| package.is_none_or(|value| booking.package == value))
        .filter(|booking| client.is_none_or(|value| booking.client.eq_ignore_ascii_case(value)))
        .filter(|booking| {
            staff.is_none_or(|value| booking.workload.assigned_staff.contains(value))
        })
        .collect()
}

/// Sort bookings by a supported key.
///
/// # Arguments
/// * `bookings` - Bookings to sort.
/// * `sort_key` - Sort key name ("date" or "created").
///
/// # Errors
/// Returns `StudioError::BookingOperation` if the sort key is unsupported.
pub fn sort_bookings(
    mut bookings: Vec<BookingData>,
    sort_key: Option<&str>,
) -> Result<Vec<BookingData>, StudioError> {
    let Some(key) = sort_key else {
        return Ok(bookings);
    };

    if key == "date" {
        bookings.sort_by_key(|booking| booking.date);
        return Ok(bookings);
    }
    if key == "created" {
        bookings.sort_by_key(|booking| booking.created_at);
        return Ok(bookings);
    }

    Err(StudioError::BookingOperation("invalid sort key".to_string()))
}

/// Search bookings by client, notes, and feedback text.
///
/// # Arguments
/// * `bookings` - Bookings to search.
/// * `term` - Search term.
pub fn search_bookings(bookings: Vec<BookingData>, term: Option<&str>) -> Vec<BookingData> {
    let Some(value) = term.filter(|value| !value.is_empty()) else {
        return bookings;
    };

    let lowered = value.to_lowercase();
    let mut matches = Vec::new();
    let mut seen = HashSet::new();

    for booking in bookings {
        if booking.client.to_lowercase().contains(&lowered)
            || booking.notes.to_lowercase().contains(&lowered)
        {
            if seen.insert(booking.identifier.clone()) {
                matches.push(booking);
            }
            continue;
        }

        let found = booking
            .feedback
            .iter()
            .any(|entry| entry.text.to_lowercase().contains(&lowered));
        if found && seen.insert(booking.identifier.clone()) {
            matches.push(booking);
        }
    }

    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookingStatus, WorkloadData};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn sample_booking(identifier: &str, client: &str, status: BookingStatus) -> BookingData {
        let timestamp = Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap();
        BookingData {
            identifier: identifier.to_string(),
            client: client.to_string(),
            package: "portrait".to_string(),
            add_ons: Vec::new(),
            date: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
            status,
            notes: String::new(),
            payments: Vec::new(),
            feedback: Vec::new(),
            workload: WorkloadData::default(),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    #[test]
    fn filter_by_status_keeps_matching_bookings() {
        let bookings = vec![
            sample_booking("shutter-aaa", "Reyes", BookingStatus::Pending),
            sample_booking("shutter-bbb", "Santos", BookingStatus::Approved),
        ];
        let filtered = filter_bookings(bookings, Some("approved"), None, None, None);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].identifier, "shutter-bbb");
    }

    #[test]
    fn search_matches_client_name_case_insensitively() {
        let bookings = vec![
            sample_booking("shutter-aaa", "Reyes", BookingStatus::Pending),
            sample_booking("shutter-bbb", "Santos", BookingStatus::Pending),
        ];
        let found = search_bookings(bookings, Some("reyes"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].identifier, "shutter-aaa");
    }

    #[test]
    fn sort_rejects_unknown_keys() {
        let bookings = vec![sample_booking("shutter-aaa", "Reyes", BookingStatus::Pending)];
        assert!(sort_bookings(bookings, Some("priority")).is_err());
    }
}
