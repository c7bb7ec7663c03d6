//! Booking-date availability decisions.
//!
//! Pure set-membership and lead-time checks over data the caller fetched
//! from the store. Nothing here reads the clock or touches disk; "today"
//! is always supplied as the studio-zone civil date.

use chrono::{Duration, NaiveDate};
use std::collections::BTreeSet;

use crate::error::StudioError;
use crate::models::{BookingData, UnavailableDateRecord};

/// Intent produced by the availability toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityAction {
    /// Create an unavailable-date record for the date.
    Disable { date: NaiveDate },
    /// Delete the existing unavailable-date record.
    Enable { record_id: String },
}

/// Whether a date is blocked by a manual hold or an approved booking.
pub fn is_date_blocked(
    date: NaiveDate,
    unavailable: &BTreeSet<NaiveDate>,
    approved: &BTreeSet<NaiveDate>,
) -> bool {
    unavailable.contains(&date) || approved.contains(&date)
}

/// Decide whether a new booking may be placed on the date.
///
/// The lead window is inclusive at its boundary: a date exactly
/// `minimum_lead_days` from today is bookable.
///
/// # Errors
/// Returns `StudioError::LeadTimeViolation` for dates inside the lead
/// window and `StudioError::DateBlocked` for occupied or disabled dates.
pub fn check_date_bookable(
    date: NaiveDate,
    today: NaiveDate,
    unavailable: &BTreeSet<NaiveDate>,
    approved: &BTreeSet<NaiveDate>,
    minimum_lead_days: u32,
) -> Result<(), StudioError> {
    let earliest = today + Duration::days(i64::from(minimum_lead_days));
    if date < earliest {
        return Err(StudioError::LeadTimeViolation(format!(
            "date {date} is inside the {minimum_lead_days}-day lead window (earliest is {earliest})"
        )));
    }
    if is_date_blocked(date, unavailable, approved) {
        return Err(StudioError::DateBlocked(format!(
            "date {date} is not available"
        )));
    }
    Ok(())
}

/// Boolean form of `check_date_bookable` for calendar cells.
pub fn is_date_bookable(
    date: NaiveDate,
    today: NaiveDate,
    unavailable: &BTreeSet<NaiveDate>,
    approved: &BTreeSet<NaiveDate>,
    minimum_lead_days: u32,
) -> bool {
    check_date_bookable(date, today, unavailable, approved, minimum_lead_days).is_ok()
}

/// Toggle a date's manual availability.
///
/// Idempotent by construction: the emitted intent depends on current
/// membership, so applying it and toggling again returns the store to
/// its original state.
///
/// # Errors
/// Returns `StudioError::ActiveBookingConflict` if any live booking
/// occupies the date; the toggle never overrides an existing booking.
pub fn toggle_date_availability(
    date: NaiveDate,
    records: &[UnavailableDateRecord],
    bookings: &[BookingData],
) -> Result<AvailabilityAction, StudioError> {
    let occupied = bookings
        .iter()
        .any(|booking| booking.date == date && booking.status.is_live());
    if occupied {
        return Err(StudioError::ActiveBookingConflict(format!(
            "date {date} has an active booking"
        )));
    }

    match records.iter().find(|record| record.date == date) {
        Some(record) => Ok(AvailabilityAction::Enable {
            record_id: record.identifier.clone(),
        }),
        None => Ok(AvailabilityAction::Disable { date }),
    }
}

/// Collect the dates consumed by approved bookings.
///
/// `exclude` skips one booking's own record, for reschedule checks.
pub fn approved_booking_dates(bookings: &[BookingData], exclude: Option<&str>) -> BTreeSet<NaiveDate> {
    bookings
        .iter()
        .filter(|booking| booking.status == crate::models::BookingStatus::Approved)
        .filter(|booking| exclude != Some(booking.identifier.as_str()))
        .map(|booking| booking.date)
        .collect()
}

/// Collect the manually disabled dates.
pub fn unavailable_dates(records: &[UnavailableDateRecord]) -> BTreeSet<NaiveDate> {
    records.iter().map(|record| record.date).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookingStatus, WorkloadData};
    use chrono::{TimeZone, Utc};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn sample_booking(identifier: &str, on: NaiveDate, status: BookingStatus) -> BookingData {
        let timestamp = Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap();
        BookingData {
            identifier: identifier.to_string(),
            client: "Dela Cruz".to_string(),
            package: "wedding".to_string(),
            add_ons: Vec::new(),
            date: on,
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
    fn blocked_dates_cover_both_sources() {
        let unavailable = BTreeSet::from([date(2025, 6, 3)]);
        let approved = BTreeSet::from([date(2025, 6, 1)]);
        assert!(is_date_blocked(date(2025, 6, 3), &unavailable, &approved));
        assert!(is_date_blocked(date(2025, 6, 1), &unavailable, &approved));
        assert!(!is_date_blocked(date(2025, 6, 2), &unavailable, &approved));
    }

    #[test]
    fn lead_window_boundary_is_inclusive() {
        let today = date(2025, 5, 1);
        let empty = BTreeSet::new();
        assert!(is_date_bookable(date(2025, 5, 31), today, &empty, &empty, 30));
        let error = check_date_bookable(date(2025, 5, 30), today, &empty, &empty, 30)
            .expect_err("inside lead window");
        assert!(matches!(error, StudioError::LeadTimeViolation(_)));
    }

    #[test]
    fn lead_window_of_zero_allows_today() {
        let today = date(2025, 5, 1);
        let empty = BTreeSet::new();
        assert!(is_date_bookable(today, today, &empty, &empty, 0));
    }

    #[test]
    fn blocked_date_is_reported_after_lead_check() {
        let today = date(2025, 5, 1);
        let unavailable = BTreeSet::from([date(2025, 6, 3)]);
        let empty = BTreeSet::new();
        let error = check_date_bookable(date(2025, 6, 3), today, &unavailable, &empty, 30)
            .expect_err("blocked");
        assert!(matches!(error, StudioError::DateBlocked(_)));
    }

    #[test]
    fn toggle_rejects_dates_with_live_bookings() {
        let target = date(2025, 7, 1);
        let bookings = vec![sample_booking("shutter-aaa", target, BookingStatus::Pending)];
        let error = toggle_date_availability(target, &[], &bookings).expect_err("live booking");
        assert!(matches!(error, StudioError::ActiveBookingConflict(_)));
    }

    #[test]
    fn toggle_ignores_rejected_and_cancelled_bookings() {
        let target = date(2025, 7, 1);
        let bookings = vec![
            sample_booking("shutter-aaa", target, BookingStatus::Rejected),
            sample_booking("shutter-bbb", target, BookingStatus::Cancelled),
        ];
        let action = toggle_date_availability(target, &[], &bookings).unwrap();
        assert_eq!(action, AvailabilityAction::Disable { date: target });
    }

    #[test]
    fn toggle_emits_enable_for_existing_record() {
        let target = date(2025, 7, 1);
        let records = vec![UnavailableDateRecord {
            identifier: "hold-abc".to_string(),
            date: target,
        }];
        let action = toggle_date_availability(target, &records, &[]).unwrap();
        assert_eq!(
            action,
            AvailabilityAction::Enable {
                record_id: "hold-abc".to_string()
            }
        );
    }

    #[test]
    fn reschedule_excludes_own_approved_date() {
        let bookings = vec![
            sample_booking("shutter-aaa", date(2025, 6, 1), BookingStatus::Approved),
            sample_booking("shutter-bbb", date(2025, 6, 5), BookingStatus::Approved),
        ];
        let dates = approved_booking_dates(&bookings, Some("shutter-aaa"));
        assert_eq!(dates, BTreeSet::from([date(2025, 6, 5)]));
    }
}
