//! Civil-date handling in the studio's time zone.
//!
//! All date normalization funnels through this module. A booking date is a
//! civil calendar date in the studio's configured zone; time-of-day and the
//! offset an instant was recorded with never participate in comparisons.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::error::StudioError;
use crate::models::StudioConfiguration;

/// Resolve the configured IANA time zone.
///
/// # Errors
/// Returns `StudioError::Configuration` if the zone name is unknown.
pub fn resolve_time_zone(configuration: &StudioConfiguration) -> Result<Tz, StudioError> {
    configuration.time_zone.parse::<Tz>().map_err(|_| {
        StudioError::Configuration(format!("unknown time zone '{}'", configuration.time_zone))
    })
}

/// Normalize an instant to the studio's civil date.
pub fn normalize_civil_date(instant: DateTime<Utc>, zone: Tz) -> NaiveDate {
    instant.with_timezone(&zone).date_naive()
}

/// Today's civil date in the studio's zone.
pub fn civil_today(zone: Tz) -> NaiveDate {
    normalize_civil_date(Utc::now(), zone)
}

/// Parse a `YYYY-MM-DD` civil date from user input.
///
/// # Errors
/// Returns `StudioError::BookingOperation` if the value is not a valid date.
pub fn parse_civil_date(value: &str) -> Result<NaiveDate, StudioError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| StudioError::BookingOperation(format!("invalid date '{value}'")))
}

/// First day of the given month.
///
/// # Errors
/// Returns `StudioError::BookingOperation` if the month is out of range.
pub fn first_of_month(year: i32, month: u32) -> Result<NaiveDate, StudioError> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| StudioError::BookingOperation(format!("invalid month '{year}-{month:02}'")))
}

/// Number of days in the given month.
pub fn days_in_month(year: i32, month: u32) -> Result<u32, StudioError> {
    let first = first_of_month(year, month)?;
    let next = if month == 12 {
        first_of_month(year + 1, 1)?
    } else {
        first_of_month(year, month + 1)?
    };
    Ok(next.signed_duration_since(first).num_days() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn manila() -> Tz {
        "Asia/Manila".parse::<Tz>().unwrap()
    }

    #[test]
    fn normalization_uses_the_studio_zone_not_utc() {
        // 2025-05-31 17:30 UTC is already 2025-06-01 01:30 in Manila (+08:00).
        let instant = Utc.with_ymd_and_hms(2025, 5, 31, 17, 30, 0).unwrap();
        assert_eq!(
            normalize_civil_date(instant, manila()),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
        );
        let earlier = Utc.with_ymd_and_hms(2025, 5, 31, 15, 30, 0).unwrap();
        assert_eq!(
            normalize_civil_date(earlier, manila()),
            NaiveDate::from_ymd_opt(2025, 5, 31).unwrap()
        );
    }

    #[test]
    fn instants_on_the_same_civil_day_normalize_equal() {
        let morning = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let evening = Utc.with_ymd_and_hms(2025, 6, 1, 15, 59, 59).unwrap();
        assert_eq!(
            normalize_civil_date(morning, manila()),
            normalize_civil_date(evening, manila())
        );
    }

    #[test]
    fn parse_civil_date_accepts_iso_and_rejects_garbage() {
        assert_eq!(
            parse_civil_date("2025-06-15").unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
        );
        assert!(parse_civil_date("June 15").is_err());
        assert!(parse_civil_date("2025-02-30").is_err());
    }

    #[test]
    fn days_in_month_handles_leap_years_and_december() {
        assert_eq!(days_in_month(2024, 2).unwrap(), 29);
        assert_eq!(days_in_month(2025, 2).unwrap(), 28);
        assert_eq!(days_in_month(2025, 12).unwrap(), 31);
    }
}
