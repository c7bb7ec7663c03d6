//! Booking listing and calendar views.

use chrono::NaiveDate;
use std::path::Path;

use crate::availability::{approved_booking_dates, is_date_bookable, unavailable_dates};
use crate::cache::{ListingCache, MonthKey};
use crate::calendar::{civil_today, days_in_month, first_of_month, resolve_time_zone};
use crate::config_loader::load_studio_configuration;
use crate::error::StudioError;
use crate::file_io::{get_configuration_path, load_studio_directory};
use crate::models::{BookingData, BookingStatus};
use crate::queries::{filter_bookings, search_bookings, sort_bookings};
use crate::record_files::{load_bookings_from_directory, load_unavailable_from_directory};

/// Availability summary for one calendar day.
#[derive(Debug, Clone)]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub disabled: bool,
    pub approved: bool,
    pub pending_count: usize,
    pub bookable: bool,
}

/// Availability view of one month.
#[derive(Debug, Clone)]
pub struct MonthAvailability {
    pub year: i32,
    pub month: u32,
    pub days: Vec<DayAvailability>,
}

/// List bookings for the studio.
///
/// # Arguments
/// * `root` - Repository root path.
///
/// # Errors
/// Returns `StudioError` when listing fails.
pub fn list_bookings(
    root: &Path,
    status: Option<&str>,
    package: Option<&str>,
    client: Option<&str>,
    staff: Option<&str>,
    sort: Option<&str>,
    search: Option<&str>,
) -> Result<Vec<BookingData>, StudioError> {
    let studio_dir = load_studio_directory(root)?;
    let bookings = load_bookings_from_directory(&studio_dir.join("bookings"))?;
    let filtered = filter_bookings(bookings, status, package, client, staff);
    let searched = search_bookings(filtered, search);
    sort_bookings(searched, sort)
}

/// Build the availability view for one month.
///
/// Every day is run through the availability engine with the studio's
/// configured lead window, so the view matches what `sdesk book` will
/// accept.
///
/// # Errors
/// Returns `StudioError` if records cannot be read.
pub fn month_view(root: &Path, year: i32, month: u32) -> Result<MonthAvailability, StudioError> {
    let studio_dir = load_studio_directory(root)?;
    let configuration = load_studio_configuration(&get_configuration_path(root)?)?;
    let bookings = load_bookings_from_directory(&studio_dir.join("bookings"))?;
    let unavailable = load_unavailable_from_directory(&studio_dir.join("unavailable"))?;

    let zone = resolve_time_zone(&configuration)?;
    let today = civil_today(zone);
    let disabled_dates = unavailable_dates(&unavailable);
    let approved_dates = approved_booking_dates(&bookings, None);

    let first = first_of_month(year, month)?;
    let mut days = Vec::new();
    for offset in 0..days_in_month(year, month)? {
        let date = first + chrono::Duration::days(i64::from(offset));
        let pending_count = bookings
            .iter()
            .filter(|booking| booking.date == date && booking.status == BookingStatus::Pending)
            .count();
        days.push(DayAvailability {
            date,
            disabled: disabled_dates.contains(&date),
            approved: approved_dates.contains(&date),
            pending_count,
            bookable: is_date_bookable(
                date,
                today,
                &disabled_dates,
                &approved_dates,
                configuration.minimum_lead_days,
            ),
        });
    }

    Ok(MonthAvailability { year, month, days })
}

/// Build availability views for consecutive months through a cache.
///
/// The cache belongs to the caller; entries stay valid until the caller
/// invalidates them after a mutation.
///
/// # Errors
/// Returns `StudioError` if any month view cannot be built.
pub fn month_views_cached(
    root: &Path,
    start_year: i32,
    start_month: u32,
    months: u32,
    cache: &mut ListingCache<MonthKey, MonthAvailability>,
) -> Result<Vec<MonthAvailability>, StudioError> {
    let mut views = Vec::new();
    let mut year = start_year;
    let mut month = start_month;
    for _ in 0..months.max(1) {
        let key = MonthKey { year, month };
        let view = cache.fetch(key, || month_view(root, year, month))?;
        views.push(view.clone());
        month += 1;
        if month > 12 {
            month = 1;
            year += 1;
        }
    }
    Ok(views)
}
