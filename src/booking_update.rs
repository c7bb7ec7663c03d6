//! Booking reschedule and cancellation workflows.

use chrono::{NaiveDate, Utc};
use std::path::Path;

use crate::availability::{approved_booking_dates, check_date_bookable, unavailable_dates};
use crate::calendar::{civil_today, resolve_time_zone};
use crate::booking_lookup::load_booking_from_studio;
use crate::config_loader::load_studio_configuration;
use crate::error::StudioError;
use crate::file_io::get_configuration_path;
use crate::models::{BookingData, BookingStatus};
use crate::record_files::{
    load_bookings_from_directory, load_unavailable_from_directory, write_booking_to_file,
};

/// Move a live booking to a new date.
///
/// The new date must clear the availability engine; the booking's own
/// approved hold on its current date is excluded from the conflict set.
///
/// # Arguments
/// * `root` - Repository root path.
/// * `identifier` - Booking identifier.
/// * `new_date` - Requested civil date.
/// * `override_lead_time` - Skip the lead-time rule (administrative flow).
///
/// # Errors
/// Returns `StudioError` if the booking is not live or the date is not
/// bookable.
pub fn reschedule_booking(
    root: &Path,
    identifier: &str,
    new_date: NaiveDate,
    override_lead_time: bool,
) -> Result<BookingData, StudioError> {
    let lookup = load_booking_from_studio(root, identifier)?;
    if !lookup.booking.status.is_live() {
        return Err(StudioError::BookingOperation(format!(
            "cannot reschedule a {} booking",
            lookup.booking.status
        )));
    }

    let configuration = load_studio_configuration(&get_configuration_path(root)?)?;
    let bookings = load_bookings_from_directory(&lookup.studio_dir.join("bookings"))?;
    let unavailable = load_unavailable_from_directory(&lookup.studio_dir.join("unavailable"))?;

    let zone = resolve_time_zone(&configuration)?;
    let minimum_lead_days = if override_lead_time {
        0
    } else {
        configuration.minimum_lead_days
    };
    check_date_bookable(
        new_date,
        civil_today(zone),
        &unavailable_dates(&unavailable),
        &approved_booking_dates(&bookings, Some(identifier)),
        minimum_lead_days,
    )?;

    let mut updated = lookup.booking.clone();
    updated.date = new_date;
    updated.updated_at = Utc::now();
    write_booking_to_file(&updated, &lookup.booking_path)?;
    Ok(updated)
}

/// Cancel a live booking, freeing its date.
///
/// # Arguments
/// * `root` - Repository root path.
/// * `identifier` - Booking identifier.
///
/// # Errors
/// Returns `StudioError::BookingOperation` if the booking is already
/// rejected or cancelled.
pub fn cancel_booking(root: &Path, identifier: &str) -> Result<BookingData, StudioError> {
    let lookup = load_booking_from_studio(root, identifier)?;
    if !lookup.booking.status.is_live() {
        return Err(StudioError::BookingOperation(format!(
            "cannot cancel a {} booking",
            lookup.booking.status
        )));
    }

    let mut updated = lookup.booking.clone();
    updated.status = BookingStatus::Cancelled;
    updated.updated_at = Utc::now();
    write_booking_to_file(&updated, &lookup.booking_path)?;
    Ok(updated)
}
