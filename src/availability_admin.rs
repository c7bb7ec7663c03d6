//! Manual calendar blocking for administrators.

use chrono::NaiveDate;
use std::path::Path;

use crate::availability::{toggle_date_availability, AvailabilityAction};
use crate::error::StudioError;
use crate::file_io::load_studio_directory;
use crate::ids::{generate_record_identifier, RecordIdentifierRequest};
use crate::models::UnavailableDateRecord;
use crate::record_files::{
    list_record_identifiers, load_bookings_from_directory, load_unavailable_from_directory,
    record_path_for_identifier, write_unavailable_to_file,
};

/// Disable a date for new bookings.
///
/// # Arguments
/// * `root` - Repository root path.
/// * `date` - Civil date to disable.
///
/// # Errors
/// Returns `StudioError::ActiveBookingConflict` if a live booking
/// occupies the date, or `StudioError::BookingOperation` if the date is
/// already disabled.
pub fn disable_date(root: &Path, date: NaiveDate) -> Result<UnavailableDateRecord, StudioError> {
    let studio_dir = load_studio_directory(root)?;
    let unavailable_dir = studio_dir.join("unavailable");
    match plan_toggle(&studio_dir, date)? {
        AvailabilityAction::Enable { .. } => Err(StudioError::BookingOperation(format!(
            "date {date} is already disabled"
        ))),
        AvailabilityAction::Disable { date } => {
            let existing_ids = list_record_identifiers(&unavailable_dir)?;
            let identifier = generate_record_identifier(&RecordIdentifierRequest {
                existing_ids,
                prefix: "hold".to_string(),
            })?;
            let record = UnavailableDateRecord { identifier, date };
            let record_path = record_path_for_identifier(&unavailable_dir, &record.identifier);
            write_unavailable_to_file(&record, &record_path)?;
            Ok(record)
        }
    }
}

/// Re-enable a previously disabled date.
///
/// # Arguments
/// * `root` - Repository root path.
/// * `date` - Civil date to enable.
///
/// # Errors
/// Returns `StudioError::BookingOperation` if the date is not disabled.
pub fn enable_date(root: &Path, date: NaiveDate) -> Result<(), StudioError> {
    let studio_dir = load_studio_directory(root)?;
    let unavailable_dir = studio_dir.join("unavailable");
    match plan_toggle(&studio_dir, date)? {
        AvailabilityAction::Disable { .. } => Err(StudioError::BookingOperation(format!(
            "date {date} is not disabled"
        ))),
        AvailabilityAction::Enable { record_id } => {
            let record_path = record_path_for_identifier(&unavailable_dir, &record_id);
            std::fs::remove_file(&record_path)
                .map_err(|error| StudioError::Io(error.to_string()))?;
            Ok(())
        }
    }
}

/// List the currently disabled dates, sorted.
///
/// # Errors
/// Returns `StudioError` if records cannot be read.
pub fn list_unavailable_dates(root: &Path) -> Result<Vec<UnavailableDateRecord>, StudioError> {
    let studio_dir = load_studio_directory(root)?;
    load_unavailable_from_directory(&studio_dir.join("unavailable"))
}

fn plan_toggle(studio_dir: &Path, date: NaiveDate) -> Result<AvailabilityAction, StudioError> {
    let records = load_unavailable_from_directory(&studio_dir.join("unavailable"))?;
    let bookings = load_bookings_from_directory(&studio_dir.join("bookings"))?;
    toggle_date_availability(date, &records, &bookings)
}
