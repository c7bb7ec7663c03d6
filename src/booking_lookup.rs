//! Booking lookup helpers for the studio directory.

use std::path::{Path, PathBuf};

use crate::error::StudioError;
use crate::file_io::load_studio_directory;
use crate::models::BookingData;
use crate::record_files::{
    read_booking_from_file, record_path_for_identifier, resolve_record_identifier,
};

/// Booking lookup result.
#[derive(Debug)]
pub struct BookingLookupResult {
    pub booking: BookingData,
    pub booking_path: PathBuf,
    pub studio_dir: PathBuf,
}

/// Load a booking by identifier from the studio directory.
///
/// Accepts the full identifier or the abbreviated key shown in command
/// output.
///
/// # Arguments
/// * `root` - Repository root path.
/// * `identifier` - Booking identifier or unique prefix.
///
/// # Errors
/// Returns `StudioError::BookingOperation` if the booking cannot be found.
pub fn load_booking_from_studio(
    root: &Path,
    identifier: &str,
) -> Result<BookingLookupResult, StudioError> {
    let studio_dir = load_studio_directory(root)?;
    let bookings_dir = studio_dir.join("bookings");
    let resolved = resolve_record_identifier(&bookings_dir, identifier)?;
    let booking_path = record_path_for_identifier(&bookings_dir, &resolved);
    if !booking_path.exists() {
        return Err(StudioError::BookingOperation("not found".to_string()));
    }
    let booking = read_booking_from_file(&booking_path)?;
    Ok(BookingLookupResult {
        booking,
        booking_path,
        studio_dir,
    })
}
