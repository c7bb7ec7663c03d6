//! Record file input/output helpers.
//!
//! Bookings, staff, and unavailable-date records each live as one JSON
//! file per record under the studio directory.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StudioError;
use crate::models::{BookingData, StaffData, UnavailableDateRecord};

/// List record identifiers based on JSON filenames.
///
/// # Arguments
/// * `records_directory` - Directory containing record files.
///
/// # Errors
/// Returns `StudioError::Io` if directory entries cannot be read.
pub fn list_record_identifiers(records_directory: &Path) -> Result<HashSet<String>, StudioError> {
    let mut identifiers = HashSet::new();
    for entry in
        fs::read_dir(records_directory).map_err(|error| StudioError::Io(error.to_string()))?
    {
        let entry = entry.map_err(|error| StudioError::Io(error.to_string()))?;
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|name| name.to_str()) {
            identifiers.insert(stem.to_string());
        }
    }
    Ok(identifiers)
}

/// Resolve a record file path by identifier.
///
/// # Arguments
/// * `records_directory` - Directory containing record files.
/// * `identifier` - Record identifier.
pub fn record_path_for_identifier(records_directory: &Path, identifier: &str) -> PathBuf {
    records_directory.join(format!("{identifier}.json"))
}

/// Resolve a possibly abbreviated identifier to a stored one.
///
/// Accepts the full identifier or any unique prefix of it, which covers
/// the abbreviated keys shown in command output.
///
/// # Arguments
/// * `records_directory` - Directory containing record files.
/// * `candidate` - Identifier or identifier prefix.
///
/// # Errors
/// Returns `StudioError::BookingOperation` when nothing matches or the
/// prefix is ambiguous.
pub fn resolve_record_identifier(
    records_directory: &Path,
    candidate: &str,
) -> Result<String, StudioError> {
    let identifiers = list_record_identifiers(records_directory)?;
    if identifiers.contains(candidate) {
        return Ok(candidate.to_string());
    }
    let mut matches: Vec<&String> = identifiers
        .iter()
        .filter(|identifier| identifier.starts_with(candidate))
        .collect();
    matches.sort();
    match matches.len() {
        0 => Err(StudioError::BookingOperation("not found".to_string())),
        1 => Ok(matches[0].clone()),
        _ => Err(StudioError::BookingOperation(format!(
            "identifier '{candidate}' is ambiguous"
        ))),
    }
}

fn read_record<T: DeserializeOwned>(record_path: &Path) -> Result<T, StudioError> {
    let contents = fs::read(record_path).map_err(|error| StudioError::Io(error.to_string()))?;
    serde_json::from_slice(&contents).map_err(|error| StudioError::Io(error.to_string()))
}

fn write_record<T: Serialize>(record: &T, record_path: &Path) -> Result<(), StudioError> {
    let contents =
        serde_json::to_string_pretty(record).map_err(|error| StudioError::Io(error.to_string()))?;
    fs::write(record_path, contents).map_err(|error| StudioError::Io(error.to_string()))
}

/// Read a booking from a JSON file.
///
/// # Errors
/// Returns `StudioError::Io` if reading or parsing fails.
pub fn read_booking_from_file(booking_path: &Path) -> Result<BookingData, StudioError> {
    read_record(booking_path)
}

/// Write a booking to a JSON file with pretty formatting.
///
/// # Errors
/// Returns `StudioError::Io` if writing fails.
pub fn write_booking_to_file(booking: &BookingData, booking_path: &Path) -> Result<(), StudioError> {
    write_record(booking, booking_path)
}

/// Read a staff record from a JSON file.
///
/// # Errors
/// Returns `StudioError::Io` if reading or parsing fails.
pub fn read_staff_from_file(staff_path: &Path) -> Result<StaffData, StudioError> {
    read_record(staff_path)
}

/// Write a staff record to a JSON file.
///
/// # Errors
/// Returns `StudioError::Io` if writing fails.
pub fn write_staff_to_file(staff: &StaffData, staff_path: &Path) -> Result<(), StudioError> {
    write_record(staff, staff_path)
}

/// Read an unavailable-date record from a JSON file.
///
/// # Errors
/// Returns `StudioError::Io` if reading or parsing fails.
pub fn read_unavailable_from_file(record_path: &Path) -> Result<UnavailableDateRecord, StudioError> {
    read_record(record_path)
}

/// Write an unavailable-date record to a JSON file.
///
/// # Errors
/// Returns `StudioError::Io` if writing fails.
pub fn write_unavailable_to_file(
    record: &UnavailableDateRecord,
    record_path: &Path,
) -> Result<(), StudioError> {
    write_record(record, record_path)
}

/// Load every booking under a directory, sorted by identifier.
///
/// # Errors
/// Returns `StudioError::Io` if any record cannot be read.
pub fn load_bookings_from_directory(bookings_dir: &Path) -> Result<Vec<BookingData>, StudioError> {
    let mut bookings = Vec::new();
    for entry in fs::read_dir(bookings_dir).map_err(|error| StudioError::Io(error.to_string()))? {
        let entry = entry.map_err(|error| StudioError::Io(error.to_string()))?;
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        bookings.push(read_booking_from_file(&path)?);
    }
    bookings.sort_by(|left, right| left.identifier.cmp(&right.identifier));
    Ok(bookings)
}

/// Load every staff record under a directory, sorted by identifier.
///
/// # Errors
/// Returns `StudioError::Io` if any record cannot be read.
pub fn load_staff_from_directory(staff_dir: &Path) -> Result<Vec<StaffData>, StudioError> {
    let mut members = Vec::new();
    for entry in fs::read_dir(staff_dir).map_err(|error| StudioError::Io(error.to_string()))? {
        let entry = entry.map_err(|error| StudioError::Io(error.to_string()))?;
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        members.push(read_staff_from_file(&path)?);
    }
    members.sort_by(|left, right| left.identifier.cmp(&right.identifier));
    Ok(members)
}

/// Load every unavailable-date record under a directory, sorted by date.
///
/// # Errors
/// Returns `StudioError::Io` if any record cannot be read.
pub fn load_unavailable_from_directory(
    unavailable_dir: &Path,
) -> Result<Vec<UnavailableDateRecord>, StudioError> {
    let mut records = Vec::new();
    for entry in
        fs::read_dir(unavailable_dir).map_err(|error| StudioError::Io(error.to_string()))?
    {
        let entry = entry.map_err(|error| StudioError::Io(error.to_string()))?;
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        records.push(read_unavailable_from_file(&path)?);
    }
    records.sort_by_key(|record| record.date);
    Ok(records)
}
