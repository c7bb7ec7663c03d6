//! Booking creation workflow.

use chrono::{NaiveDate, Utc};
use std::path::PathBuf;

use crate::availability::{approved_booking_dates, check_date_bookable, unavailable_dates};
use crate::calendar::{civil_today, resolve_time_zone};
use crate::config_loader::load_studio_configuration;
use crate::error::StudioError;
use crate::file_io::{get_configuration_path, load_studio_directory};
use crate::ids::{generate_record_identifier, RecordIdentifierRequest};
use crate::models::{BookingData, BookingStatus, StudioConfiguration, WorkloadData};
use crate::record_files::{
    list_record_identifiers, load_bookings_from_directory, load_unavailable_from_directory,
    record_path_for_identifier, write_booking_to_file,
};

/// Request payload for booking creation.
#[derive(Debug, Clone)]
pub struct BookingCreationRequest {
    pub root: PathBuf,
    pub client: String,
    pub package: String,
    pub add_ons: Vec<String>,
    pub date: NaiveDate,
    pub notes: Option<String>,
    /// Administrative reschedule flows skip the lead-time rule.
    pub override_lead_time: bool,
}

/// Result of a successful booking creation.
#[derive(Debug, Clone)]
pub struct BookingCreationResult {
    pub booking: BookingData,
    pub configuration: StudioConfiguration,
}

/// Create a new booking and write it to disk.
///
/// The requested date must clear the availability engine: outside the
/// minimum lead window, not manually disabled, and not held by an
/// approved booking.
///
/// # Arguments
/// * `request` - Booking creation request payload.
///
/// # Errors
/// Returns `StudioError` if validation or file operations fail.
pub fn create_booking(request: &BookingCreationRequest) -> Result<BookingCreationResult, StudioError> {
    let studio_dir = load_studio_directory(request.root.as_path())?;
    let configuration =
        load_studio_configuration(&get_configuration_path(request.root.as_path())?)?;

    let client = request.client.trim();
    if client.is_empty() {
        return Err(StudioError::BookingOperation(
            "client name is required".to_string(),
        ));
    }

    validate_catalog_keys(&configuration, &request.package, &request.add_ons)?;

    let bookings_dir = studio_dir.join("bookings");
    let bookings = load_bookings_from_directory(&bookings_dir)?;
    let unavailable = load_unavailable_from_directory(&studio_dir.join("unavailable"))?;

    let zone = resolve_time_zone(&configuration)?;
    let minimum_lead_days = if request.override_lead_time {
        0
    } else {
        configuration.minimum_lead_days
    };
    check_date_bookable(
        request.date,
        civil_today(zone),
        &unavailable_dates(&unavailable),
        &approved_booking_dates(&bookings, None),
        minimum_lead_days,
    )?;

    let existing_ids = list_record_identifiers(&bookings_dir)?;
    let identifier = generate_record_identifier(&RecordIdentifierRequest {
        existing_ids,
        prefix: configuration.studio_key.clone(),
    })?;

    let created_at = Utc::now();
    let booking = BookingData {
        identifier,
        client: client.to_string(),
        package: request.package.clone(),
        add_ons: request.add_ons.clone(),
        date: request.date,
        status: BookingStatus::Pending,
        notes: request.notes.clone().unwrap_or_default(),
        payments: Vec::new(),
        feedback: Vec::new(),
        workload: WorkloadData::default(),
        created_at,
        updated_at: created_at,
    };

    let booking_path = record_path_for_identifier(&bookings_dir, &booking.identifier);
    write_booking_to_file(&booking, &booking_path)?;
    Ok(BookingCreationResult {
        booking,
        configuration,
    })
}

fn validate_catalog_keys(
    configuration: &StudioConfiguration,
    package: &str,
    add_ons: &[String],
) -> Result<(), StudioError> {
    if !configuration.packages.contains_key(package) {
        return Err(StudioError::BookingOperation(format!(
            "unknown package '{package}'"
        )));
    }
    for add_on in add_ons {
        if !configuration.add_ons.contains_key(add_on) {
            return Err(StudioError::BookingOperation(format!(
                "unknown add-on '{add_on}'"
            )));
        }
    }
    Ok(())
}
