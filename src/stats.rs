//! Studio statistics and integrity validation.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use chrono::NaiveDate;

use crate::billing::compute_booking_quote;
use crate::config_loader::load_studio_configuration;
use crate::error::StudioError;
use crate::file_io::{get_configuration_path, load_studio_directory};
use crate::models::{BookingData, BookingStatus, StudioConfiguration, WorkloadStatus};
use crate::record_files::{load_staff_from_directory, load_unavailable_from_directory};
use crate::workload::is_valid_deliverable_link;

/// Aggregate statistics for a studio.
#[derive(Debug, Clone, PartialEq)]
pub struct StudioStats {
    pub total_bookings: usize,
    pub status_counts: BTreeMap<String, usize>,
    pub workload_counts: BTreeMap<String, usize>,
    pub revenue_collected: i64,
    pub outstanding_balance: i64,
    pub feedback_count: usize,
    pub average_rating: Option<f64>,
}

/// Collect studio statistics from booking data.
///
/// # Arguments
/// * `root` - Repository root path.
///
/// # Errors
/// Returns `StudioError` if records cannot be read.
pub fn collect_studio_stats(root: &Path) -> Result<StudioStats, StudioError> {
    let studio_dir = load_studio_directory(root)?;
    let configuration = load_studio_configuration(&get_configuration_path(root)?)?;
    let bookings = crate::record_files::load_bookings_from_directory(&studio_dir.join("bookings"))?;

    let mut status_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut workload_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut revenue_collected = 0;
    let mut outstanding_balance = 0;
    let mut feedback_count = 0;
    let mut rating_total = 0u64;

    for booking in &bookings {
        *status_counts
            .entry(booking.status.key().to_string())
            .or_insert(0) += 1;
        if booking.status == BookingStatus::Approved {
            *workload_counts
                .entry(booking.workload.status.key().to_string())
                .or_insert(0) += 1;
            if let Ok(quote) = compute_booking_quote(&configuration, booking) {
                revenue_collected += quote.paid;
                outstanding_balance += quote.balance;
            }
        }
        feedback_count += booking.feedback.len();
        rating_total += booking
            .feedback
            .iter()
            .map(|entry| u64::from(entry.rating))
            .sum::<u64>();
    }

    let average_rating = if feedback_count > 0 {
        Some(rating_total as f64 / feedback_count as f64)
    } else {
        None
    };

    Ok(StudioStats {
        total_bookings: bookings.len(),
        status_counts,
        workload_counts,
        revenue_collected,
        outstanding_balance,
        feedback_count,
        average_rating,
    })
}

/// Validate record data and invariants for a studio.
///
/// # Arguments
/// * `root` - Repository root path.
///
/// # Errors
/// Returns `StudioError::BookingOperation` listing every violation found.
pub fn validate_studio(root: &Path) -> Result<(), StudioError> {
    let studio_dir = load_studio_directory(root)?;
    let bookings_dir = studio_dir.join("bookings");
    if !bookings_dir.exists() {
        return Err(StudioError::BookingOperation(
            "bookings directory missing".to_string(),
        ));
    }

    let configuration = load_studio_configuration(&get_configuration_path(root)?)?;
    let known_staff: BTreeSet<String> = load_staff_from_directory(&studio_dir.join("staff"))?
        .into_iter()
        .map(|member| member.identifier)
        .collect();

    let mut errors: Vec<String> = Vec::new();
    let mut bookings: Vec<BookingData> = Vec::new();

    let mut paths: Vec<_> = fs::read_dir(&bookings_dir)
        .map_err(|error| StudioError::Io(error.to_string()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("json"))
        .collect();
    paths.sort_by(|left, right| left.file_name().cmp(&right.file_name()));

    for path in paths {
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("unknown");
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(error) => {
                errors.push(format!("{filename}: unable to read booking: {error}"));
                continue;
            }
        };

        let booking: BookingData = match serde_json::from_str(&contents) {
            Ok(booking) => booking,
            Err(error) => {
                errors.push(format!("{filename}: invalid booking data: {error}"));
                continue;
            }
        };

        validate_booking_fields(filename, &booking, &configuration, &known_staff, &mut errors);
        bookings.push(booking);
    }

    validate_date_exclusivity(&bookings, &mut errors);

    let unavailable = load_unavailable_from_directory(&studio_dir.join("unavailable"))?;
    let mut seen_dates: BTreeSet<NaiveDate> = BTreeSet::new();
    for record in &unavailable {
        if !seen_dates.insert(record.date) {
            errors.push(format!(
                "{}: duplicate unavailable date {}",
                record.identifier, record.date
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(StudioError::BookingOperation(format!(
            "validation failed:\n{}",
            errors.join("\n")
        )))
    }
}

fn validate_booking_fields(
    filename: &str,
    booking: &BookingData,
    configuration: &StudioConfiguration,
    known_staff: &BTreeSet<String>,
    errors: &mut Vec<String>,
) {
    let expected_id = Path::new(filename)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(filename);
    if booking.identifier != expected_id {
        errors.push(format!(
            "{filename}: booking id '{}' does not match filename",
            booking.identifier
        ));
    }

    if !configuration.packages.contains_key(&booking.package) {
        errors.push(format!(
            "{filename}: unknown package '{}'",
            booking.package
        ));
    }
    for add_on in &booking.add_ons {
        if !configuration.add_ons.contains_key(add_on) {
            errors.push(format!("{filename}: unknown add-on '{add_on}'"));
        }
    }

    let workload = &booking.workload;
    if booking.status != BookingStatus::Approved
        && workload.status != WorkloadStatus::Unassigned
    {
        errors.push(format!(
            "{filename}: workload started on a {} booking",
            booking.status
        ));
    }

    if workload.status > WorkloadStatus::Unassigned && workload.assigned_staff.is_empty() {
        errors.push(format!(
            "{filename}: workload status '{}' with no assigned staff",
            workload.status
        ));
    }

    if workload.status >= WorkloadStatus::Uploaded {
        let valid = workload
            .deliverable_link
            .as_deref()
            .is_some_and(|link| is_valid_deliverable_link(link, &configuration.deliverable_hosts));
        if !valid {
            errors.push(format!(
                "{filename}: workload status '{}' without a valid deliverable link",
                workload.status
            ));
        }
    }

    if workload.status == WorkloadStatus::Completed && workload.completion_date.is_none() {
        errors.push(format!(
            "{filename}: completed workloads must have completion_date set"
        ));
    }
    if workload.status != WorkloadStatus::Completed && workload.completion_date.is_some() {
        errors.push(format!(
            "{filename}: non-completed workloads must not set completion_date"
        ));
    }

    for staff_id in &workload.assigned_staff {
        if !known_staff.contains(staff_id) {
            errors.push(format!(
                "{filename}: assigned staff '{staff_id}' does not exist"
            ));
        }
    }

    if !booking.feedback.is_empty() && workload.status != WorkloadStatus::Completed {
        errors.push(format!(
            "{filename}: feedback recorded before the workload completed"
        ));
    }
    for entry in &booking.feedback {
        if !(1..=5).contains(&entry.rating) {
            errors.push(format!(
                "{filename}: feedback rating {} out of range",
                entry.rating
            ));
        }
    }

    for payment in &booking.payments {
        if payment.amount <= 0 {
            errors.push(format!(
                "{filename}: payment {} must have a positive amount",
                payment.id
            ));
        }
    }
    if let Ok(quote) = compute_booking_quote(configuration, booking) {
        if quote.balance < 0 {
            errors.push(format!(
                "{filename}: payments exceed the booking total"
            ));
        }
    }
}

fn validate_date_exclusivity(bookings: &[BookingData], errors: &mut Vec<String>) {
    let mut approved_by_date: BTreeMap<NaiveDate, Vec<&str>> = BTreeMap::new();
    for booking in bookings {
        if booking.status == BookingStatus::Approved {
            approved_by_date
                .entry(booking.date)
                .or_default()
                .push(booking.identifier.as_str());
        }
    }
    for (date, identifiers) in approved_by_date {
        if identifiers.len() > 1 {
            errors.push(format!(
                "{date}: multiple approved bookings ({})",
                identifiers.join(", ")
            ));
        }
    }
}
