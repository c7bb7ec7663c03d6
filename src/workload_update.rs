//! Workload assignment and status update workflows.

use chrono::{NaiveDate, Utc};
use std::collections::BTreeSet;
use std::path::Path;

use crate::booking_lookup::load_booking_from_studio;
use crate::calendar::{civil_today, resolve_time_zone};
use crate::config_loader::load_studio_configuration;
use crate::error::StudioError;
use crate::file_io::get_configuration_path;
use crate::models::{BookingData, BookingStatus, WorkloadStatus};
use crate::record_files::{resolve_record_identifier, write_booking_to_file};
use crate::workload::{apply_transition_side_effects, validate_transition};

/// Request payload for the assigning role.
///
/// Staff, link, completion date, and status are resolved into one tuple,
/// validated together, and committed in a single write.
#[derive(Debug, Clone, Default)]
pub struct WorkloadAssignmentRequest {
    pub add_staff: Vec<String>,
    pub remove_staff: Vec<String>,
    pub set_staff: Option<Vec<String>>,
    pub deliverable_link: Option<String>,
    pub completion_date: Option<NaiveDate>,
    pub status: Option<WorkloadStatus>,
}

/// Update a booking's workload as the assigning role.
///
/// # Arguments
/// * `root` - Repository root path.
/// * `identifier` - Booking identifier.
/// * `request` - Assignment request payload.
///
/// # Errors
/// Returns `StudioError` if the booking is not approved, a staff id is
/// unknown, or the proposed transition fails validation.
pub fn update_workload(
    root: &Path,
    identifier: &str,
    request: &WorkloadAssignmentRequest,
) -> Result<BookingData, StudioError> {
    let lookup = load_booking_from_studio(root, identifier)?;
    if lookup.booking.status != BookingStatus::Approved {
        return Err(StudioError::BookingOperation(
            "workload updates require an approved booking".to_string(),
        ));
    }

    let configuration = load_studio_configuration(&get_configuration_path(root)?)?;

    let staff_dir = lookup.studio_dir.join("staff");
    let resolved_request = WorkloadAssignmentRequest {
        add_staff: resolve_staff_ids(&staff_dir, &request.add_staff)?,
        remove_staff: request
            .remove_staff
            .iter()
            .map(|id| {
                resolve_record_identifier(&staff_dir, id.trim())
                    .unwrap_or_else(|_| id.trim().to_string())
            })
            .collect(),
        set_staff: match &request.set_staff {
            Some(ids) => Some(resolve_staff_ids(&staff_dir, ids)?),
            None => None,
        },
        deliverable_link: request.deliverable_link.clone(),
        completion_date: request.completion_date,
        status: request.status,
    };
    let proposed_staff =
        resolve_staff_set(&lookup.booking.workload.assigned_staff, &resolved_request);

    let proposed_link = request
        .deliverable_link
        .clone()
        .or_else(|| lookup.booking.workload.deliverable_link.clone());
    let current_status = lookup.booking.workload.status;
    let proposed_status = request.status.unwrap_or(current_status);

    validate_transition(
        current_status,
        proposed_status,
        &proposed_staff,
        proposed_link.as_deref(),
        &configuration.deliverable_hosts,
    )?;

    let zone = resolve_time_zone(&configuration)?;
    let mut workload = lookup.booking.workload.clone();
    workload.assigned_staff = proposed_staff;
    workload.deliverable_link = proposed_link;
    if let Some(date) = request.completion_date {
        workload.completion_date = Some(date);
    }
    let workload = apply_transition_side_effects(&workload, proposed_status, civil_today(zone));

    let mut updated = lookup.booking.clone();
    updated.workload = workload;
    updated.updated_at = Utc::now();
    write_booking_to_file(&updated, &lookup.booking_path)?;
    Ok(updated)
}

/// Submit a status-only update as an assigned staff member.
///
/// The executing role touches nothing but the status; the stored staff
/// set and link are revalidated against the proposed status.
///
/// # Arguments
/// * `root` - Repository root path.
/// * `identifier` - Booking identifier.
/// * `proposed` - Proposed workload status.
/// * `acting_staff` - Identifier of the staff member submitting.
///
/// # Errors
/// Returns `StudioError::BookingOperation` if the actor is not assigned
/// to the booking, or a validation error for the transition itself.
pub fn progress_workload(
    root: &Path,
    identifier: &str,
    proposed: WorkloadStatus,
    acting_staff: &str,
) -> Result<BookingData, StudioError> {
    let lookup = load_booking_from_studio(root, identifier)?;
    if lookup.booking.status != BookingStatus::Approved {
        return Err(StudioError::BookingOperation(
            "workload updates require an approved booking".to_string(),
        ));
    }
    let resolved_actor = resolve_record_identifier(&lookup.studio_dir.join("staff"), acting_staff)
        .unwrap_or_else(|_| acting_staff.to_string());
    if !lookup
        .booking
        .workload
        .assigned_staff
        .contains(&resolved_actor)
    {
        return Err(StudioError::BookingOperation(format!(
            "staff member '{acting_staff}' is not assigned to this booking"
        )));
    }

    let configuration = load_studio_configuration(&get_configuration_path(root)?)?;
    validate_transition(
        lookup.booking.workload.status,
        proposed,
        &lookup.booking.workload.assigned_staff,
        lookup.booking.workload.deliverable_link.as_deref(),
        &configuration.deliverable_hosts,
    )?;

    let zone = resolve_time_zone(&configuration)?;
    let workload =
        apply_transition_side_effects(&lookup.booking.workload, proposed, civil_today(zone));

    let mut updated = lookup.booking.clone();
    updated.workload = workload;
    updated.updated_at = Utc::now();
    write_booking_to_file(&updated, &lookup.booking_path)?;
    Ok(updated)
}

fn resolve_staff_ids(
    staff_dir: &Path,
    candidates: &[String],
) -> Result<Vec<String>, StudioError> {
    let mut resolved = Vec::new();
    for candidate in candidates {
        let trimmed = candidate.trim();
        if trimmed.is_empty() {
            continue;
        }
        let identifier = resolve_record_identifier(staff_dir, trimmed).map_err(|_| {
            StudioError::BookingOperation(format!("unknown staff member '{trimmed}'"))
        })?;
        resolved.push(identifier);
    }
    Ok(resolved)
}

fn resolve_staff_set(
    current: &BTreeSet<String>,
    request: &WorkloadAssignmentRequest,
) -> BTreeSet<String> {
    let mut staff = match &request.set_staff {
        Some(replacement) => replacement
            .iter()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect(),
        None => current.clone(),
    };
    for id in &request.add_staff {
        let trimmed = id.trim();
        if !trimmed.is_empty() {
            staff.insert(trimmed.to_string());
        }
    }
    for id in &request.remove_staff {
        staff.remove(id.trim());
    }
    staff
}
