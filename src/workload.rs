//! Workload status transitions and validation.

use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::error::StudioError;
use crate::models::{WorkloadData, WorkloadStatus};

/// Enumerate the legal next statuses from the current one.
///
/// Fixed adjacency: every status may stay where it is, advance one step,
/// or retreat one step. `Unassigned` has no backward edge and `Completed`
/// has no forward edge, so completed work can only be reopened to
/// `ForRelease`.
pub fn legal_next_states(current: WorkloadStatus) -> Vec<WorkloadStatus> {
    let ordinal = current.ordinal();
    let mut states = Vec::new();
    if let Some(previous) = ordinal.checked_sub(1).and_then(WorkloadStatus::from_ordinal) {
        states.push(previous);
    }
    states.push(current);
    if let Some(next) = WorkloadStatus::from_ordinal(ordinal + 1) {
        states.push(next);
    }
    states
}

/// Whether a link points at one of the accepted deliverable hosts.
///
/// A bare host prefix with nothing after it does not count.
pub fn is_valid_deliverable_link(link: &str, hosts: &[String]) -> bool {
    hosts.iter().any(|host| {
        link.strip_prefix(host.as_str())
            .is_some_and(|rest| !rest.is_empty())
    })
}

/// Validate a proposed status against the transition table and its
/// side-constraints.
///
/// Checks run in order: transition legality, then staff assignment, then
/// the deliverable link. The link requirement applies from `Uploaded`
/// onward.
///
/// # Errors
/// Returns `IllegalTransition`, `MissingAssignment`, or
/// `InvalidOrMissingLink` for the first constraint that fails.
pub fn validate_transition(
    current: WorkloadStatus,
    proposed: WorkloadStatus,
    assigned_staff: &BTreeSet<String>,
    deliverable_link: Option<&str>,
    deliverable_hosts: &[String],
) -> Result<(), StudioError> {
    if !legal_next_states(current).contains(&proposed) {
        return Err(StudioError::IllegalTransition(format!(
            "illegal transition from '{current}' to '{proposed}'"
        )));
    }

    if proposed > WorkloadStatus::Unassigned && assigned_staff.is_empty() {
        return Err(StudioError::MissingAssignment(format!(
            "status '{proposed}' requires at least one assigned staff member"
        )));
    }

    if proposed >= WorkloadStatus::Uploaded {
        let valid = deliverable_link
            .is_some_and(|link| is_valid_deliverable_link(link, deliverable_hosts));
        if !valid {
            return Err(StudioError::InvalidOrMissingLink(format!(
                "status '{proposed}' requires a Google Drive or Dropbox deliverable link"
            )));
        }
    }

    Ok(())
}

/// Apply status side effects to a workload.
///
/// Entering `Completed` stamps the completion date (today in the studio
/// zone) when none was supplied; leaving `Completed` clears it.
///
/// # Arguments
/// * `workload` - Workload being updated.
/// * `proposed` - New status being applied.
/// * `today` - Current civil date in the studio zone.
///
/// # Returns
/// Updated workload data with side effects applied.
pub fn apply_transition_side_effects(
    workload: &WorkloadData,
    proposed: WorkloadStatus,
    today: NaiveDate,
) -> WorkloadData {
    let mut updated = workload.clone();
    if proposed == WorkloadStatus::Completed {
        if updated.completion_date.is_none() {
            updated.completion_date = Some(today);
        }
    } else if workload.status == WorkloadStatus::Completed {
        updated.completion_date = None;
    }
    updated.status = proposed;
    updated
}
