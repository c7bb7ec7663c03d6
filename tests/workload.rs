use std::collections::BTreeSet;

use shutterdesk::error::StudioError;
use shutterdesk::models::WorkloadStatus;
use shutterdesk::workload::{legal_next_states, validate_transition};

fn hosts() -> Vec<String> {
    vec![
        "https://drive.google.com/".to_string(),
        "https://www.dropbox.com/".to_string(),
    ]
}

fn staff(ids: &[&str]) -> BTreeSet<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

#[test]
fn unassigned_can_only_stay_or_advance_to_scheduled() {
    assert_eq!(
        legal_next_states(WorkloadStatus::Unassigned),
        vec![WorkloadStatus::Unassigned, WorkloadStatus::Scheduled]
    );
}

#[test]
fn completed_can_only_stay_or_retreat_to_for_release() {
    assert_eq!(
        legal_next_states(WorkloadStatus::Completed),
        vec![WorkloadStatus::ForRelease, WorkloadStatus::Completed]
    );
}

#[test]
fn interior_states_permit_both_neighbors_and_themselves() {
    for ordinal in 1..=5 {
        let current = WorkloadStatus::from_ordinal(ordinal).unwrap();
        let expected = vec![
            WorkloadStatus::from_ordinal(ordinal - 1).unwrap(),
            current,
            WorkloadStatus::from_ordinal(ordinal + 1).unwrap(),
        ];
        assert_eq!(legal_next_states(current), expected, "state {current}");
    }
}

#[test]
fn scheduling_without_staff_fails_with_missing_assignment() {
    let error = validate_transition(
        WorkloadStatus::Unassigned,
        WorkloadStatus::Scheduled,
        &BTreeSet::new(),
        None,
        &hosts(),
    )
    .expect_err("no staff assigned");
    assert!(matches!(error, StudioError::MissingAssignment(_)));
}

#[test]
fn uploading_with_drive_link_succeeds() {
    validate_transition(
        WorkloadStatus::Scheduled,
        WorkloadStatus::Uploaded,
        &staff(&["staff-7"]),
        Some("https://drive.google.com/x"),
        &hosts(),
    )
    .expect("valid transition");
}

#[test]
fn uploading_with_foreign_host_fails_with_invalid_link() {
    let error = validate_transition(
        WorkloadStatus::Scheduled,
        WorkloadStatus::Uploaded,
        &staff(&["staff-7"]),
        Some("https://example.com/x"),
        &hosts(),
    )
    .expect_err("foreign host");
    assert!(matches!(error, StudioError::InvalidOrMissingLink(_)));
}

#[test]
fn completed_cannot_advance_anywhere() {
    for proposed in WorkloadStatus::ALL {
        if proposed == WorkloadStatus::Completed || proposed == WorkloadStatus::ForRelease {
            continue;
        }
        let error = validate_transition(
            WorkloadStatus::Completed,
            proposed,
            &staff(&["staff-7"]),
            Some("https://drive.google.com/x"),
            &hosts(),
        )
        .expect_err("terminal state");
        assert!(matches!(error, StudioError::IllegalTransition(_)));
    }
}

#[test]
fn dropbox_links_are_accepted_for_release_stages() {
    validate_transition(
        WorkloadStatus::Editing,
        WorkloadStatus::ForRelease,
        &staff(&["staff-7", "staff-9"]),
        Some("https://www.dropbox.com/s/final"),
        &hosts(),
    )
    .expect("valid transition");
}
