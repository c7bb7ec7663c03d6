use std::fs;
use std::path::PathBuf;
use std::process::Command;

use chrono::{NaiveDate, TimeZone, Utc};
use tempfile::TempDir;

use shutterdesk::cli::run_from_args_with_output;
use shutterdesk::models::{BookingData, BookingStatus, WorkloadData, WorkloadStatus};
use shutterdesk::record_files::{record_path_for_identifier, write_booking_to_file};

fn init_repo() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("temp dir");
    let repo_path = temp_dir.path().join("repo");
    fs::create_dir_all(&repo_path).expect("create repo");
    Command::new("git")
        .args(["init"])
        .current_dir(&repo_path)
        .output()
        .expect("git init failed");
    run_from_args_with_output(["sdesk", "init"], repo_path.as_path()).expect("init");
    (temp_dir, repo_path)
}

fn write_booking(repo_path: &PathBuf, booking: &BookingData) {
    let bookings_dir = repo_path.join("studio").join("bookings");
    let path = record_path_for_identifier(&bookings_dir, &booking.identifier);
    write_booking_to_file(booking, &path).expect("write booking");
}

fn approved_booking(identifier: &str, day: u32) -> BookingData {
    let timestamp = Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap();
    BookingData {
        identifier: identifier.to_string(),
        client: "Reyes".to_string(),
        package: "portrait".to_string(),
        add_ons: Vec::new(),
        date: NaiveDate::from_ymd_opt(2099, 7, day).unwrap(),
        status: BookingStatus::Approved,
        notes: String::new(),
        payments: Vec::new(),
        feedback: Vec::new(),
        workload: WorkloadData::default(),
        created_at: timestamp,
        updated_at: timestamp,
    }
}

#[test]
fn validate_flags_hand_edited_violations() {
    let (_temp_dir, repo_path) = init_repo();

    // Two approved bookings on the same date.
    write_booking(&repo_path, &approved_booking("shutter-first", 1));
    write_booking(&repo_path, &approved_booking("shutter-second", 1));

    // Workload progressed with no staff assigned.
    let mut staffless = approved_booking("shutter-staffless", 2);
    staffless.workload.status = WorkloadStatus::Scheduled;
    write_booking(&repo_path, &staffless);

    // Upload stage with a link outside the accepted hosts.
    let mut bad_link = approved_booking("shutter-badlink", 3);
    bad_link.workload.status = WorkloadStatus::Uploaded;
    bad_link
        .workload
        .assigned_staff
        .insert("staff-ghost".to_string());
    bad_link.workload.deliverable_link = Some("https://example.com/x".to_string());
    write_booking(&repo_path, &bad_link);

    let error = run_from_args_with_output(["sdesk", "validate"], repo_path.as_path())
        .expect_err("violations present");
    let message = error.to_string();
    assert!(message.contains("validation failed"));
    assert!(message.contains("multiple approved bookings"));
    assert!(message.contains("no assigned staff"));
    assert!(message.contains("valid deliverable link"));
    // The invented staff id is flagged too.
    assert!(message.contains("does not exist"));
}

#[test]
fn validate_accepts_a_clean_store() {
    let (_temp_dir, repo_path) = init_repo();
    write_booking(&repo_path, &approved_booking("shutter-clean", 1));
    let output = run_from_args_with_output(["sdesk", "validate"], repo_path.as_path())
        .expect("clean store");
    assert!(output.stdout.is_empty());
}
