//! Staff record management.

use chrono::Utc;
use std::path::Path;

use crate::error::StudioError;
use crate::file_io::load_studio_directory;
use crate::ids::{generate_record_identifier, RecordIdentifierRequest};
use crate::models::StaffData;
use crate::record_files::{
    list_record_identifiers, load_staff_from_directory, record_path_for_identifier,
    write_staff_to_file,
};

/// Add a staff member record.
///
/// # Arguments
/// * `root` - Repository root path.
/// * `name` - Display name.
/// * `role` - Free-form role, e.g. "photographer" or "editor".
///
/// # Errors
/// Returns `StudioError` if validation or file operations fail.
pub fn add_staff_member(root: &Path, name: &str, role: &str) -> Result<StaffData, StudioError> {
    let trimmed_name = name.trim();
    if trimmed_name.is_empty() {
        return Err(StudioError::BookingOperation(
            "staff name is required".to_string(),
        ));
    }

    let studio_dir = load_studio_directory(root)?;
    let staff_dir = studio_dir.join("staff");
    let existing_ids = list_record_identifiers(&staff_dir)?;
    let identifier = generate_record_identifier(&RecordIdentifierRequest {
        existing_ids,
        prefix: "staff".to_string(),
    })?;

    let member = StaffData {
        identifier,
        name: trimmed_name.to_string(),
        role: role.trim().to_string(),
        created_at: Utc::now(),
    };
    let staff_path = record_path_for_identifier(&staff_dir, &member.identifier);
    write_staff_to_file(&member, &staff_path)?;
    Ok(member)
}

/// List staff members, sorted by identifier.
///
/// # Errors
/// Returns `StudioError` if records cannot be read.
pub fn list_staff_members(root: &Path) -> Result<Vec<StaffData>, StudioError> {
    let studio_dir = load_studio_directory(root)?;
    load_staff_from_directory(&studio_dir.join("staff"))
}
