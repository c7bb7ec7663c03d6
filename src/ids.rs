//! Record identifier generation.

use std::collections::HashSet;
use std::sync::{Mutex, OnceLock};
use uuid::Uuid;

use crate::error::StudioError;

/// Request to generate a unique record identifier.
#[derive(Debug, Clone)]
pub struct RecordIdentifierRequest {
    /// Existing identifiers to avoid collisions.
    pub existing_ids: HashSet<String>,
    /// Identifier prefix (studio key or record kind).
    pub prefix: String,
}

static TEST_UUID_SEQUENCE: OnceLock<Mutex<Vec<Uuid>>> = OnceLock::new();

/// Set a deterministic UUID sequence for tests.
///
/// # Arguments
/// * `sequence` - Optional list of UUIDs to consume before falling back to random.
pub fn set_test_uuid_sequence(sequence: Option<Vec<Uuid>>) {
    let cell = TEST_UUID_SEQUENCE.get_or_init(|| Mutex::new(Vec::new()));
    let mut guard = cell.lock().expect("lock test uuid sequence");
    *guard = sequence.unwrap_or_default();
}

fn next_uuid() -> Uuid {
    let cell = TEST_UUID_SEQUENCE.get_or_init(|| Mutex::new(Vec::new()));
    let mut guard = cell.lock().expect("lock test uuid sequence");
    if let Some(next) = guard.first().cloned() {
        guard.remove(0);
        return next;
    }
    Uuid::new_v4()
}

/// Produce a display-friendly record key.
///
/// # Arguments
/// * `identifier` - Full record identifier (prefix plus UUID).
/// * `studio_context` - When true, omit the prefix.
///
/// # Returns
/// Formatted key with optional prefix and abbreviated hash.
pub fn format_record_key(identifier: &str, studio_context: bool) -> String {
    let (key_part, remainder) = if let Some((key, rest)) = identifier.split_once('-') {
        if key.is_empty() || rest.is_empty() {
            (None, identifier)
        } else {
            (Some(key), rest)
        }
    } else {
        (None, identifier)
    };

    let normalized: String = remainder.chars().filter(|ch| *ch != '-').collect();
    let truncated: String = normalized.chars().take(6).collect();

    if studio_context {
        return truncated;
    }

    match key_part {
        Some(key) => format!("{}-{}", key, truncated),
        None => truncated,
    }
}

/// Generate a unique record identifier using a UUID.
///
/// # Arguments
///
/// * `request` - Request containing the prefix and existing IDs.
///
/// # Returns
///
/// A unique identifier with format '{prefix}-{uuid}'.
///
/// # Errors
///
/// Returns `StudioError::IdGenerationFailed` if unable to generate a unique
/// identifier after 10 attempts.
pub fn generate_record_identifier(request: &RecordIdentifierRequest) -> Result<String, StudioError> {
    for _ in 0..10 {
        let identifier = format!("{}-{}", request.prefix, next_uuid());
        if !request.existing_ids.contains(&identifier) {
            return Ok(identifier);
        }
    }

    Err(StudioError::IdGenerationFailed(
        "unable to generate unique id after 10 attempts".to_string(),
    ))
}
