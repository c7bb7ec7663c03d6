//! Client feedback collection.

use chrono::Utc;
use std::path::Path;
use uuid::Uuid;

use crate::booking_lookup::load_booking_from_studio;
use crate::error::StudioError;
use crate::models::{BookingData, FeedbackEntry, WorkloadStatus};
use crate::record_files::write_booking_to_file;

/// Result of adding feedback to a booking.
#[derive(Debug, Clone)]
pub struct FeedbackResult {
    pub booking: BookingData,
    pub entry: FeedbackEntry,
}

/// Add a feedback entry to a completed booking.
///
/// # Arguments
/// * `root` - Repository root path.
/// * `identifier` - Booking identifier.
/// * `author` - Feedback author.
/// * `rating` - Rating from 1 to 5.
/// * `text` - Feedback text.
///
/// # Errors
/// Returns `StudioError::BookingOperation` if the rating is out of range
/// or the booking's workload is not completed.
pub fn add_feedback(
    root: &Path,
    identifier: &str,
    author: &str,
    rating: u8,
    text: &str,
) -> Result<FeedbackResult, StudioError> {
    if !(1..=5).contains(&rating) {
        return Err(StudioError::BookingOperation(
            "rating must be between 1 and 5".to_string(),
        ));
    }

    let lookup = load_booking_from_studio(root, identifier)?;
    if lookup.booking.workload.status != WorkloadStatus::Completed {
        return Err(StudioError::BookingOperation(
            "feedback requires a completed booking".to_string(),
        ));
    }

    let timestamp = Utc::now();
    let entry = FeedbackEntry {
        id: Uuid::new_v4().to_string(),
        author: author.to_string(),
        rating,
        text: text.trim().to_string(),
        created_at: timestamp,
    };

    let mut updated = lookup.booking.clone();
    updated.feedback.push(entry.clone());
    updated.updated_at = timestamp;
    write_booking_to_file(&updated, &lookup.booking_path)?;
    Ok(FeedbackResult {
        booking: updated,
        entry,
    })
}
