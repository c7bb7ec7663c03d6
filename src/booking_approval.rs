//! Booking approval and the cascading rejection of same-date rivals.
//!
//! Approval is planned as an explicit batch of independent commands and
//! applied one command at a time. A failed secondary rejection leaves the
//! approval in place; the per-command outcome list tells the caller
//! exactly what happened, and `sdesk validate` surfaces any residue.

use chrono::Utc;
use std::path::Path;

use crate::booking_lookup::load_booking_from_studio;
use crate::error::StudioError;
use crate::file_io::load_studio_directory;
use crate::models::{BookingData, BookingStatus};
use crate::record_files::{
    load_bookings_from_directory, read_booking_from_file, record_path_for_identifier,
    resolve_record_identifier, write_booking_to_file,
};

/// Action carried by a single booking command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingAction {
    Approve,
    Reject,
}

impl BookingAction {
    fn status(self) -> BookingStatus {
        match self {
            BookingAction::Approve => BookingStatus::Approved,
            BookingAction::Reject => BookingStatus::Rejected,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BookingAction::Approve => "approve",
            BookingAction::Reject => "reject",
        }
    }
}

/// One independent command in an approval batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingCommand {
    pub identifier: String,
    pub action: BookingAction,
}

/// Result of applying one booking command.
#[derive(Debug)]
pub struct CommandOutcome {
    pub identifier: String,
    pub action: BookingAction,
    pub error: Option<String>,
}

/// Plan the command batch for approving a booking.
///
/// The target must be pending, and its date must not already be held by
/// an approved booking. Every other pending booking on the same date
/// gets a rejection command.
///
/// # Arguments
/// * `bookings` - All bookings in the store.
/// * `identifier` - Booking to approve.
///
/// # Errors
/// Returns `StudioError::BookingOperation` for a missing or non-pending
/// target and `StudioError::DateBlocked` for an already-approved date.
pub fn plan_booking_approval(
    bookings: &[BookingData],
    identifier: &str,
) -> Result<Vec<BookingCommand>, StudioError> {
    let target = bookings
        .iter()
        .find(|booking| booking.identifier == identifier)
        .ok_or_else(|| StudioError::BookingOperation("not found".to_string()))?;

    if target.status != BookingStatus::Pending {
        return Err(StudioError::BookingOperation(format!(
            "only pending bookings can be approved (current status is {})",
            target.status
        )));
    }

    let already_held = bookings.iter().any(|booking| {
        booking.identifier != identifier
            && booking.date == target.date
            && booking.status == BookingStatus::Approved
    });
    if already_held {
        return Err(StudioError::DateBlocked(format!(
            "date {} already has an approved booking",
            target.date
        )));
    }

    let mut commands = vec![BookingCommand {
        identifier: target.identifier.clone(),
        action: BookingAction::Approve,
    }];
    for booking in bookings {
        if booking.identifier != identifier
            && booking.date == target.date
            && booking.status == BookingStatus::Pending
        {
            commands.push(BookingCommand {
                identifier: booking.identifier.clone(),
                action: BookingAction::Reject,
            });
        }
    }
    Ok(commands)
}

/// Apply a command batch to the store, one command at a time.
///
/// Each command is written independently; a failure is recorded in the
/// outcome list and does not stop the batch or roll back earlier writes.
pub fn apply_booking_commands(
    bookings_dir: &Path,
    commands: &[BookingCommand],
) -> Vec<CommandOutcome> {
    let mut outcomes = Vec::new();
    for command in commands {
        let result = apply_single_command(bookings_dir, command);
        outcomes.push(CommandOutcome {
            identifier: command.identifier.clone(),
            action: command.action,
            error: result.err().map(|error| error.to_string()),
        });
    }
    outcomes
}

fn apply_single_command(bookings_dir: &Path, command: &BookingCommand) -> Result<(), StudioError> {
    let booking_path = record_path_for_identifier(bookings_dir, &command.identifier);
    let mut booking = read_booking_from_file(&booking_path)?;
    booking.status = command.action.status();
    booking.updated_at = Utc::now();
    write_booking_to_file(&booking, &booking_path)
}

/// Approve a booking, rejecting its same-date rivals.
///
/// # Arguments
/// * `root` - Repository root path.
/// * `identifier` - Booking identifier.
///
/// # Errors
/// Returns `StudioError` if the plan cannot be built; individual command
/// failures are reported in the outcome list instead.
pub fn approve_booking(root: &Path, identifier: &str) -> Result<Vec<CommandOutcome>, StudioError> {
    let studio_dir = load_studio_directory(root)?;
    let bookings_dir = studio_dir.join("bookings");
    let resolved = resolve_record_identifier(&bookings_dir, identifier)?;
    let bookings = load_bookings_from_directory(&bookings_dir)?;
    let commands = plan_booking_approval(&bookings, &resolved)?;
    Ok(apply_booking_commands(&bookings_dir, &commands))
}

/// Reject a single pending booking.
///
/// # Arguments
/// * `root` - Repository root path.
/// * `identifier` - Booking identifier.
///
/// # Errors
/// Returns `StudioError::BookingOperation` if the booking is not pending.
pub fn reject_booking(root: &Path, identifier: &str) -> Result<BookingData, StudioError> {
    let lookup = load_booking_from_studio(root, identifier)?;
    if lookup.booking.status != BookingStatus::Pending {
        return Err(StudioError::BookingOperation(format!(
            "only pending bookings can be rejected (current status is {})",
            lookup.booking.status
        )));
    }
    let mut updated = lookup.booking.clone();
    updated.status = BookingStatus::Rejected;
    updated.updated_at = Utc::now();
    write_booking_to_file(&updated, &lookup.booking_path)?;
    Ok(updated)
}
