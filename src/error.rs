//! Error types for Shutterdesk.

use std::fmt::{self, Display, Formatter};

/// Errors returned by Shutterdesk operations.
#[derive(Debug)]
pub enum StudioError {
    /// Initialization failed due to user-facing validation.
    Initialization(String),
    /// An unexpected IO error occurred.
    Io(String),
    /// Record identifier generation failed.
    IdGenerationFailed(String),
    /// Configuration loading or validation failed.
    Configuration(String),
    /// Workload status transition is not reachable from the current status.
    IllegalTransition(String),
    /// Workload status requires assigned staff but none are set.
    MissingAssignment(String),
    /// Deliverable link is absent or not hosted on a recognized service.
    InvalidOrMissingLink(String),
    /// Candidate booking date is disabled or already occupied.
    DateBlocked(String),
    /// Candidate booking date is inside the minimum lead window.
    LeadTimeViolation(String),
    /// Availability toggle attempted on a date with a live booking.
    ActiveBookingConflict(String),
    /// Booking operation failed.
    BookingOperation(String),
}

impl Display for StudioError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            StudioError::Initialization(message) => write!(formatter, "{message}"),
            StudioError::Io(message) => write!(formatter, "{message}"),
            StudioError::IdGenerationFailed(message) => write!(formatter, "{message}"),
            StudioError::Configuration(message) => write!(formatter, "{message}"),
            StudioError::IllegalTransition(message) => write!(formatter, "{message}"),
            StudioError::MissingAssignment(message) => write!(formatter, "{message}"),
            StudioError::InvalidOrMissingLink(message) => write!(formatter, "{message}"),
            StudioError::DateBlocked(message) => write!(formatter, "{message}"),
            StudioError::LeadTimeViolation(message) => write!(formatter, "{message}"),
            StudioError::ActiveBookingConflict(message) => write!(formatter, "{message}"),
            StudioError::BookingOperation(message) => write!(formatter, "{message}"),
        }
    }
}

impl std::error::Error for StudioError {}
