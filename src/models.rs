//! Shutterdesk data models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Lifecycle status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl BookingStatus {
    /// Whether the booking occupies its date for conflict purposes.
    pub fn is_live(self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Approved)
    }

    pub fn key(self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Approved => "approved",
            BookingStatus::Rejected => "rejected",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl Display for BookingStatus {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.key())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(BookingStatus::Pending),
            "approved" => Ok(BookingStatus::Approved),
            "rejected" => Ok(BookingStatus::Rejected),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(format!("unknown booking status '{other}'")),
        }
    }
}

/// Production stage of an approved booking's workload.
///
/// Ordinal ordering is load-bearing: transitions step through neighbors
/// one at a time and the link requirement keys off `Uploaded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkloadStatus {
    Unassigned,
    Scheduled,
    Uploaded,
    ForEdit,
    Editing,
    ForRelease,
    Completed,
}

impl WorkloadStatus {
    pub const ALL: [WorkloadStatus; 7] = [
        WorkloadStatus::Unassigned,
        WorkloadStatus::Scheduled,
        WorkloadStatus::Uploaded,
        WorkloadStatus::ForEdit,
        WorkloadStatus::Editing,
        WorkloadStatus::ForRelease,
        WorkloadStatus::Completed,
    ];

    pub fn ordinal(self) -> u8 {
        match self {
            WorkloadStatus::Unassigned => 0,
            WorkloadStatus::Scheduled => 1,
            WorkloadStatus::Uploaded => 2,
            WorkloadStatus::ForEdit => 3,
            WorkloadStatus::Editing => 4,
            WorkloadStatus::ForRelease => 5,
            WorkloadStatus::Completed => 6,
        }
    }

    pub fn from_ordinal(value: u8) -> Option<WorkloadStatus> {
        WorkloadStatus::ALL.get(value as usize).copied()
    }

    pub fn key(self) -> &'static str {
        match self {
            WorkloadStatus::Unassigned => "unassigned",
            WorkloadStatus::Scheduled => "scheduled",
            WorkloadStatus::Uploaded => "uploaded",
            WorkloadStatus::ForEdit => "for_edit",
            WorkloadStatus::Editing => "editing",
            WorkloadStatus::ForRelease => "for_release",
            WorkloadStatus::Completed => "completed",
        }
    }
}

impl Display for WorkloadStatus {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.key())
    }
}

impl FromStr for WorkloadStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        WorkloadStatus::ALL
            .into_iter()
            .find(|status| status.key() == value)
            .ok_or_else(|| format!("unknown workload status '{value}'"))
    }
}

/// Payment recorded against a booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: String,
    pub amount: i64,
    pub method: String,
    pub paid_at: DateTime<Utc>,
}

/// Client feedback left on a completed booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub id: String,
    pub author: String,
    pub rating: u8,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Production-tracking state embedded in a booking.
///
/// Kept inside the booking file so a status, staff set, link, and
/// completion date always commit together in one write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadData {
    #[serde(default)]
    pub assigned_staff: BTreeSet<String>,
    #[serde(default)]
    pub deliverable_link: Option<String>,
    #[serde(default)]
    pub completion_date: Option<NaiveDate>,
    pub status: WorkloadStatus,
}

impl Default for WorkloadData {
    fn default() -> Self {
        WorkloadData {
            assigned_staff: BTreeSet::new(),
            deliverable_link: None,
            completion_date: None,
            status: WorkloadStatus::Unassigned,
        }
    }
}

/// Booking data representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingData {
    #[serde(rename = "id")]
    pub identifier: String,
    pub client: String,
    pub package: String,
    #[serde(default)]
    pub add_ons: Vec<String>,
    pub date: NaiveDate,
    pub status: BookingStatus,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub payments: Vec<PaymentRecord>,
    #[serde(default)]
    pub feedback: Vec<FeedbackEntry>,
    #[serde(default)]
    pub workload: WorkloadData,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Administrator's manual calendar block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnavailableDateRecord {
    #[serde(rename = "id")]
    pub identifier: String,
    pub date: NaiveDate,
}

/// Staff member record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffData {
    #[serde(rename = "id")]
    pub identifier: String,
    pub name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Shoot package offered by the studio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageDefinition {
    pub name: String,
    pub price: i64,
    #[serde(default)]
    pub color: Option<String>,
}

/// Optional add-on with its price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddOnDefinition {
    pub name: String,
    pub price: i64,
}

/// Studio configuration loaded from .shutterdesk.yml.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StudioConfiguration {
    pub studio_directory: String,
    pub studio_key: String,
    pub time_zone: String,
    pub minimum_lead_days: u32,
    pub currency: String,
    pub packages: BTreeMap<String, PackageDefinition>,
    #[serde(default)]
    pub add_ons: BTreeMap<String, AddOnDefinition>,
    pub deliverable_hosts: Vec<String>,
    #[serde(default)]
    pub booking_status_colors: BTreeMap<String, String>,
    #[serde(default)]
    pub workload_status_colors: BTreeMap<String, String>,
}
