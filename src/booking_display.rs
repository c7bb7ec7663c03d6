//! Booking display formatting helpers.

use owo_colors::{AnsiColors, OwoColorize};

use crate::booking_line::{booking_status_color, package_color, paint, workload_status_color};
use crate::ids::format_record_key;
use crate::models::{BookingData, StudioConfiguration};

fn dim(text: &str, use_color: bool) -> String {
    if use_color {
        text.color(AnsiColors::BrightBlack).to_string()
    } else {
        text.to_string()
    }
}

/// Format a booking for human-readable display.
pub fn format_booking_for_display(
    booking: &BookingData,
    configuration: Option<&StudioConfiguration>,
    use_color: bool,
) -> String {
    let formatted_identifier = format_record_key(&booking.identifier, false);
    let add_ons = if booking.add_ons.is_empty() {
        "-".to_string()
    } else {
        booking.add_ons.join(", ")
    };
    let staff = if booking.workload.assigned_staff.is_empty() {
        "-".to_string()
    } else {
        booking
            .workload
            .assigned_staff
            .iter()
            .map(|id| format_record_key(id, false))
            .collect::<Vec<_>>()
            .join(", ")
    };
    let link = booking
        .workload
        .deliverable_link
        .clone()
        .unwrap_or_else(|| "-".to_string());

    let rows = vec![
        ("ID:", formatted_identifier, None, false),
        ("Client:", booking.client.clone(), None, false),
        (
            "Package:",
            booking.package.clone(),
            package_color(&booking.package, configuration),
            false,
        ),
        ("Add-ons:", add_ons, None, booking.add_ons.is_empty()),
        ("Date:", booking.date.to_string(), None, false),
        (
            "Status:",
            booking.status.key().to_string(),
            booking_status_color(booking.status.key(), configuration),
            false,
        ),
        (
            "Workload:",
            booking.workload.status.key().to_string(),
            workload_status_color(booking.workload.status.key(), configuration),
            false,
        ),
        (
            "Staff:",
            staff,
            None,
            booking.workload.assigned_staff.is_empty(),
        ),
        (
            "Deliverable:",
            link,
            None,
            booking.workload.deliverable_link.is_none(),
        ),
    ];

    let mut lines = Vec::new();
    for (label, value, color, muted) in rows {
        let final_color = if muted {
            Some(AnsiColors::BrightBlack)
        } else {
            color
        };
        lines.push(format!(
            "{} {}",
            dim(label, use_color),
            paint(&value, final_color, use_color)
        ));
    }
    if let Some(completed_on) = booking.workload.completion_date {
        lines.push(format!(
            "{} {}",
            dim("Completed:", use_color),
            completed_on
        ));
    }
    if !booking.notes.is_empty() {
        lines.push(dim("Notes:", use_color));
        lines.push(booking.notes.clone());
    }
    if !booking.payments.is_empty() {
        lines.push(dim("Payments:", use_color));
        for payment in &booking.payments {
            lines.push(format!(
                "  {} via {} on {}",
                payment.amount,
                payment.method,
                payment.paid_at.date_naive()
            ));
        }
    }
    if !booking.feedback.is_empty() {
        lines.push(dim("Feedback:", use_color));
        for entry in &booking.feedback {
            let author = if entry.author.is_empty() {
                "unknown"
            } else {
                entry.author.as_str()
            };
            lines.push(format!(
                "  [{}/5] {} {}",
                entry.rating,
                dim(&format!("{author}:"), use_color),
                entry.text
            ));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookingStatus, WorkloadData, WorkloadStatus};
    use chrono::{NaiveDate, TimeZone, Utc};

    #[test]
    fn display_includes_workload_and_client_rows() {
        let timestamp = Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap();
        let mut workload = WorkloadData::default();
        workload.status = WorkloadStatus::Scheduled;
        workload.assigned_staff.insert("staff-1a2b3c4d".to_string());
        let booking = BookingData {
            identifier: "shutter-1a2b3c4d".to_string(),
            client: "Reyes".to_string(),
            package: "portrait".to_string(),
            add_ons: vec!["drone".to_string()],
            date: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
            status: BookingStatus::Approved,
            notes: "Golden hour preferred".to_string(),
            payments: Vec::new(),
            feedback: Vec::new(),
            workload,
            created_at: timestamp,
            updated_at: timestamp,
        };
        let rendered = format_booking_for_display(&booking, None, false);
        assert!(rendered.contains("ID: shutter-1a2b3c"));
        assert!(rendered.contains("Client: Reyes"));
        assert!(rendered.contains("Workload: scheduled"));
        assert!(rendered.contains("Staff: staff-1a2b3c"));
        assert!(rendered.contains("Golden hour preferred"));
    }
}
