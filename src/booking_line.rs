//! Single-line booking formatting for list output.

use owo_colors::{AnsiColors, OwoColorize};

use crate::ids::format_record_key;
use crate::models::{BookingData, StudioConfiguration};

/// Column widths for list output.
#[derive(Debug, Clone, Copy)]
pub struct Widths {
    pub package: usize,
    pub identifier: usize,
    pub status: usize,
    pub workload: usize,
}

/// Compute printable column widths for aligned normal-mode output.
pub fn compute_widths(bookings: &[BookingData]) -> Widths {
    let mut widths = Widths {
        package: 1,
        identifier: 0,
        status: 0,
        workload: 0,
    };

    for booking in bookings {
        widths.status = widths.status.max(booking.status.key().len());
        widths.workload = widths.workload.max(booking.workload.status.key().len());
        let formatted_identifier = format_record_key(&booking.identifier, false);
        widths.identifier = widths.identifier.max(formatted_identifier.len());
    }

    widths
}

/// Render a single-line booking summary.
///
/// When `use_color_override` is `None`, color is determined by NO_COLOR
/// and stdout TTY (interactive). When `Some(true)` or `Some(false)`,
/// that value is used instead (for tests or callers that know the
/// context).
pub fn format_booking_line(
    booking: &BookingData,
    widths: Option<&Widths>,
    porcelain: bool,
    configuration: Option<&StudioConfiguration>,
    use_color_override: Option<bool>,
) -> String {
    let formatted_identifier = format_record_key(&booking.identifier, false);
    if porcelain {
        return format!(
            "{} | {} | {} | {} | {} | {}",
            booking
                .package
                .chars()
                .next()
                .unwrap_or(' ')
                .to_ascii_uppercase(),
            formatted_identifier,
            booking.date,
            booking.status.key(),
            booking.workload.status.key(),
            booking.client
        );
    }

    let computed_widths = widths
        .copied()
        .unwrap_or_else(|| compute_widths(std::slice::from_ref(booking)));
    let use_color = use_color_override.unwrap_or_else(should_use_color);

    let package_initial = booking
        .package
        .chars()
        .next()
        .unwrap_or(' ')
        .to_ascii_uppercase()
        .to_string();
    let package_part = paint(
        &format!("{:width$}", package_initial, width = computed_widths.package),
        package_color(&booking.package, configuration),
        use_color,
    );

    let identifier_part = format!(
        "{:width$}",
        formatted_identifier,
        width = computed_widths.identifier
    );
    let status_part = paint(
        &format!(
            "{:width$}",
            booking.status.key(),
            width = computed_widths.status
        ),
        booking_status_color(booking.status.key(), configuration),
        use_color,
    );
    let workload_part = paint(
        &format!(
            "{:width$}",
            booking.workload.status.key(),
            width = computed_widths.workload
        ),
        workload_status_color(booking.workload.status.key(), configuration),
        use_color,
    );
    format!(
        "{package_part} {identifier_part} {} {status_part} {workload_part} {}",
        booking.date, booking.client
    )
}

pub(crate) fn should_use_color() -> bool {
    use std::io::IsTerminal;
    // Disable colors if NO_COLOR is set or if stdout is not a TTY
    std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

pub(crate) fn paint(text: &str, color: Option<AnsiColors>, use_color: bool) -> String {
    match (use_color, color) {
        (true, Some(color_value)) => text.color(color_value).to_string(),
        _ => text.to_string(),
    }
}

pub(crate) fn parse_color(name: &str) -> Option<AnsiColors> {
    match name.to_ascii_lowercase().as_str() {
        "black" => Some(AnsiColors::Black),
        "red" => Some(AnsiColors::Red),
        "green" => Some(AnsiColors::Green),
        "yellow" => Some(AnsiColors::Yellow),
        "blue" => Some(AnsiColors::Blue),
        "magenta" => Some(AnsiColors::Magenta),
        "cyan" => Some(AnsiColors::Cyan),
        "white" => Some(AnsiColors::White),
        "bright_black" => Some(AnsiColors::BrightBlack),
        "bright_red" => Some(AnsiColors::BrightRed),
        "bright_green" => Some(AnsiColors::BrightGreen),
        "bright_yellow" => Some(AnsiColors::BrightYellow),
        "bright_blue" => Some(AnsiColors::BrightBlue),
        "bright_magenta" => Some(AnsiColors::BrightMagenta),
        "bright_cyan" => Some(AnsiColors::BrightCyan),
        "bright_white" => Some(AnsiColors::BrightWhite),
        _ => None,
    }
}

pub(crate) fn booking_status_color(
    status: &str,
    configuration: Option<&StudioConfiguration>,
) -> Option<AnsiColors> {
    if let Some(config) = configuration {
        if let Some(color) = config.booking_status_colors.get(status) {
            return parse_color(color);
        }
    }
    // Fallback to default colors
    parse_color(match status {
        "pending" => "yellow",
        "approved" => "green",
        "rejected" => "red",
        "cancelled" => "bright_black",
        _ => "white",
    })
}

pub(crate) fn workload_status_color(
    status: &str,
    configuration: Option<&StudioConfiguration>,
) -> Option<AnsiColors> {
    if let Some(config) = configuration {
        if let Some(color) = config.workload_status_colors.get(status) {
            return parse_color(color);
        }
    }
    parse_color(match status {
        "unassigned" => "bright_black",
        "scheduled" => "cyan",
        "uploaded" => "blue",
        "for_edit" => "yellow",
        "editing" => "magenta",
        "for_release" => "bright_blue",
        "completed" => "green",
        _ => "white",
    })
}

pub(crate) fn package_color(
    package: &str,
    configuration: Option<&StudioConfiguration>,
) -> Option<AnsiColors> {
    if let Some(config) = configuration {
        if let Some(definition) = config.packages.get(package) {
            if let Some(color) = &definition.color {
                return parse_color(color);
            }
        }
    }
    parse_color("white")
}
