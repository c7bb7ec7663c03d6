//! CLI command definitions.

use std::ffi::OsString;
use std::path::Path;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

use crate::availability_admin::{disable_date, enable_date, list_unavailable_dates};
use crate::billing::{quote_booking, record_payment};
use crate::booking_approval::{approve_booking, reject_booking, BookingAction};
use crate::booking_creation::{create_booking, BookingCreationRequest};
use crate::booking_display::format_booking_for_display;
use crate::booking_line::{compute_widths, format_booking_line};
use crate::booking_listing::{list_bookings, month_views_cached, MonthAvailability};
use crate::booking_lookup::load_booking_from_studio;
use crate::booking_update::{cancel_booking, reschedule_booking};
use crate::cache::ListingCache;
use crate::calendar::{civil_today, first_of_month, parse_civil_date, resolve_time_zone};
use crate::config_loader::load_studio_configuration;
use crate::error::StudioError;
use crate::feedback::add_feedback;
use crate::file_io::{
    canonicalize_path, ensure_git_repository, get_configuration_path, initialize_studio,
    resolve_root,
};
use crate::ids::format_record_key;
use crate::models::WorkloadStatus;
use crate::staff::{add_staff_member, list_staff_members};
use crate::stats::{collect_studio_stats, validate_studio};
use crate::users::get_current_user;
use crate::workload::legal_next_states;
use crate::workload_update::{progress_workload, update_workload, WorkloadAssignmentRequest};
use chrono::Datelike;

/// Shutterdesk CLI arguments.
#[derive(Debug, Parser)]
#[command(name = "shutterdesk", version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Initialize a Shutterdesk studio in the current repository.
    Init,
    /// Create a new booking.
    Book {
        /// Client name.
        #[arg(num_args = 0.., value_name = "CLIENT")]
        client: Vec<String>,
        /// Package key from the catalog.
        #[arg(long)]
        package: String,
        /// Requested date (YYYY-MM-DD).
        #[arg(long)]
        date: String,
        /// Add-on keys from the catalog.
        #[arg(long = "add-on")]
        add_on: Vec<String>,
        /// Booking notes.
        #[arg(long, num_args = 1..)]
        notes: Option<Vec<String>>,
        /// Skip the minimum lead-time rule (administrative flow).
        #[arg(long = "override-lead-time")]
        override_lead_time: bool,
    },
    /// Show a booking.
    Show {
        /// Booking identifier.
        identifier: String,
        /// Emit JSON output.
        #[arg(long)]
        json: bool,
    },
    /// List bookings.
    List {
        /// Status filter.
        #[arg(long)]
        status: Option<String>,
        /// Package filter.
        #[arg(long)]
        package: Option<String>,
        /// Client filter.
        #[arg(long)]
        client: Option<String>,
        /// Assigned staff filter.
        #[arg(long)]
        staff: Option<String>,
        /// Sort key (date or created).
        #[arg(long)]
        sort: Option<String>,
        /// Search term.
        #[arg(long)]
        search: Option<String>,
        /// Plain, non-colorized output for machine parsing.
        #[arg(long)]
        porcelain: bool,
    },
    /// Show month availability.
    Calendar {
        /// Month (1-12); defaults to the current month.
        #[arg(long)]
        month: Option<u32>,
        /// Year; defaults to the current year.
        #[arg(long)]
        year: Option<i32>,
        /// Number of consecutive months to show.
        #[arg(long, default_value = "1")]
        months: u32,
    },
    /// Move a booking to a new date.
    Reschedule {
        /// Booking identifier.
        identifier: String,
        /// New date (YYYY-MM-DD).
        #[arg(long)]
        date: String,
        /// Skip the minimum lead-time rule (administrative flow).
        #[arg(long = "override-lead-time")]
        override_lead_time: bool,
    },
    /// Cancel a booking.
    Cancel {
        /// Booking identifier.
        identifier: String,
    },
    /// Approve a pending booking, rejecting same-date rivals.
    Approve {
        /// Booking identifier.
        identifier: String,
    },
    /// Reject a pending booking.
    Reject {
        /// Booking identifier.
        identifier: String,
    },
    /// Disable a date for new bookings.
    #[command(name = "disable-date")]
    DisableDate {
        /// Date to disable (YYYY-MM-DD).
        date: String,
    },
    /// Re-enable a previously disabled date.
    #[command(name = "enable-date")]
    EnableDate {
        /// Date to enable (YYYY-MM-DD).
        date: String,
    },
    /// List disabled dates.
    Unavailable,
    /// Update a booking's workload as the assigning role.
    Assign {
        /// Booking identifier.
        identifier: String,
        /// Staff identifiers to add.
        #[arg(long)]
        staff: Vec<String>,
        /// Staff identifiers to remove.
        #[arg(long)]
        remove: Vec<String>,
        /// Replace the whole staff set (comma-separated).
        #[arg(long = "set-staff")]
        set_staff: Option<String>,
        /// Deliverable link (Google Drive or Dropbox).
        #[arg(long)]
        link: Option<String>,
        /// Completion date (YYYY-MM-DD).
        #[arg(long = "completion-date")]
        completion_date: Option<String>,
        /// New workload status.
        #[arg(long)]
        status: Option<String>,
    },
    /// Submit a status update as an assigned staff member.
    Progress {
        /// Booking identifier.
        identifier: String,
        /// New workload status.
        #[arg(long)]
        status: String,
        /// Acting staff identifier; defaults to SHUTTERDESK_USER.
        #[arg(long = "as")]
        acting: Option<String>,
    },
    /// Manage staff records.
    Staff {
        #[command(subcommand)]
        command: StaffCommands,
    },
    /// Show the price breakdown for a booking.
    Quote {
        /// Booking identifier.
        identifier: String,
    },
    /// Record a payment against an approved booking.
    Pay {
        /// Booking identifier.
        identifier: String,
        /// Payment amount in the studio currency.
        amount: i64,
        /// Payment method.
        #[arg(long, default_value = "cash")]
        method: String,
    },
    /// Add client feedback to a completed booking.
    Feedback {
        /// Booking identifier.
        identifier: String,
        /// Rating from 1 to 5.
        rating: u8,
        /// Feedback text.
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Report studio statistics.
    Stats,
    /// Validate studio record integrity.
    Validate,
}

#[derive(Debug, Subcommand)]
enum StaffCommands {
    /// Add a staff member.
    Add {
        /// Staff member name.
        #[arg(num_args = 0.., value_name = "NAME")]
        name: Vec<String>,
        /// Role, e.g. photographer or editor.
        #[arg(long, default_value = "photographer")]
        role: String,
    },
    /// List staff members.
    List,
}

fn is_help_request(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            | ErrorKind::DisplayVersion
    )
}

#[cfg(tarpaulin)]
fn cover_help_request() {
    let _ = is_help_request(ErrorKind::DisplayHelp);
    let _ = is_help_request(ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand);
    let _ = is_help_request(ErrorKind::DisplayVersion);
}

/// Output produced by a CLI command.
#[derive(Debug, Default)]
pub struct CommandOutput {
    pub stdout: String,
}

/// Run the CLI with explicit arguments.
///
/// # Arguments
///
/// * `args` - Command line arguments.
/// * `cwd` - Working directory for the command.
///
/// # Errors
///
/// Returns `StudioError` if execution fails.
pub fn run_from_args<I, T>(args: I, cwd: &Path) -> Result<(), StudioError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let output = run_from_args_with_output(args, cwd)?;
    if !output.stdout.is_empty() {
        println!("{}", output.stdout);
    }
    Ok(())
}

/// Run the CLI with explicit arguments and capture stdout output.
///
/// # Arguments
///
/// * `args` - Command line arguments.
/// * `cwd` - Working directory for the command.
///
/// # Errors
///
/// Returns `StudioError` if execution fails.
pub fn run_from_args_with_output<I, T>(args: I, cwd: &Path) -> Result<CommandOutput, StudioError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    #[cfg(tarpaulin)]
    cover_help_request();
    let args_vec: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let cli = match Cli::try_parse_from(&args_vec) {
        Ok(parsed) => parsed,
        Err(error) => {
            let rendered = error.render().to_string();
            if is_help_request(error.kind()) {
                return Ok(CommandOutput { stdout: rendered });
            }
            return Err(StudioError::BookingOperation(rendered));
        }
    };
    let root = resolve_root(cwd);
    let root = canonicalize_path(&root).unwrap_or(root);
    let stdout = execute_command(cli.command, &root)?;

    Ok(CommandOutput {
        stdout: stdout.unwrap_or_default(),
    })
}

fn execute_command(command: Commands, root: &Path) -> Result<Option<String>, StudioError> {
    match command {
        Commands::Init => {
            ensure_git_repository(root)?;
            initialize_studio(root)?;
            Ok(None)
        }
        Commands::Book {
            client,
            package,
            date,
            add_on,
            notes,
            override_lead_time,
        } => {
            let client_name = client.join(" ");
            if client_name.trim().is_empty() {
                return Err(StudioError::BookingOperation(
                    "client name is required".to_string(),
                ));
            }
            let notes_text = notes
                .as_ref()
                .map(|values| values.join(" "))
                .unwrap_or_default();
            let request = BookingCreationRequest {
                root: root.to_path_buf(),
                client: client_name,
                package,
                add_ons: add_on,
                date: parse_civil_date(&date)?,
                notes: if notes_text.is_empty() {
                    None
                } else {
                    Some(notes_text)
                },
                override_lead_time,
            };
            let result = create_booking(&request)?;
            let use_color = should_use_color();
            Ok(Some(format_booking_for_display(
                &result.booking,
                Some(&result.configuration),
                use_color,
            )))
        }
        Commands::Show { identifier, json } => {
            let lookup = load_booking_from_studio(root, &identifier)?;
            if json {
                let payload = serde_json::to_string_pretty(&lookup.booking)
                    .map_err(|error| StudioError::Io(error.to_string()))?;
                return Ok(Some(payload));
            }
            let configuration = load_studio_configuration(&get_configuration_path(root)?)?;
            let use_color = should_use_color();
            Ok(Some(format_booking_for_display(
                &lookup.booking,
                Some(&configuration),
                use_color,
            )))
        }
        Commands::List {
            status,
            package,
            client,
            staff,
            sort,
            search,
            porcelain,
        } => {
            let bookings = list_bookings(
                root,
                status.as_deref(),
                package.as_deref(),
                client.as_deref(),
                staff.as_deref(),
                sort.as_deref(),
                search.as_deref(),
            )?;
            let configuration = load_studio_configuration(&get_configuration_path(root)?)?;
            let widths = if porcelain {
                None
            } else {
                Some(compute_widths(&bookings))
            };
            let lines = bookings
                .iter()
                .map(|booking| {
                    format_booking_line(
                        booking,
                        widths.as_ref(),
                        porcelain,
                        Some(&configuration),
                        None,
                    )
                })
                .collect::<Vec<_>>();
            Ok(Some(lines.join("\n")))
        }
        Commands::Calendar {
            month,
            year,
            months,
        } => {
            let configuration = load_studio_configuration(&get_configuration_path(root)?)?;
            let zone = resolve_time_zone(&configuration)?;
            let today = civil_today(zone);
            let start_year = year.unwrap_or_else(|| today.year());
            let start_month = month.unwrap_or_else(|| today.month());
            let mut cache = ListingCache::new();
            let views = month_views_cached(root, start_year, start_month, months, &mut cache)?;
            let rendered = views
                .iter()
                .map(render_month_view)
                .collect::<Result<Vec<_>, StudioError>>()?;
            Ok(Some(rendered.join("\n\n")))
        }
        Commands::Reschedule {
            identifier,
            date,
            override_lead_time,
        } => {
            let new_date = parse_civil_date(&date)?;
            let booking = reschedule_booking(root, &identifier, new_date, override_lead_time)?;
            let formatted_identifier = format_record_key(&booking.identifier, false);
            Ok(Some(format!(
                "Rescheduled {} to {}",
                formatted_identifier, booking.date
            )))
        }
        Commands::Cancel { identifier } => {
            cancel_booking(root, &identifier)?;
            let formatted_identifier = format_record_key(&identifier, false);
            Ok(Some(format!("Cancelled {}", formatted_identifier)))
        }
        Commands::Approve { identifier } => {
            let outcomes = approve_booking(root, &identifier)?;
            let mut lines = Vec::new();
            for outcome in &outcomes {
                let formatted_identifier = format_record_key(&outcome.identifier, false);
                let line = match (&outcome.action, &outcome.error) {
                    (BookingAction::Approve, None) => {
                        format!("Approved {}", formatted_identifier)
                    }
                    (BookingAction::Reject, None) => {
                        format!("Rejected {}", formatted_identifier)
                    }
                    (action, Some(message)) => format!(
                        "Failed to {} {}: {}",
                        action.label(),
                        formatted_identifier,
                        message
                    ),
                };
                lines.push(line);
            }
            if let Some(message) = outcomes
                .first()
                .filter(|outcome| outcome.action == BookingAction::Approve)
                .and_then(|outcome| outcome.error.clone())
            {
                return Err(StudioError::BookingOperation(message));
            }
            Ok(Some(lines.join("\n")))
        }
        Commands::Reject { identifier } => {
            reject_booking(root, &identifier)?;
            let formatted_identifier = format_record_key(&identifier, false);
            Ok(Some(format!("Rejected {}", formatted_identifier)))
        }
        Commands::DisableDate { date } => {
            let parsed = parse_civil_date(&date)?;
            let record = disable_date(root, parsed)?;
            Ok(Some(format!("Disabled {}", record.date)))
        }
        Commands::EnableDate { date } => {
            let parsed = parse_civil_date(&date)?;
            enable_date(root, parsed)?;
            Ok(Some(format!("Enabled {}", parsed)))
        }
        Commands::Unavailable => {
            let records = list_unavailable_dates(root)?;
            let lines = records
                .iter()
                .map(|record| {
                    format!(
                        "{}  {}",
                        record.date,
                        format_record_key(&record.identifier, false)
                    )
                })
                .collect::<Vec<_>>();
            Ok(Some(lines.join("\n")))
        }
        Commands::Assign {
            identifier,
            staff,
            remove,
            set_staff,
            link,
            completion_date,
            status,
        } => {
            let parsed_status = status
                .as_deref()
                .map(|value| {
                    value
                        .parse::<WorkloadStatus>()
                        .map_err(StudioError::BookingOperation)
                })
                .transpose()?;
            let parsed_completion = completion_date
                .as_deref()
                .map(parse_civil_date)
                .transpose()?;
            let request = WorkloadAssignmentRequest {
                add_staff: staff,
                remove_staff: remove,
                set_staff: set_staff.map(|value| {
                    value
                        .split(',')
                        .map(|id| id.trim().to_string())
                        .filter(|id| !id.is_empty())
                        .collect()
                }),
                deliverable_link: link,
                completion_date: parsed_completion,
                status: parsed_status,
            };
            let booking = update_workload(root, &identifier, &request)?;
            let formatted_identifier = format_record_key(&booking.identifier, false);
            Ok(Some(format!(
                "Updated {} ({})",
                formatted_identifier, booking.workload.status
            )))
        }
        Commands::Progress {
            identifier,
            status,
            acting,
        } => {
            let proposed = status
                .parse::<WorkloadStatus>()
                .map_err(StudioError::BookingOperation)?;
            let acting_staff = acting.unwrap_or_else(get_current_user);
            let booking = progress_workload(root, &identifier, proposed, &acting_staff)?;
            let formatted_identifier = format_record_key(&booking.identifier, false);
            let next = legal_next_states(booking.workload.status)
                .iter()
                .map(|state| state.key())
                .collect::<Vec<_>>()
                .join(", ");
            Ok(Some(format!(
                "Updated {} ({}; next: {})",
                formatted_identifier, booking.workload.status, next
            )))
        }
        Commands::Staff { command } => match command {
            StaffCommands::Add { name, role } => {
                let name_text = name.join(" ");
                let member = add_staff_member(root, &name_text, &role)?;
                Ok(Some(format!(
                    "Added {} ({})",
                    format_record_key(&member.identifier, false),
                    member.role
                )))
            }
            StaffCommands::List => {
                let members = list_staff_members(root)?;
                let lines = members
                    .iter()
                    .map(|member| {
                        format!(
                            "{}  {} ({})",
                            format_record_key(&member.identifier, false),
                            member.name,
                            member.role
                        )
                    })
                    .collect::<Vec<_>>();
                Ok(Some(lines.join("\n")))
            }
        },
        Commands::Quote { identifier } => {
            let configuration = load_studio_configuration(&get_configuration_path(root)?)?;
            let quote = quote_booking(root, &identifier)?;
            let currency = configuration.currency;
            let lines = vec![
                format!("package: {currency} {}", quote.package_price),
                format!("add-ons: {currency} {}", quote.add_on_total),
                format!("total: {currency} {}", quote.total),
                format!("paid: {currency} {}", quote.paid),
                format!("balance: {currency} {}", quote.balance),
            ];
            Ok(Some(lines.join("\n")))
        }
        Commands::Pay {
            identifier,
            amount,
            method,
        } => {
            record_payment(root, &identifier, amount, &method)?;
            let formatted_identifier = format_record_key(&identifier, false);
            Ok(Some(format!("Recorded payment for {}", formatted_identifier)))
        }
        Commands::Feedback {
            identifier,
            rating,
            text,
        } => {
            let text_value = text.join(" ");
            add_feedback(root, &identifier, &get_current_user(), rating, &text_value)?;
            Ok(None)
        }
        Commands::Stats => {
            let stats = collect_studio_stats(root)?;
            let mut lines = Vec::new();
            lines.push(format!("total bookings: {}", stats.total_bookings));
            for (status, count) in stats.status_counts {
                lines.push(format!("status: {status}: {count}"));
            }
            for (status, count) in stats.workload_counts {
                lines.push(format!("workload: {status}: {count}"));
            }
            lines.push(format!("revenue collected: {}", stats.revenue_collected));
            lines.push(format!("outstanding balance: {}", stats.outstanding_balance));
            lines.push(format!("feedback entries: {}", stats.feedback_count));
            if let Some(average) = stats.average_rating {
                lines.push(format!("average rating: {average:.1}"));
            }
            Ok(Some(lines.join("\n")))
        }
        Commands::Validate => {
            validate_studio(root)?;
            Ok(None)
        }
    }
}

fn render_month_view(view: &MonthAvailability) -> Result<String, StudioError> {
    let first = first_of_month(view.year, view.month)?;
    let mut lines = vec![first.format("%B %Y").to_string()];
    for day in &view.days {
        let state = if day.disabled {
            "blocked".to_string()
        } else if day.approved {
            "booked".to_string()
        } else if day.pending_count > 0 {
            format!("open ({} pending)", day.pending_count)
        } else if day.bookable {
            "open".to_string()
        } else {
            "lead window".to_string()
        };
        lines.push(format!("{}  {}", day.date, state));
    }
    Ok(lines.join("\n"))
}

/// Run the CLI using process arguments and current directory.
///
/// # Errors
///
/// Returns `StudioError` if execution fails.
pub fn run_from_env() -> Result<(), StudioError> {
    run_from_args(std::env::args_os(), Path::new("."))
}

fn should_use_color() -> bool {
    use std::io::IsTerminal;
    std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}
