//! Default configuration for new Shutterdesk studios.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::StudioError;
use crate::models::{AddOnDefinition, PackageDefinition, StudioConfiguration};

/// Return the default studio configuration.
pub fn default_studio_configuration() -> StudioConfiguration {
    let packages = BTreeMap::from([
        (
            "wedding".to_string(),
            PackageDefinition {
                name: "Wedding".to_string(),
                price: 45_000,
                color: Some("magenta".to_string()),
            },
        ),
        (
            "debut".to_string(),
            PackageDefinition {
                name: "Debut".to_string(),
                price: 28_000,
                color: Some("bright_magenta".to_string()),
            },
        ),
        (
            "portrait".to_string(),
            PackageDefinition {
                name: "Portrait Session".to_string(),
                price: 8_000,
                color: Some("cyan".to_string()),
            },
        ),
        (
            "corporate".to_string(),
            PackageDefinition {
                name: "Corporate Event".to_string(),
                price: 20_000,
                color: Some("blue".to_string()),
            },
        ),
    ]);

    let add_ons = BTreeMap::from([
        (
            "extra-hour".to_string(),
            AddOnDefinition {
                name: "Extra coverage hour".to_string(),
                price: 3_000,
            },
        ),
        (
            "photo-album".to_string(),
            AddOnDefinition {
                name: "Printed photo album".to_string(),
                price: 6_500,
            },
        ),
        (
            "drone".to_string(),
            AddOnDefinition {
                name: "Drone coverage".to_string(),
                price: 5_000,
            },
        ),
        (
            "same-day-edit".to_string(),
            AddOnDefinition {
                name: "Same-day edit video".to_string(),
                price: 12_000,
            },
        ),
    ]);

    let booking_status_colors = BTreeMap::from([
        ("pending".to_string(), "yellow".to_string()),
        ("approved".to_string(), "green".to_string()),
        ("rejected".to_string(), "red".to_string()),
        ("cancelled".to_string(), "bright_black".to_string()),
    ]);

    let workload_status_colors = BTreeMap::from([
        ("unassigned".to_string(), "bright_black".to_string()),
        ("scheduled".to_string(), "cyan".to_string()),
        ("uploaded".to_string(), "blue".to_string()),
        ("for_edit".to_string(), "yellow".to_string()),
        ("editing".to_string(), "magenta".to_string()),
        ("for_release".to_string(), "bright_blue".to_string()),
        ("completed".to_string(), "green".to_string()),
    ]);

    StudioConfiguration {
        studio_directory: "studio".to_string(),
        studio_key: "shutter".to_string(),
        time_zone: "Asia/Manila".to_string(),
        minimum_lead_days: 30,
        currency: "PHP".to_string(),
        packages,
        add_ons,
        deliverable_hosts: vec![
            "https://drive.google.com/".to_string(),
            "https://www.dropbox.com/".to_string(),
        ],
        booking_status_colors,
        workload_status_colors,
    }
}

/// Write the default configuration to disk.
///
/// # Arguments
///
/// * `path` - Path to the .shutterdesk.yml file.
///
/// # Errors
///
/// Returns `StudioError::Io` if writing fails.
pub fn write_default_configuration(path: &Path) -> Result<(), StudioError> {
    let configuration = default_studio_configuration();
    let contents = serde_yaml::to_string(&configuration)
        .map_err(|error| StudioError::Io(error.to_string()))?;
    std::fs::write(path, contents).map_err(|error| StudioError::Io(error.to_string()))
}
