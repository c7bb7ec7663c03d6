//! Configuration loading and validation.

use std::fs;
use std::path::Path;

use chrono_tz::Tz;
use serde_yaml::{Mapping, Value};

use crate::config::default_studio_configuration;
use crate::error::StudioError;
use crate::models::StudioConfiguration;

/// Load a studio configuration from disk.
///
/// # Arguments
///
/// * `path` - Path to the configuration file.
///
/// # Errors
///
/// Returns `StudioError::Configuration` if the configuration is invalid.
pub fn load_studio_configuration(path: &Path) -> Result<StudioConfiguration, StudioError> {
    let contents = fs::read_to_string(path).map_err(|error| {
        if error.kind() == std::io::ErrorKind::NotFound {
            StudioError::Configuration("configuration file not found".to_string())
        } else {
            StudioError::Io(error.to_string())
        }
    })?;

    let raw_value: Value = if contents.trim().is_empty() {
        Value::Mapping(Mapping::new())
    } else {
        serde_yaml::from_str(&contents)
            .map_err(|error| StudioError::Configuration(map_configuration_error(&error)))?
    };
    let merged_value = merge_with_defaults(raw_value)?;
    let configuration: StudioConfiguration = serde_yaml::from_value(merged_value)
        .map_err(|error| StudioError::Configuration(map_configuration_error(&error)))?;

    let errors = validate_studio_configuration(&configuration);
    if !errors.is_empty() {
        return Err(StudioError::Configuration(errors.join("; ")));
    }

    Ok(configuration)
}

/// Validate configuration rules beyond schema validation.
///
/// # Arguments
///
/// * `configuration` - Loaded configuration.
///
/// # Returns
///
/// A list of validation errors.
pub fn validate_studio_configuration(configuration: &StudioConfiguration) -> Vec<String> {
    let mut errors = Vec::new();

    if configuration.studio_directory.trim().is_empty() {
        errors.push("studio_directory must not be empty".to_string());
    }

    if configuration.studio_key.trim().is_empty() {
        errors.push("studio_key must not be empty".to_string());
    }

    if configuration.time_zone.parse::<Tz>().is_err() {
        errors.push(format!("unknown time zone '{}'", configuration.time_zone));
    }

    if configuration.packages.is_empty() {
        errors.push("at least one package is required".to_string());
    }

    for (key, package) in &configuration.packages {
        if package.price <= 0 {
            errors.push(format!("package '{key}' must have a positive price"));
        }
    }

    for (key, add_on) in &configuration.add_ons {
        if add_on.price <= 0 {
            errors.push(format!("add-on '{key}' must have a positive price"));
        }
    }

    if configuration.deliverable_hosts.is_empty() {
        errors.push("at least one deliverable host is required".to_string());
    }

    errors
}

fn map_configuration_error(error: &serde_yaml::Error) -> String {
    let message = error.to_string();
    if message.contains("unknown field") {
        return "unknown configuration fields".to_string();
    }
    message
}

fn merge_with_defaults(value: Value) -> Result<Value, StudioError> {
    let mut defaults = serde_yaml::to_value(default_studio_configuration())
        .map_err(|error| StudioError::Io(error.to_string()))?;
    let overrides = match value {
        Value::Null => Mapping::new(),
        Value::Mapping(mapping) => mapping,
        _ => {
            return Err(StudioError::Configuration(
                "configuration must be a mapping".to_string(),
            ))
        }
    };

    if let Value::Mapping(ref mut default_map) = defaults {
        for (key, value) in overrides {
            default_map.insert(key, value);
        }
    }
    Ok(defaults)
}
