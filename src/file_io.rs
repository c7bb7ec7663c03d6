//! File system helpers for initialization and discovery.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::write_default_configuration;
use crate::config_loader::load_studio_configuration;
use crate::error::StudioError;

pub(crate) fn canonicalize_path(path: &Path) -> Result<PathBuf, std::io::Error> {
    path.canonicalize()
}

/// Ensure the current directory is inside a git repository.
///
/// # Arguments
///
/// * `root` - Path to validate.
///
/// # Errors
///
/// Returns `StudioError::Initialization` if the directory is not a git repository.
pub fn ensure_git_repository(root: &Path) -> Result<(), StudioError> {
    let output = Command::new("git")
        .args(["rev-parse", "--is-inside-work-tree"])
        .current_dir(root)
        .output()
        .map_err(|error| StudioError::Io(error.to_string()))?;

    if !output.status.success() {
        return Err(StudioError::Initialization(
            "not a git repository".to_string(),
        ));
    }

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if stdout != "true" {
        return Err(StudioError::Initialization(
            "not a git repository".to_string(),
        ));
    }

    Ok(())
}

/// Initialize the Shutterdesk studio structure.
///
/// # Arguments
///
/// * `root` - Repository root.
///
/// # Errors
///
/// Returns `StudioError::Initialization` if already initialized.
pub fn initialize_studio(root: &Path) -> Result<(), StudioError> {
    let studio_dir = root.join("studio");
    if studio_dir.exists() {
        return Err(StudioError::Initialization(
            "already initialized".to_string(),
        ));
    }

    std::fs::create_dir(&studio_dir).map_err(|error| StudioError::Io(error.to_string()))?;
    for subdirectory in ["bookings", "staff", "unavailable"] {
        std::fs::create_dir(studio_dir.join(subdirectory))
            .map_err(|error| StudioError::Io(error.to_string()))?;
    }

    let config_path = root.join(".shutterdesk.yml");
    if !config_path.exists() {
        write_default_configuration(&config_path)?;
    }

    Ok(())
}

/// Resolve the repository root for a command.
///
/// # Arguments
///
/// * `cwd` - Current working directory.
pub fn resolve_root(cwd: &Path) -> PathBuf {
    cwd.to_path_buf()
}

/// Locate the configuration file path by upward search.
///
/// # Arguments
///
/// * `root` - Path used for upward search.
///
/// # Errors
///
/// Returns `StudioError::BookingOperation` if the configuration file is missing.
pub fn get_configuration_path(root: &Path) -> Result<PathBuf, StudioError> {
    let Some(path) = find_configuration_file(root)? else {
        return Err(StudioError::BookingOperation(
            "studio not initialized".to_string(),
        ));
    };
    Ok(path)
}

/// Locate the studio directory for the resolved configuration.
///
/// # Arguments
///
/// * `root` - Repository root.
///
/// # Errors
///
/// Returns `StudioError::BookingOperation` if no studio directory exists.
pub fn load_studio_directory(root: &Path) -> Result<PathBuf, StudioError> {
    let config_path = get_configuration_path(root)?;
    let configuration = load_studio_configuration(&config_path)?;
    let base = config_path.parent().unwrap_or_else(|| Path::new(""));
    let studio_dir = base.join(&configuration.studio_directory);
    if !studio_dir.is_dir() {
        return Err(StudioError::BookingOperation(
            "studio not initialized".to_string(),
        ));
    }
    match canonicalize_path(&studio_dir) {
        Ok(canonical) => Ok(canonical),
        Err(_) => Ok(studio_dir),
    }
}

fn find_configuration_file(root: &Path) -> Result<Option<PathBuf>, StudioError> {
    let git_root = find_git_root(root);
    let mut current = root
        .canonicalize()
        .map_err(|error| StudioError::Io(error.to_string()))?;
    loop {
        let candidate = current.join(".shutterdesk.yml");
        if candidate.is_file() {
            return Ok(Some(candidate));
        }
        if let Some(root) = &git_root {
            if &current == root {
                break;
            }
        }
        let parent = match current.parent() {
            Some(parent) => parent.to_path_buf(),
            None => break,
        };
        current = parent;
    }
    Ok(None)
}

fn find_git_root(root: &Path) -> Option<PathBuf> {
    let output = Command::new("git")
        .args(["rev-parse", "--show-toplevel"])
        .current_dir(root)
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    let path = PathBuf::from(stdout);
    path.is_dir().then_some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn initialize_studio_creates_layout_once() {
        let temp = tempdir().unwrap();
        initialize_studio(temp.path()).unwrap();
        assert!(temp.path().join("studio/bookings").is_dir());
        assert!(temp.path().join("studio/staff").is_dir());
        assert!(temp.path().join("studio/unavailable").is_dir());
        assert!(temp.path().join(".shutterdesk.yml").is_file());

        let error = initialize_studio(temp.path()).expect_err("second init");
        assert_eq!(error.to_string(), "already initialized");
    }

    #[test]
    fn load_studio_directory_requires_initialization() {
        let temp = tempdir().unwrap();
        let error = load_studio_directory(temp.path()).expect_err("uninitialized");
        assert_eq!(error.to_string(), "studio not initialized");

        initialize_studio(temp.path()).unwrap();
        let studio_dir = load_studio_directory(temp.path()).unwrap();
        assert!(studio_dir.ends_with("studio"));
    }
}
