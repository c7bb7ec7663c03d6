use std::fs;
use std::path::PathBuf;
use std::process::Command;

use cucumber::{given, then, when, World};
use tempfile::TempDir;

use shutterdesk::cli::run_from_args_with_output;

/// Shared scenario state.
#[derive(Debug, Default, World)]
pub struct StudioWorld {
    pub temp_dir: Option<TempDir>,
    pub working_directory: Option<PathBuf>,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
    pub exit_code: Option<i32>,
    pub booking_ids: Vec<String>,
    pub staff_id: Option<String>,
}

pub fn run_cli(world: &mut StudioWorld, command: &str) {
    let args = shell_words::split(command).expect("parse command");
    let cwd = world
        .working_directory
        .as_ref()
        .expect("working directory not set");

    match run_from_args_with_output(args, cwd.as_path()) {
        Ok(output) => {
            world.exit_code = Some(0);
            world.stdout = Some(output.stdout);
            world.stderr = Some(String::new());
        }
        Err(error) => {
            world.exit_code = Some(1);
            world.stdout = Some(String::new());
            world.stderr = Some(error.to_string());
        }
    }
}

#[given("an initialized studio")]
async fn given_initialized_studio(world: &mut StudioWorld) {
    let temp_dir = TempDir::new().expect("temp dir");
    let repo_path = temp_dir.path().join("repo");
    fs::create_dir_all(&repo_path).expect("create repo");
    Command::new("git")
        .args(["init"])
        .current_dir(&repo_path)
        .output()
        .expect("git init failed");
    world.working_directory = Some(repo_path);
    world.temp_dir = Some(temp_dir);
    run_cli(world, "sdesk init");
    assert_eq!(world.exit_code, Some(0), "init failed: {:?}", world.stderr);
}

#[when(expr = "I run {string}")]
async fn when_i_run(world: &mut StudioWorld, command: String) {
    run_cli(world, &command);
}

#[then("the command succeeds")]
async fn then_command_succeeds(world: &mut StudioWorld) {
    assert_eq!(
        world.exit_code,
        Some(0),
        "expected success, stderr: {:?}",
        world.stderr
    );
}

#[then("the command fails")]
async fn then_command_fails(world: &mut StudioWorld) {
    assert_eq!(
        world.exit_code,
        Some(1),
        "expected failure, stdout: {:?}",
        world.stdout
    );
}

#[then(expr = "the output contains {string}")]
async fn then_output_contains(world: &mut StudioWorld, expected: String) {
    let stdout = world.stdout.as_deref().unwrap_or_default();
    assert!(
        stdout.contains(&expected),
        "output {stdout:?} does not contain {expected:?}"
    );
}

#[then(expr = "the error contains {string}")]
async fn then_error_contains(world: &mut StudioWorld, expected: String) {
    let stderr = world.stderr.as_deref().unwrap_or_default();
    assert!(
        stderr.contains(&expected),
        "error {stderr:?} does not contain {expected:?}"
    );
}
