use chrono::{Duration, Utc};
use cucumber::{given, then, when};
use regex::Regex;

use crate::step_definitions::initialization_steps::{run_cli, StudioWorld};

fn capture_booking_id(world: &StudioWorld) -> String {
    let stdout = world.stdout.as_deref().unwrap_or_default();
    let regex = Regex::new(r"(shutter-[0-9a-f]{6})").expect("regex");
    regex
        .captures(stdout)
        .and_then(|matches| matches.get(1))
        .map(|value| value.as_str().to_string())
        .expect("booking id in output")
}

fn booking_id(world: &StudioWorld, index: usize) -> String {
    world
        .booking_ids
        .get(index)
        .cloned()
        .expect("booking id recorded")
}

fn status_column(world: &mut StudioWorld, identifier: &str, column: usize) -> String {
    run_cli(world, "sdesk list --porcelain");
    let stdout = world.stdout.clone().unwrap_or_default();
    let line = stdout
        .lines()
        .find(|line| line.contains(identifier))
        .expect("booking line")
        .to_string();
    line.split(" | ")
        .nth(column)
        .expect("status column")
        .to_string()
}

#[given(expr = "a pending booking for {string} on {string}")]
async fn given_pending_booking(world: &mut StudioWorld, client: String, date: String) {
    run_cli(
        world,
        &format!("sdesk book {client} --package portrait --date {date}"),
    );
    assert_eq!(world.exit_code, Some(0), "book failed: {:?}", world.stderr);
    let identifier = capture_booking_id(world);
    world.booking_ids.push(identifier);
}

#[given(expr = "an approved booking for {string} on {string}")]
async fn given_approved_booking(world: &mut StudioWorld, client: String, date: String) {
    run_cli(
        world,
        &format!("sdesk book {client} --package portrait --date {date}"),
    );
    assert_eq!(world.exit_code, Some(0), "book failed: {:?}", world.stderr);
    let identifier = capture_booking_id(world);
    run_cli(world, &format!("sdesk approve {identifier}"));
    assert_eq!(world.exit_code, Some(0), "approve failed: {:?}", world.stderr);
    world.booking_ids.push(identifier);
}

#[when("I approve the first booking")]
async fn when_approve_first(world: &mut StudioWorld) {
    let identifier = booking_id(world, 0);
    run_cli(world, &format!("sdesk approve {identifier}"));
}

#[when(expr = "I book {int} days from today")]
async fn when_book_days_out(world: &mut StudioWorld, days: i64) {
    let date = (Utc::now().date_naive() + Duration::days(days)).to_string();
    run_cli(
        world,
        &format!("sdesk book Walk-in --package portrait --date {date}"),
    );
}

#[then(expr = "the first booking status is {string}")]
async fn then_first_status(world: &mut StudioWorld, expected: String) {
    let identifier = booking_id(world, 0);
    assert_eq!(status_column(world, &identifier, 3), expected);
}

#[then(expr = "the second booking status is {string}")]
async fn then_second_status(world: &mut StudioWorld, expected: String) {
    let identifier = booking_id(world, 1);
    assert_eq!(status_column(world, &identifier, 3), expected);
}

#[then(expr = "the workload status is {string}")]
async fn then_workload_status(world: &mut StudioWorld, expected: String) {
    let identifier = booking_id(world, 0);
    assert_eq!(status_column(world, &identifier, 4), expected);
}
