use cucumber::{given, when};
use regex::Regex;

use crate::step_definitions::initialization_steps::{run_cli, StudioWorld};

#[given(expr = "a staff member {string}")]
async fn given_staff_member(world: &mut StudioWorld, name: String) {
    run_cli(world, &format!("sdesk staff add {name}"));
    assert_eq!(
        world.exit_code,
        Some(0),
        "staff add failed: {:?}",
        world.stderr
    );
    let stdout = world.stdout.as_deref().unwrap_or_default();
    let regex = Regex::new(r"(staff-[0-9a-f]{6})").expect("regex");
    let identifier = regex
        .captures(stdout)
        .and_then(|matches| matches.get(1))
        .map(|value| value.as_str().to_string())
        .expect("staff id in output");
    world.staff_id = Some(identifier);
}

#[when(expr = "I run assign with status {string}")]
async fn when_assign_status(world: &mut StudioWorld, status: String) {
    let identifier = world.booking_ids.first().cloned().expect("booking id");
    run_cli(
        world,
        &format!("sdesk assign {identifier} --status {status}"),
    );
}

#[when(expr = "I assign the staff member with status {string}")]
async fn when_assign_staff_with_status(world: &mut StudioWorld, status: String) {
    let identifier = world.booking_ids.first().cloned().expect("booking id");
    let staff_id = world.staff_id.clone().expect("staff id");
    run_cli(
        world,
        &format!("sdesk assign {identifier} --staff {staff_id} --status {status}"),
    );
}

#[when(expr = "I run assign with link {string} and status {string}")]
async fn when_assign_link_and_status(world: &mut StudioWorld, link: String, status: String) {
    let identifier = world.booking_ids.first().cloned().expect("booking id");
    run_cli(
        world,
        &format!("sdesk assign {identifier} --link {link} --status {status}"),
    );
}
