//! Schedule show specs

use crate::prelude::*;

#[test]
fn show_without_schedule_file() {
    let temp = Project::empty();

    temp.dvr()
        .args(&["schedule", "show"])
        .path_arg("--schedule", "schedule.json")
        .passes()
        .stdout_eq("No recordings scheduled\n");
}

#[test]
fn show_empty_schedule() {
    let temp = Project::empty();
    temp.file("schedule.json", EMPTY_SCHEDULE);

    temp.dvr()
        .args(&["schedule", "show"])
        .path_arg("--schedule", "schedule.json")
        .passes()
        .stdout_eq("No recordings scheduled\n");
}

#[test]
fn show_lists_built_schedule() {
    let temp = Project::with_guide();
    temp.build_schedule();

    temp.dvr()
        .args(&["schedule", "show"])
        .path_arg("--schedule", "schedule.json")
        .passes()
        .stdout_eq("20h00 - 20h30 : Arte, Journal\n22h00 - 23h30 : M6, Film\n");
}

#[test]
fn show_as_json() {
    let temp = Project::with_guide();
    temp.build_schedule();

    temp.dvr()
        .args(&["schedule", "show", "--format", "json"])
        .path_arg("--schedule", "schedule.json")
        .passes()
        .stdout_has("\"title\": \"Journal\"")
        .stdout_has("\"stop\": \"20261016233000 +0200\"");
}

#[test]
fn show_corrupt_schedule_fails() {
    let temp = Project::empty();
    temp.file("schedule.json", "{\"recordings\": [");

    temp.dvr()
        .args(&["schedule", "show"])
        .path_arg("--schedule", "schedule.json")
        .fails()
        .stderr_has("malformed schedule");
}
