//! Schedule remove specs

use crate::prelude::*;

#[test]
fn remove_drops_entry_by_start() {
    let temp = Project::with_guide();
    temp.build_schedule();

    temp.dvr()
        .args(&["schedule", "remove", "--start", "20261016200000 +0200"])
        .path_arg("--schedule", "schedule.json")
        .passes()
        .stdout_eq("Removed: 20h00 - 20h30 : Arte, Journal\n");

    temp.dvr()
        .args(&["schedule", "show"])
        .path_arg("--schedule", "schedule.json")
        .passes()
        .stdout_eq("22h00 - 23h30 : M6, Film\n");
}

#[test]
fn remove_unknown_start_fails() {
    let temp = Project::with_guide();
    temp.build_schedule();

    temp.dvr()
        .args(&["schedule", "remove", "--start", "20261016190000 +0200"])
        .path_arg("--schedule", "schedule.json")
        .fails()
        .stderr_has("no recording starts at 20261016190000 +0200");
}

#[test]
fn remove_rejects_malformed_start() {
    let temp = Project::with_guide();
    temp.build_schedule();

    temp.dvr()
        .args(&["schedule", "remove", "--start", "tonight"])
        .path_arg("--schedule", "schedule.json")
        .fails()
        .stderr_has("--start");
}
