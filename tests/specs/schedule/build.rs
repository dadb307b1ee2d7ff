//! Schedule build specs
//!
//! Rules matched against the guide, resolved, then written to disk.

use crate::prelude::*;

#[test]
fn build_prints_accepted_entries() {
    let temp = Project::with_guide();

    temp.build_schedule()
        .stdout_eq("20h00 - 20h30 : Arte, Journal\n22h00 - 23h30 : M6, Film\n");
}

#[test]
fn build_writes_the_schedule_file() {
    let temp = Project::with_guide();
    temp.build_schedule();

    let stored = temp.read("schedule.json");
    assert!(stored.contains("\"start\": \"20261016200000 +0200\""));
    assert!(stored.contains("\"channel\": \"M6\""));
    assert!(!stored.contains("TF1"));
}

#[test]
fn verbose_build_reports_occupied_slots() {
    let temp = Project::with_guide();

    temp.dvr()
        .args(&["schedule", "build", "-v"])
        .path_arg("--rules", "rules.toml")
        .path_arg("--guide", "guide")
        .path_arg("--schedule", "schedule.json")
        .passes()
        .stdout_has("Occupied: 20h15 - 22h00 : TF1, Film (by Journal)");
}

#[test]
fn build_replaces_the_previous_schedule() {
    let temp = Project::with_guide();
    temp.build_schedule();

    temp.file("rules.toml", "[[rule]]\ntitle = \"Documentaire\"\n");
    temp.build_schedule()
        .stdout_eq("21h00 - 22h00 : Arte, Documentaire\n");
}

#[test]
fn build_skips_guide_files_still_being_written() {
    let temp = Project::with_guide();
    temp.file("guide/zz-partial.json", "{\"programmes\": [");

    temp.build_schedule()
        .stdout_has("Arte, Journal");
}

#[test]
fn build_without_rules_fails() {
    let temp = Project::with_guide();
    temp.file("rules.toml", "");

    temp.dvr()
        .args(&["schedule", "build"])
        .path_arg("--rules", "rules.toml")
        .path_arg("--guide", "guide")
        .path_arg("--schedule", "schedule.json")
        .fails()
        .stderr_has("no rules");
    assert!(!temp.join("schedule.json").exists());
}

#[test]
fn build_without_guide_fails() {
    let temp = Project::with_guide();

    temp.dvr()
        .args(&["schedule", "build"])
        .path_arg("--rules", "rules.toml")
        .path_arg("--guide", "missing")
        .path_arg("--schedule", "schedule.json")
        .fails();
}

#[test]
fn build_with_no_matches_writes_an_empty_schedule() {
    let temp = Project::with_guide();
    temp.file("rules.toml", "[[rule]]\ntitle = \"Meteo\"\n");

    temp.build_schedule().stdout_eq("No recordings scheduled\n");
    assert_eq!(temp.read("schedule.json"), EMPTY_SCHEDULE);
}
