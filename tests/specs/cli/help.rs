//! Help output specs

use crate::prelude::*;

#[test]
fn dvr_help_lists_schedule_commands() {
    let temp = Project::empty();

    temp.dvr()
        .args(&["schedule", "--help"])
        .passes()
        .stdout_has("build")
        .stdout_has("show")
        .stdout_has("remove");
}

#[test]
fn dvr_without_command_fails() {
    let temp = Project::empty();
    temp.dvr().fails().stderr_has("Usage");
}

#[test]
fn dvrd_help_lists_recorder_flags() {
    let temp = Project::empty();

    temp.dvrd()
        .args(&["--help"])
        .passes()
        .stdout_has("--schedule")
        .stdout_has("--recordings-dir")
        .stdout_has("--overrun-margin");
}

#[test]
fn dvr_help_lists_guide_command() {
    let temp = Project::empty();

    temp.dvr()
        .args(&["--help"])
        .passes()
        .stdout_has("schedule")
        .stdout_has("guide");
}
