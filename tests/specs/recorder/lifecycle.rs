//! Recorder lifecycle specs
//!
//! Startup validation and the clean exit on an empty schedule. Capture
//! itself needs a tuner and is covered by the engine's tests.

use crate::prelude::*;

fn recorder(temp: &Project) -> Cli {
    temp.dvrd()
        .path_arg("--schedule", "schedule.json")
        .path_arg("--channels", "channels-dvb.txt")
        .path_arg("--recordings-dir", "recordings")
}

#[test]
fn empty_schedule_exits_cleanly() {
    let temp = Project::with_guide();
    temp.file("schedule.json", EMPTY_SCHEDULE);

    recorder(&temp).passes().stdout_eq("");
    assert!(!temp.join("schedule.json.lock").exists());
}

#[test]
fn verbose_reports_working_parameters() {
    let temp = Project::with_guide();
    temp.file("schedule.json", EMPTY_SCHEDULE);

    recorder(&temp)
        .args(&["-v", "--period", "500ms"])
        .passes()
        .stderr_has("working parameters")
        .stderr_has("period=500ms");
}

#[test]
fn missing_schedule_is_fatal() {
    let temp = Project::with_guide();

    recorder(&temp)
        .fails()
        .stderr_has("cannot read schedule");
}

#[test]
fn missing_channel_map_is_fatal() {
    let temp = Project::with_guide();
    temp.file("schedule.json", EMPTY_SCHEDULE);

    temp.dvrd()
        .path_arg("--schedule", "schedule.json")
        .path_arg("--channels", "nowhere.txt")
        .path_arg("--recordings-dir", "recordings")
        .fails()
        .stderr_has("cannot read channel map");
}

#[test]
fn missing_recordings_dir_is_fatal() {
    let temp = Project::with_guide();
    temp.file("schedule.json", EMPTY_SCHEDULE);

    temp.dvrd()
        .path_arg("--schedule", "schedule.json")
        .path_arg("--channels", "channels-dvb.txt")
        .path_arg("--recordings-dir", "nowhere")
        .fails()
        .stderr_has("does not exist");
}

#[test]
fn zero_period_is_fatal() {
    let temp = Project::with_guide();
    temp.file("schedule.json", EMPTY_SCHEDULE);

    recorder(&temp)
        .args(&["--period", "0"])
        .fails()
        .stderr_has("sampling period");
}

#[test]
fn sub_millisecond_period_is_fatal() {
    let temp = Project::with_guide();
    temp.file("schedule.json", EMPTY_SCHEDULE);

    recorder(&temp)
        .args(&["--period", "0.0001"])
        .fails()
        .stderr_has("sampling period must be at least 1ms");
}

#[test]
fn capture_failure_is_silent_without_verbose() {
    let temp = Project::with_guide();
    temp.file("schedule.json", &schedule_due_now(1, 60));

    // Capture output goes to a directory that does not exist
    recorder(&temp)
        .args(&["--output-template", "missing/{{ timestamp }}.ts"])
        .passes()
        .stdout_eq("")
        .stderr_eq("");
    assert_eq!(temp.read("schedule.json"), EMPTY_SCHEDULE);
}

#[test]
fn capture_failure_is_reported_when_verbose() {
    let temp = Project::with_guide();
    temp.file("schedule.json", &schedule_due_now(1, 60));

    recorder(&temp)
        .args(&["-v", "--output-template", "missing/{{ timestamp }}.ts"])
        .passes()
        .stderr_has("capture did not start");
}

#[test]
fn stale_entry_is_purged_silently() {
    let temp = Project::with_guide();
    temp.file("schedule.json", &schedule_due_now(3600, 60));

    recorder(&temp).passes().stderr_eq("");
    assert_eq!(temp.read("schedule.json"), EMPTY_SCHEDULE);
}

#[test]
fn config_file_supplies_settings() {
    let temp = Project::with_guide();
    temp.file("schedule.json", EMPTY_SCHEDULE);
    temp.file(
        "config/dvr/dvrd.toml",
        &format!(
            "schedule = {:?}\nchannels = {:?}\nrecordings_dir = {:?}\n",
            temp.join("schedule.json"),
            temp.join("channels-dvb.txt"),
            temp.join("recordings"),
        ),
    );

    temp.dvrd().passes();
}

#[test]
fn unknown_config_key_is_fatal() {
    let temp = Project::with_guide();
    temp.file("dvrd.toml", "tuners = 2\n");

    recorder(&temp)
        .path_arg("--config", "dvrd.toml")
        .fails()
        .stderr_has("invalid config");
}
