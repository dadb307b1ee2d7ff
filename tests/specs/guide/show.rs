//! `dvr guide show` lists one channel's programmes

use crate::prelude::*;

#[test]
fn shows_arte_by_default() {
    let temp = Project::with_guide();

    temp.dvr()
        .args(&["guide", "show"])
        .path_arg("--guide", "guide")
        .passes()
        .stdout_eq(
            "16 Oct 20:00 - 20:30 (0:30)\n  Journal\n16 Oct 21:00 - 22:00 (1:00)\n  Documentaire\n",
        );
}

#[test]
fn shows_the_named_channel() {
    let temp = Project::with_guide();

    temp.dvr()
        .args(&["guide", "show", "TF1"])
        .path_arg("--guide", "guide")
        .passes()
        .stdout_eq("16 Oct 20:15 - 22:00 (1:45)\n  Film\n");
}

#[test]
fn unknown_channel_says_so() {
    let temp = Project::with_guide();

    temp.dvr()
        .args(&["guide", "show", "France 5"])
        .path_arg("--guide", "guide")
        .passes()
        .stdout_eq("No programmes for France 5\n");
}

#[test]
fn json_output_lists_programmes() {
    let temp = Project::with_guide();

    temp.dvr()
        .args(&["guide", "show", "M6", "--format", "json"])
        .path_arg("--guide", "guide")
        .passes()
        .stdout_has(r#""title": "Film""#)
        .stdout_has(r#""start": "20261016220000 +0200""#);
}
