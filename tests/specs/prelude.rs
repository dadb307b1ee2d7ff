//! Shared fixtures for the behavioral specs
//!
//! A [`Project`] is a scratch directory holding a guide, a rule set, a
//! channel map and a recordings directory. Commands run with their
//! configuration directory pointed inside it so a developer's own
//! settings never leak into a spec.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Output;
use tempfile::TempDir;

pub const RULES: &str = r#"
[[rule]]
channel = "Arte"
title = { contains = "Journal" }

[[rule]]
title = "Film"
"#;

pub const GUIDE: &str = r#"{
  "programmes": [
    {"channel": "Arte", "title": "Journal", "start": "20261016200000 +0200", "stop": "20261016203000 +0200"},
    {"channel": "TF1", "title": "Film", "start": "20261016201500 +0200", "stop": "20261016220000 +0200"},
    {"channel": "M6", "title": "Film", "start": "20261016220000 +0200", "stop": "20261016233000 +0200"},
    {"channel": "Arte", "title": "Documentaire", "start": "20261016210000 +0200", "stop": "20261016220000 +0200"}
  ]
}"#;

/// Schedule holding one entry that opened `started_secs_ago` and runs
/// for `length_secs`, in the persisted timestamp layout
pub fn schedule_due_now(started_secs_ago: i64, length_secs: i64) -> String {
    let now = chrono::Utc::now();
    let start = now - chrono::TimeDelta::seconds(started_secs_ago);
    let stop = start + chrono::TimeDelta::seconds(length_secs);
    format!(
        r#"{{"recordings": [{{"channel": "Arte", "title": "Journal", "start": "{}", "stop": "{}"}}]}}"#,
        start.format("%Y%m%d%H%M%S +0000"),
        stop.format("%Y%m%d%H%M%S +0000"),
    )
}

pub const EMPTY_SCHEDULE: &str = "{\n  \"recordings\": []\n}\n";

pub struct Project {
    dir: TempDir,
}

impl Project {
    /// Scratch directory with nothing in it
    pub fn empty() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("config")).unwrap();
        Self { dir }
    }

    /// Rule set, guide, channel map and recordings directory
    pub fn with_guide() -> Self {
        let project = Self::empty();
        project.file("rules.toml", RULES);
        project.file("guide/tonight.json", GUIDE);
        project.file("channels-dvb.txt", "[Arte]\n");
        fs::create_dir(project.path().join("recordings")).unwrap();
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Write a file, creating parent directories
    pub fn file(&self, rel: &str, content: &str) {
        let path = self.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.join(rel)).unwrap()
    }

    pub fn dvr(&self) -> Cli {
        Cli::new("dvr", self)
    }

    pub fn dvrd(&self) -> Cli {
        Cli::new("dvrd", self)
    }

    /// `dvr schedule build` against this project's rules and guide
    pub fn build_schedule(&self) -> RunAssert {
        self.dvr()
            .args(&["schedule", "build"])
            .path_arg("--rules", "rules.toml")
            .path_arg("--guide", "guide")
            .path_arg("--schedule", "schedule.json")
            .passes()
    }
}

pub struct Cli {
    cmd: assert_cmd::Command,
    root: PathBuf,
}

impl Cli {
    fn new(bin: &str, project: &Project) -> Self {
        let mut cmd = assert_cmd::Command::cargo_bin(bin).unwrap();
        cmd.current_dir(project.path())
            .env("XDG_CONFIG_HOME", project.join("config"))
            .env_remove("RUST_LOG");
        Self {
            cmd,
            root: project.path().to_path_buf(),
        }
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    /// `flag` followed by a path inside the project
    pub fn path_arg(mut self, flag: &str, rel: &str) -> Self {
        self.cmd.arg(flag).arg(self.root.join(rel));
        self
    }

    pub fn passes(mut self) -> RunAssert {
        let output = self.cmd.output().unwrap();
        assert!(
            output.status.success(),
            "expected success, got {}\nstdout:\n{}\nstderr:\n{}",
            output.status,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    pub fn fails(mut self) -> RunAssert {
        let output = self.cmd.output().unwrap();
        assert!(
            !output.status.success(),
            "expected failure\nstdout:\n{}",
            String::from_utf8_lossy(&output.stdout)
        );
        RunAssert { output }
    }
}

pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout(), expected);
        self
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        let stdout = self.stdout();
        assert!(stdout.contains(needle), "stdout lacks {needle:?}:\n{stdout}");
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        let stdout = self.stdout();
        assert!(!stdout.contains(needle), "stdout has {needle:?}:\n{stdout}");
        self
    }

    pub fn stderr_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stderr(), expected);
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        let stderr = self.stderr();
        assert!(stderr.contains(needle), "stderr lacks {needle:?}:\n{stderr}");
        self
    }
}
