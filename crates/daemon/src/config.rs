// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recorder configuration
//!
//! Settings come from an optional TOML file, then command-line flags
//! override them, then built-in defaults fill the rest.

use crate::lifecycle::LifecycleError;
use clap::Parser;
use dvr_core::{Timing, DEFAULT_CAPTURE_TEMPLATE, DEFAULT_OVERRUN_MARGIN, DEFAULT_PERIOD};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Directory the guide and schedule live in
pub const DEFAULT_GUIDE_DIR: &str = "/home/control/Public/www";
/// Schedule file name inside the guide directory
pub const DEFAULT_SCHEDULE: &str = "schedule.json";
pub const DEFAULT_RECORDINGS_DIR: &str = "/media/storage/recordings";
pub const DEFAULT_CHANNELS: &str = "/home/control/Public/www/channels-dvb.txt";
pub const DEFAULT_ADAPTER: &str = "1";
/// Log level of `--log-file` when RUST_LOG is unset
pub const FILE_LOG_LEVEL: &str = "info";

/// Command-line arguments for dvrd
#[derive(Debug, Default, Parser)]
#[command(name = "dvrd", version, about = "Record scheduled programmes from a DVB tuner")]
pub struct Args {
    /// Schedule file; a bare name is looked up in the guide directory
    #[arg(short, long)]
    pub schedule: Option<PathBuf>,

    /// Directory captures and transcodes are written to
    #[arg(short, long)]
    pub recordings_dir: Option<PathBuf>,

    /// Capture file name template (minijinja: timestamp, channel, title)
    #[arg(short, long)]
    pub output_template: Option<String>,

    /// dvbv5 channel map
    #[arg(short, long)]
    pub channels: Option<PathBuf>,

    /// DVB adapter number
    #[arg(short, long)]
    pub adapter: Option<String>,

    /// Sampling period, in seconds or as a duration like "500ms"
    #[arg(short, long, value_parser = parse_duration)]
    pub period: Option<Duration>,

    /// How long past its start an uncaptured entry is kept
    #[arg(short = 'm', long, value_parser = parse_duration)]
    pub overrun_margin: Option<Duration>,

    /// Configuration file (default: <config dir>/dvr/dvrd.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report state changes and countdowns
    #[arg(short, long)]
    pub verbose: bool,

    /// Also write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Settings read from the configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub schedule: Option<PathBuf>,
    pub recordings_dir: Option<PathBuf>,
    pub output_template: Option<String>,
    pub channels: Option<PathBuf>,
    pub adapter: Option<String>,
    #[serde(with = "humantime_serde")]
    pub period: Option<Duration>,
    #[serde(with = "humantime_serde")]
    pub overrun_margin: Option<Duration>,
    pub verbose: Option<bool>,
    pub log_file: Option<PathBuf>,
}

impl FileConfig {
    pub fn parse(content: &str, path: &Path) -> Result<Self, LifecycleError> {
        toml::from_str(content).map_err(|source| LifecycleError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read `path`, or the default location when none is given.
    ///
    /// A missing default file means no file settings; a missing explicit
    /// file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, LifecycleError> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match default_config_path() {
                Some(p) => (p, false),
                None => return Ok(Self::default()),
            },
        };

        match std::fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content, &path),
            Err(e) if !explicit && e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(LifecycleError::ConfigRead { path, source }),
        }
    }
}

/// Resolved recorder configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub schedule_path: PathBuf,
    /// Held for the process lifetime so two recorders never share a schedule
    pub lock_path: PathBuf,
    pub recordings_dir: PathBuf,
    pub output_template: String,
    pub channels: PathBuf,
    pub adapter: String,
    pub timing: Timing,
    pub verbose: bool,
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Load the configuration file named by `args` and apply the flags
    pub fn load(args: Args) -> Result<Self, LifecycleError> {
        let file = FileConfig::load(args.config.as_deref())?;
        Ok(Self::resolve(args, file))
    }

    /// Merge flags over file settings over defaults
    pub fn resolve(args: Args, file: FileConfig) -> Self {
        let schedule = args
            .schedule
            .or(file.schedule)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SCHEDULE));
        let schedule_path = resolve_schedule(&schedule);
        let lock_path = lock_path_for(&schedule_path);

        Self {
            schedule_path,
            lock_path,
            recordings_dir: args
                .recordings_dir
                .or(file.recordings_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_RECORDINGS_DIR)),
            output_template: args
                .output_template
                .or(file.output_template)
                .unwrap_or_else(|| DEFAULT_CAPTURE_TEMPLATE.to_string()),
            channels: args
                .channels
                .or(file.channels)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CHANNELS)),
            adapter: args
                .adapter
                .or(file.adapter)
                .unwrap_or_else(|| DEFAULT_ADAPTER.to_string()),
            timing: Timing {
                period: args.period.or(file.period).unwrap_or(DEFAULT_PERIOD),
                overrun_margin: args
                    .overrun_margin
                    .or(file.overrun_margin)
                    .unwrap_or(DEFAULT_OVERRUN_MARGIN),
            },
            verbose: args.verbose || file.verbose.unwrap_or(false),
            log_file: args.log_file.or(file.log_file),
        }
    }
}

impl Config {
    /// Console log level when RUST_LOG is unset.
    ///
    /// Runtime failures stay off the console unless verbose; fatal
    /// configuration errors are reported by `main` directly.
    pub fn console_log_level(&self) -> &'static str {
        if self.verbose {
            "info"
        } else {
            "off"
        }
    }
}

/// A bare file name lives in the guide directory
pub fn resolve_schedule(schedule: &Path) -> PathBuf {
    if schedule.components().count() == 1 && !schedule.has_root() {
        Path::new(DEFAULT_GUIDE_DIR).join(schedule)
    } else {
        schedule.to_path_buf()
    }
}

fn lock_path_for(schedule: &Path) -> PathBuf {
    let mut name = schedule.as_os_str().to_owned();
    name.push(".lock");
    PathBuf::from(name)
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("dvr").join("dvrd.toml"))
}

/// Seconds as a plain number, or a humantime duration
fn parse_duration(value: &str) -> Result<Duration, String> {
    if let Ok(secs) = value.parse::<f64>() {
        return Duration::try_from_secs_f64(secs).map_err(|e| e.to_string());
    }
    humantime::parse_duration(value).map_err(|e| e.to_string())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
