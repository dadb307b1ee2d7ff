// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Schedule commands

use anyhow::{bail, Context, Result};
use chrono::{DateTime, FixedOffset};
use clap::{Args, Subcommand};
use dvr_core::{resolve_detailed, timestamp, Rejection, Schedule, ScheduleEntry};
use dvr_storage::{load_guide, JsonScheduleStore, ScheduleStore, StoreError};
use std::path::{Path, PathBuf};

use crate::output::{self, OutputFormat};

/// Directory the guide files are published to
pub const DEFAULT_GUIDE_DIR: &str = "/home/control/Public/www";
pub const DEFAULT_SCHEDULE: &str = "/home/control/Public/www/schedule.json";

const EMPTY: &str = "No recordings scheduled";

#[derive(Args)]
pub struct ScheduleArgs {
    #[command(subcommand)]
    pub command: ScheduleCommand,
}

#[derive(Subcommand)]
pub enum ScheduleCommand {
    /// Match the rules against the guide and write a new schedule
    Build {
        /// Rule set (default: <config dir>/dvr/rules.toml)
        #[arg(long)]
        rules: Option<PathBuf>,
        /// Guide directory
        #[arg(long, default_value = DEFAULT_GUIDE_DIR)]
        guide: PathBuf,
        /// Schedule file to write
        #[arg(long, default_value = DEFAULT_SCHEDULE)]
        schedule: PathBuf,
        /// Also list programmes turned away for an occupied slot
        #[arg(short, long)]
        verbose: bool,
    },
    /// Print the stored schedule
    Show {
        #[arg(long, default_value = DEFAULT_SCHEDULE)]
        schedule: PathBuf,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Remove the entry starting at the given time
    Remove {
        /// Start time as stored, e.g. "20261016203000 +0200"
        #[arg(long, value_parser = parse_start)]
        start: DateTime<FixedOffset>,
        #[arg(long, default_value = DEFAULT_SCHEDULE)]
        schedule: PathBuf,
    },
}

fn parse_start(s: &str) -> Result<DateTime<FixedOffset>, String> {
    timestamp::parse(s).map_err(|e| format!("expected YYYYMMDDhhmmss +hhmm: {}", e))
}

/// What a build produced
#[derive(Debug)]
pub struct BuildReport {
    pub schedule: Schedule,
    pub rejected: Vec<Rejection>,
    /// Guide files skipped as unreadable
    pub skipped_files: Vec<PathBuf>,
    /// Guide programmes dropped for an invalid interval
    pub invalid: usize,
}

/// Match `rules` against the guide, resolve and persist the result
pub fn build(rules: &Path, guide: &Path, store: &dyn ScheduleStore) -> Result<BuildReport> {
    let rules = dvr_rules::load_rules(rules)
        .with_context(|| format!("loading rules from {}", rules.display()))?;
    let guide = load_guide(guide)?;

    let candidates = rules.candidates(&guide.programmes);
    tracing::info!(
        rules = rules.len(),
        programmes = guide.programmes.len(),
        candidates = candidates.len(),
        "matched guide"
    );

    let resolution = resolve_detailed(&candidates)?;
    store.persist(&resolution.schedule)?;

    Ok(BuildReport {
        schedule: resolution.schedule,
        rejected: resolution.rejected,
        skipped_files: guide.skipped_files,
        invalid: guide.invalid.len(),
    })
}

/// Stored entries; a schedule that was never written is empty
pub fn entries(store: &dyn ScheduleStore) -> Result<Vec<ScheduleEntry>> {
    match store.load() {
        Ok(schedule) => Ok(schedule.into_entries()),
        Err(StoreError::NotFound(_)) => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

/// Remove the first entry starting at `start`
pub fn remove(store: &dyn ScheduleStore, start: &DateTime<FixedOffset>) -> Result<ScheduleEntry> {
    let schedule = store.load()?;
    let Some(entry) = schedule.iter().find(|e| e.start == *start).cloned() else {
        bail!("no recording starts at {}", timestamp::format(start));
    };
    store.remove_entry(&schedule, &entry)?;
    Ok(entry)
}

pub fn run(args: ScheduleArgs) -> Result<()> {
    match args.command {
        ScheduleCommand::Build {
            rules,
            guide,
            schedule,
            verbose,
        } => {
            let rules = match rules {
                Some(path) => path,
                None => default_rules_path()?,
            };
            let store = JsonScheduleStore::new(schedule);
            let report = build(&rules, &guide, &store)?;

            output::print_list(report.schedule.entries(), OutputFormat::Text, EMPTY);
            if verbose {
                for rejection in &report.rejected {
                    println!(
                        "Occupied: {} (by {})",
                        ScheduleEntry::from(rejection.candidate.clone()),
                        rejection.occupied_by.title
                    );
                }
                for path in &report.skipped_files {
                    println!("Skipped: {}", path.display());
                }
                if report.invalid > 0 {
                    println!("Invalid programmes: {}", report.invalid);
                }
            }
        }

        ScheduleCommand::Show { schedule, format } => {
            let store = JsonScheduleStore::new(schedule);
            output::print_list(&entries(&store)?, format, EMPTY);
        }

        ScheduleCommand::Remove { start, schedule } => {
            let store = JsonScheduleStore::new(schedule);
            let entry = remove(&store, &start)?;
            println!("Removed: {}", entry);
        }
    }

    Ok(())
}

fn default_rules_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("dvr").join("rules.toml"))
        .context("no configuration directory; pass --rules")
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;
