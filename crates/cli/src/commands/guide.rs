// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Guide commands

use anyhow::Result;
use clap::{Args, Subcommand};
use dvr_core::ProgrammeInterval;
use dvr_storage::load_guide;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use super::schedule::DEFAULT_GUIDE_DIR;
use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct GuideArgs {
    #[command(subcommand)]
    pub command: GuideCommand,
}

#[derive(Subcommand)]
pub enum GuideCommand {
    /// List a channel's programmes in start order
    Show {
        /// Channel name as it appears in the guide
        #[arg(default_value = "Arte")]
        channel: String,
        /// Guide directory
        #[arg(long, default_value = DEFAULT_GUIDE_DIR)]
        guide: PathBuf,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
}

/// One guide programme, shown as its time slot over an indented title
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Listing(pub ProgrammeInterval);

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let programme = &self.0;
        let minutes = programme.duration().num_minutes();
        write!(
            f,
            "{} - {} ({}:{:02})\n  {}",
            programme.start.format("%d %b %H:%M"),
            programme.stop.format("%H:%M"),
            minutes / 60,
            minutes % 60,
            programme.title
        )
    }
}

/// Programmes on `channel`, earliest first
pub fn listing(guide: &Path, channel: &str) -> Result<Vec<Listing>> {
    let guide = load_guide(guide)?;
    let mut programmes: Vec<_> = guide
        .programmes
        .into_iter()
        .filter(|p| p.channel == channel)
        .collect();
    programmes.sort_by_key(|p| p.start);
    Ok(programmes.into_iter().map(Listing).collect())
}

pub fn run(args: GuideArgs) -> Result<()> {
    match args.command {
        GuideCommand::Show {
            channel,
            guide,
            format,
        } => {
            let programmes = listing(&guide, &channel)?;
            output::print_list(
                &programmes,
                format,
                &format!("No programmes for {}", channel),
            );
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "guide_tests.rs"]
mod tests;
