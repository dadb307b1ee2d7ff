// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! dvr - schedule tooling for the recorder

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{guide, schedule};

#[derive(Parser)]
#[command(
    name = "dvr",
    version,
    about = "Build and inspect the recording schedule"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Schedule management
    Schedule(schedule::ScheduleArgs),
    /// Programme guide listings
    Guide(guide::GuideArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Warnings (skipped guide files) go to stderr; RUST_LOG overrides
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Schedule(args) => schedule::run(args),
        Commands::Guide(args) => guide::run(args),
    }
}
