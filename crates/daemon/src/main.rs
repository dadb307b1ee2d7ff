// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recorder daemon (dvrd)
//!
//! Follows the schedule file, capturing each entry in turn, and exits once
//! the schedule is empty.

use clap::Parser;
use std::io::IsTerminal;
use std::process::ExitCode;
use tokio::signal::unix::{signal, SignalKind};
use tracing::info;

use dvr_daemon::config::FILE_LOG_LEVEL;
use dvr_daemon::{lifecycle, Args, Config, LifecycleError};

#[tokio::main]
async fn main() -> ExitCode {
    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("dvrd: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(args)?;

    // Set up logging
    let _log_guard = setup_logging(&config)?;

    if config.verbose {
        log_parameters(&config);
    }

    // Start recorder
    let mut daemon = lifecycle::startup(&config)?;

    // Set up signal handlers
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    let shutdown = async move {
        tokio::select! {
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
            _ = sigint.recv() => info!("Received SIGINT, shutting down..."),
        }
    };

    let outcome = daemon.recorder.run_until(shutdown).await;
    info!(?outcome, "recorder loop finished");

    daemon.shutdown();
    Ok(())
}

fn log_parameters(config: &Config) {
    info!(
        schedule = %config.schedule_path.display(),
        recordings = %config.recordings_dir.display(),
        template = %config.output_template,
        channels = %config.channels.display(),
        adapter = %config.adapter,
        period = %humantime::format_duration(config.timing.period),
        overrun_margin = %humantime::format_duration(config.timing.overrun_margin),
        "working parameters"
    );
}

fn setup_logging(
    config: &Config,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>, LifecycleError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // RUST_LOG overrides the per-layer defaults
    let filter = |default_level: &str| {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };

    let stderr_layer = fmt::layer()
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .with_filter(filter(config.console_log_level()));

    // Optional file appender
    let (file_layer, guard) = match &config.log_file {
        Some(path) => {
            let dir = match path.parent() {
                Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
                _ => std::path::PathBuf::from("."),
            };
            std::fs::create_dir_all(&dir)?;
            let file_name = path.file_name().ok_or_else(|| {
                LifecycleError::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("log file has no name: {}", path.display()),
                ))
            })?;
            let file_appender = tracing_appender::rolling::never(dir, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            (
                Some(
                    fmt::layer()
                        .with_ansi(false)
                        .with_writer(non_blocking)
                        .with_filter(filter(FILE_LOG_LEVEL)),
                ),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}
