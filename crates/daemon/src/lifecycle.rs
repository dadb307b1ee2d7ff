// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: validation, startup, shutdown.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use dvr_adapters::{
    FfmpegAdapter, TracedCaptureAdapter, TracedPostProcessAdapter, ZapCaptureAdapter,
};
use dvr_core::{ArtifactNamer, NamingError, SystemClock};
use dvr_engine::{Recorder, RecorderConfig, RecorderDeps, DEFAULT_EXIT_POLL_INTERVAL};
use dvr_storage::JsonScheduleStore;
use fs2::FileExt;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;

/// Shortest sampling period; the controller works in whole milliseconds
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Recorder with concrete adapter types (wrapped with tracing)
pub type DaemonRecorder = Recorder<
    JsonScheduleStore,
    TracedCaptureAdapter<ZapCaptureAdapter>,
    TracedPostProcessAdapter<FfmpegAdapter>,
    SystemClock,
>;

/// Daemon state during operation
pub struct DaemonState {
    pub config: Config,
    // NOTE(lifetime): Held to maintain exclusive file lock; released on drop
    #[allow(dead_code)]
    lock_file: File,
    pub recorder: DaemonRecorder,
}

impl DaemonState {
    /// Release the tuner lock
    pub fn shutdown(self) {
        if self.config.lock_path.exists() {
            if let Err(e) = std::fs::remove_file(&self.config.lock_path) {
                warn!("Failed to remove lock file: {}", e);
            }
        }
        info!("Recorder stopped");
    }
}

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("cannot read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("cannot read schedule {path}: {source}")]
    ScheduleUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read channel map {path}: {source}")]
    ChannelsUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("recordings directory {0} does not exist")]
    RecordingsDirMissing(PathBuf),

    #[error("sampling period must be at least {}ms", MIN_PERIOD.as_millis())]
    InvalidPeriod,

    #[error("output template: {0}")]
    Template(#[from] NamingError),

    #[error("failed to acquire {0}: recorder already running?")]
    LockFailed(PathBuf, #[source] std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Check the configuration before touching the tuner
pub fn validate(config: &Config) -> Result<(), LifecycleError> {
    if config.timing.period < MIN_PERIOD {
        return Err(LifecycleError::InvalidPeriod);
    }
    File::open(&config.schedule_path).map_err(|source| LifecycleError::ScheduleUnreadable {
        path: config.schedule_path.clone(),
        source,
    })?;
    File::open(&config.channels).map_err(|source| LifecycleError::ChannelsUnreadable {
        path: config.channels.clone(),
        source,
    })?;
    if !config.recordings_dir.is_dir() {
        return Err(LifecycleError::RecordingsDirMissing(
            config.recordings_dir.clone(),
        ));
    }
    Ok(())
}

/// Validate, take the tuner lock and build the recorder
pub fn startup(config: &Config) -> Result<DaemonState, LifecycleError> {
    // 1. Fail fast on configuration errors
    validate(config)?;
    let namer = ArtifactNamer::new(&config.recordings_dir, &config.output_template)?;

    // 2. Acquire lock file
    let mut lock_file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&config.lock_path)?;
    lock_file
        .try_lock_exclusive()
        .map_err(|e| LifecycleError::LockFailed(config.lock_path.clone(), e))?;
    lock_file.set_len(0)?;
    writeln!(lock_file, "{}", std::process::id())?;

    // 3. Set up adapters (wrapped with tracing for observability)
    let capture = TracedCaptureAdapter::new(ZapCaptureAdapter::new(
        &config.channels,
        config.adapter.clone(),
    ));
    let postprocess = TracedPostProcessAdapter::new(FfmpegAdapter::new());
    let store = JsonScheduleStore::new(&config.schedule_path);

    // 4. Create recorder
    let recorder = Recorder::new(
        RecorderDeps {
            store,
            capture,
            postprocess,
        },
        SystemClock,
        RecorderConfig {
            timing: config.timing,
            exit_poll_interval: DEFAULT_EXIT_POLL_INTERVAL,
            namer,
        },
    );

    info!(schedule = %config.schedule_path.display(), "Recorder started");

    Ok(DaemonState {
        config: config.clone(),
        lock_file,
        recorder,
    })
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
