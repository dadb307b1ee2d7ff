// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Schedule store boundary

use dvr_core::{Schedule, ScheduleEntry};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur reading or writing the schedule
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("schedule not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed schedule {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Durable home of the accepted schedule.
///
/// The store may be rewritten by another process between calls, so callers
/// load it fresh whenever they need the current contents.
pub trait ScheduleStore: Send + Sync {
    /// Read the current schedule
    fn load(&self) -> Result<Schedule, StoreError>;

    /// Replace the stored schedule
    fn persist(&self, schedule: &Schedule) -> Result<(), StoreError>;

    /// Drop `entry` from `schedule` and persist the result.
    ///
    /// An entry that is already gone leaves the store untouched.
    fn remove_entry(
        &self,
        schedule: &Schedule,
        entry: &ScheduleEntry,
    ) -> Result<Schedule, StoreError> {
        if !schedule.contains(entry) {
            tracing::debug!(channel = %entry.channel, title = %entry.title, "entry already removed");
            return Ok(schedule.clone());
        }
        let remaining = schedule.without(entry);
        self.persist(&remaining)?;
        Ok(remaining)
    }
}
