// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON file schedule store

use crate::store::{ScheduleStore, StoreError};
use dvr_core::Schedule;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Schedule kept in a single JSON file, rewritten whole on every persist
#[derive(Debug, Clone)]
pub struct JsonScheduleStore {
    path: PathBuf,
}

impl JsonScheduleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl ScheduleStore for JsonScheduleStore {
    fn load(&self) -> Result<Schedule, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(self.path.clone()))
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let schedule: Schedule =
            serde_json::from_str(&content).map_err(|source| StoreError::Json {
                path: self.path.clone(),
                source,
            })?;

        let conflicts = schedule.conflicts();
        if !conflicts.is_empty() {
            tracing::warn!(
                path = %self.path.display(),
                conflicts = conflicts.len(),
                "stored schedule has overlapping entries"
            );
        }
        Ok(schedule)
    }

    fn persist(&self, schedule: &Schedule) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(schedule).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;

        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(parent).map_err(|e| self.io_error(e))?;
        tmp.write_all(json.as_bytes())
            .map_err(|e| self.io_error(e))?;
        tmp.write_all(b"\n").map_err(|e| self.io_error(e))?;
        tmp.persist(&self.path)
            .map_err(|e| self.io_error(e.error))?;

        tracing::debug!(path = %self.path.display(), entries = schedule.len(), "schedule persisted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
