// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory schedule store for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use crate::store::{ScheduleStore, StoreError};
use dvr_core::Schedule;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct MemoryState {
    schedule: Schedule,
    persist_count: usize,
    fail_loads: usize,
}

/// Shared in-memory store.
///
/// Clones share state, so a test can mutate the schedule behind the
/// controller's back the way an external editor would.
#[derive(Debug, Clone, Default)]
pub struct MemoryScheduleStore {
    inner: Arc<Mutex<MemoryState>>,
}

impl MemoryScheduleStore {
    pub fn new(schedule: Schedule) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MemoryState {
                schedule,
                ..MemoryState::default()
            })),
        }
    }

    /// Current contents without going through the trait
    pub fn snapshot(&self) -> Schedule {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).schedule.clone()
    }

    /// Overwrite the contents as an external writer
    pub fn replace(&self, schedule: Schedule) {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).schedule = schedule;
    }

    /// Number of persist calls so far
    pub fn persist_count(&self) -> usize {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).persist_count
    }

    /// Make the next `n` loads fail with an IO error
    pub fn fail_next_loads(&self, n: usize) {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).fail_loads = n;
    }
}

impl ScheduleStore for MemoryScheduleStore {
    fn load(&self) -> Result<Schedule, StoreError> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if inner.fail_loads > 0 {
            inner.fail_loads -= 1;
            return Err(StoreError::Io {
                path: "memory".into(),
                source: std::io::Error::other("injected load failure"),
            });
        }
        Ok(inner.schedule.clone())
    }

    fn persist(&self, schedule: &Schedule) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.schedule = schedule.clone();
        inner.persist_count += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
