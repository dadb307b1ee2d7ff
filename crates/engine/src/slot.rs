// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The single tuner slot

use crate::RuntimeError;
use dvr_adapters::CaptureHandle;
use dvr_core::ScheduleEntry;

/// A capture that holds the tuner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveCapture {
    pub entry: ScheduleEntry,
    pub handle: CaptureHandle,
}

/// Holds at most one active capture.
///
/// The entry and handle live here rather than in the store, which may
/// lose the entry to an external edit while the capture is running.
#[derive(Debug, Default)]
pub struct CaptureSlot {
    current: Option<ActiveCapture>,
}

impl CaptureSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_free(&self) -> bool {
        self.current.is_none()
    }

    pub fn current(&self) -> Option<&ActiveCapture> {
        self.current.as_ref()
    }

    /// Claim the tuner. Fails if another capture still holds it.
    pub fn occupy(&mut self, capture: ActiveCapture) -> Result<(), RuntimeError> {
        if let Some(held) = &self.current {
            return Err(RuntimeError::TunerBusy {
                channel: held.entry.channel.clone(),
                title: held.entry.title.clone(),
            });
        }
        self.current = Some(capture);
        Ok(())
    }

    /// Release the tuner
    pub fn take(&mut self) -> Option<ActiveCapture> {
        self.current.take()
    }
}

#[cfg(test)]
#[path = "slot_tests.rs"]
mod tests;
