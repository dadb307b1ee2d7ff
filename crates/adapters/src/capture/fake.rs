// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake capture adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{CaptureAdapter, CaptureError, CaptureHandle};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Recorded capture call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureCall {
    Start {
        channel: String,
        duration: Duration,
        output: PathBuf,
    },
    IsAlive {
        id: String,
    },
}

/// Fake capture state
#[derive(Debug, Clone)]
pub struct FakeCapture {
    pub channel: String,
    pub duration: Duration,
    pub output: PathBuf,
    pub alive: bool,
    /// Liveness checks answered `true` before the capture exits on its own
    pub polls_left: Option<u32>,
}

#[derive(Debug, Default)]
struct FakeConfig {
    polls_alive: Option<u32>,
    fail_starts: bool,
}

/// Fake capture adapter for testing.
///
/// Captures stay alive until [`set_exited`](Self::set_exited) unless
/// [`exit_after_polls`](Self::exit_after_polls) was set.
#[derive(Clone, Default)]
pub struct FakeCaptureAdapter {
    captures: Arc<Mutex<HashMap<String, FakeCapture>>>,
    calls: Arc<Mutex<Vec<CaptureCall>>>,
    config: Arc<Mutex<FakeConfig>>,
    next_id: Arc<Mutex<u64>>,
}

impl FakeCaptureAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<CaptureCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Only the start calls
    pub fn starts(&self) -> Vec<CaptureCall> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, CaptureCall::Start { .. }))
            .collect()
    }

    /// Get a capture by ID
    pub fn get_capture(&self, id: &str) -> Option<FakeCapture> {
        self.captures
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(id)
            .cloned()
    }

    /// Captures started from now on exit after `polls` liveness checks
    pub fn exit_after_polls(&self, polls: u32) {
        self.config
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .polls_alive = Some(polls);
    }

    /// Make every start fail
    pub fn fail_starts(&self, fail: bool) {
        self.config
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .fail_starts = fail;
    }

    /// Mark a capture as exited
    pub fn set_exited(&self, id: &str) {
        if let Some(capture) = self
            .captures
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get_mut(id)
        {
            capture.alive = false;
        }
    }
}

#[async_trait]
impl CaptureAdapter for FakeCaptureAdapter {
    async fn start(
        &self,
        channel: &str,
        duration: Duration,
        output: &Path,
    ) -> Result<CaptureHandle, CaptureError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(CaptureCall::Start {
                channel: channel.to_string(),
                duration,
                output: output.to_path_buf(),
            });

        let (polls_alive, fail) = {
            let config = self.config.lock().unwrap_or_else(|e| e.into_inner());
            (config.polls_alive, config.fail_starts)
        };
        if fail {
            return Err(CaptureError::SpawnFailed("fake start failure".to_string()));
        }

        let id = {
            let mut next = self.next_id.lock().unwrap_or_else(|e| e.into_inner());
            *next += 1;
            format!("fake-{}", *next)
        };

        self.captures
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(
                id.clone(),
                FakeCapture {
                    channel: channel.to_string(),
                    duration,
                    output: output.to_path_buf(),
                    alive: true,
                    polls_left: polls_alive,
                },
            );

        Ok(CaptureHandle {
            id,
            channel: channel.to_string(),
            output: output.to_path_buf(),
        })
    }

    async fn is_alive(&self, handle: &CaptureHandle) -> Result<bool, CaptureError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(CaptureCall::IsAlive {
                id: handle.id.clone(),
            });

        let mut captures = self.captures.lock().unwrap_or_else(|e| e.into_inner());
        let Some(capture) = captures.get_mut(&handle.id) else {
            return Ok(false);
        };

        if let Some(left) = capture.polls_left.as_mut() {
            if *left == 0 {
                capture.alive = false;
            } else {
                *left -= 1;
            }
        }
        Ok(capture.alive)
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
