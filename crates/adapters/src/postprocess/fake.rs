// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake post-processing adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{PostProcessAdapter, PostProcessError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Recorded post-processing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostProcessCall {
    pub input: PathBuf,
    pub output: PathBuf,
    pub title: String,
}

/// Fake post-processing adapter for testing
#[derive(Clone, Default)]
pub struct FakePostProcessAdapter {
    calls: Arc<Mutex<Vec<PostProcessCall>>>,
    completed: Arc<Mutex<Vec<PostProcessCall>>>,
    fail: Arc<Mutex<bool>>,
    delay: Arc<Mutex<Duration>>,
}

impl FakePostProcessAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded requests
    pub fn calls(&self) -> Vec<PostProcessCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Requests that ran to the end, successfully or not
    pub fn completed(&self) -> Vec<PostProcessCall> {
        self.completed.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Make every request take `delay` before finishing
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap_or_else(|e| e.into_inner()) = delay;
    }

    /// Make every request fail after being recorded
    pub fn set_failing(&self, fail: bool) {
        *self.fail.lock().unwrap_or_else(|e| e.into_inner()) = fail;
    }
}

#[async_trait]
impl PostProcessAdapter for FakePostProcessAdapter {
    async fn process(
        &self,
        input: &Path,
        output: &Path,
        title: &str,
    ) -> Result<(), PostProcessError> {
        let call = PostProcessCall {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            title: title.to_string(),
        };
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call.clone());

        let delay = *self.delay.lock().unwrap_or_else(|e| e.into_inner());
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.completed
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);

        if *self.fail.lock().unwrap_or_else(|e| e.into_inner()) {
            return Err(PostProcessError::Failed("fake failure".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
