// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tuner capture adapters

mod zap;

pub use zap::ZapCaptureAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{CaptureCall, FakeCapture, FakeCaptureAdapter};

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors from capture operations
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("capture failed to start: {0}")]
    SpawnFailed(String),
    #[error("command failed: {0}")]
    CommandFailed(String),
}

/// A capture in flight and the artifact it writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureHandle {
    pub id: String,
    pub channel: String,
    pub output: PathBuf,
}

/// Adapter for the process that tunes and records a channel.
///
/// A capture runs for a bounded duration and exits on its own; there is
/// no stop operation.
#[async_trait]
pub trait CaptureAdapter: Clone + Send + Sync + 'static {
    /// Start recording `channel` into `output` for `duration`
    async fn start(
        &self,
        channel: &str,
        duration: Duration,
        output: &Path,
    ) -> Result<CaptureHandle, CaptureError>;

    /// Whether the capture process is still running
    async fn is_alive(&self, handle: &CaptureHandle) -> Result<bool, CaptureError>;
}
