// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Post-processing adapters

mod ffmpeg;

pub use ffmpeg::FfmpegAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakePostProcessAdapter, PostProcessCall};

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Errors from post-processing
#[derive(Debug, Error)]
pub enum PostProcessError {
    #[error("post-processing failed to start: {0}")]
    SpawnFailed(String),
    #[error("post-processing failed: {0}")]
    Failed(String),
}

/// Adapter for converting a captured artifact into its final format
#[async_trait]
pub trait PostProcessAdapter: Clone + Send + Sync + 'static {
    /// Convert `input` into `output`, tagged with the programme title
    async fn process(&self, input: &Path, output: &Path, title: &str)
        -> Result<(), PostProcessError>;
}
