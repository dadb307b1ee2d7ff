// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::capture::{CaptureAdapter, CaptureError, CaptureHandle};
use crate::postprocess::{PostProcessAdapter, PostProcessError};
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use tracing::Instrument;

/// Wrapper that adds tracing to any CaptureAdapter
#[derive(Clone)]
pub struct TracedCaptureAdapter<C> {
    inner: C,
}

impl<C> TracedCaptureAdapter<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<C: CaptureAdapter> CaptureAdapter for TracedCaptureAdapter<C> {
    async fn start(
        &self,
        channel: &str,
        duration: Duration,
        output: &Path,
    ) -> Result<CaptureHandle, CaptureError> {
        let span = tracing::info_span!("capture.start", channel, output = %output.display());

        async {
            tracing::info!(duration_secs = duration.as_secs(), "starting");

            // Precondition: output directory must exist
            if let Some(parent) = output.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    tracing::error!(parent = %parent.display(), "output directory does not exist");
                    return Err(CaptureError::SpawnFailed(format!(
                        "output directory does not exist: {}",
                        parent.display()
                    )));
                }
            }

            let start = std::time::Instant::now();
            let result = self.inner.start(channel, duration, output).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(handle) => tracing::info!(
                    handle = %handle.id,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "capture started"
                ),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "start failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }

    async fn is_alive(&self, handle: &CaptureHandle) -> Result<bool, CaptureError> {
        let result = self.inner.is_alive(handle).await;
        match &result {
            Ok(alive) => tracing::trace!(handle = %handle.id, alive, "checked"),
            Err(e) => tracing::warn!(handle = %handle.id, error = %e, "liveness check failed"),
        }
        result
    }
}

/// Wrapper that adds tracing to any PostProcessAdapter
#[derive(Clone)]
pub struct TracedPostProcessAdapter<P> {
    inner: P,
}

impl<P> TracedPostProcessAdapter<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<P: PostProcessAdapter> PostProcessAdapter for TracedPostProcessAdapter<P> {
    async fn process(
        &self,
        input: &Path,
        output: &Path,
        title: &str,
    ) -> Result<(), PostProcessError> {
        let span = tracing::info_span!(
            "postprocess",
            title,
            input = %input.display(),
            output = %output.display()
        );

        async {
            tracing::info!("starting");

            let start = std::time::Instant::now();
            let result = self.inner.process(input, output, title).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(()) => tracing::info!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    "post-processing finished"
                ),
                Err(e) => tracing::warn!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "post-processing failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
