// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::capture::FakeCaptureAdapter;
use crate::postprocess::FakePostProcessAdapter;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// A writer that captures log output for testing
#[derive(Clone, Default)]
struct CapturedLogs {
    logs: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    fn new() -> Self {
        Self::default()
    }

    fn contents(&self) -> String {
        let logs = self.logs.lock().unwrap();
        String::from_utf8_lossy(&logs).to_string()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.logs.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run a test with captured tracing output
fn with_tracing<F, Fut>(f: F) -> (String, Fut::Output)
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future,
{
    let logs = CapturedLogs::new();
    let logs_clone = logs.clone();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(logs_clone)
        .with_ansi(false)
        .without_time()
        .finish();

    let result = tracing::subscriber::with_default(subscriber, || {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(f())
    });

    (logs.contents(), result)
}

// =============================================================================
// Precondition validation tests
// =============================================================================

#[tokio::test]
async fn traced_capture_rejects_missing_output_dir() {
    let fake = FakeCaptureAdapter::default();
    let traced = TracedCaptureAdapter::new(fake.clone());

    let result = traced
        .start(
            "Arte",
            Duration::from_secs(3),
            Path::new("/nonexistent/dir/recording.ts"),
        )
        .await;

    let err = result.unwrap_err();
    assert!(
        err.to_string().contains("output directory does not exist"),
        "Expected error about output directory, got: {}",
        err
    );
    // The inner adapter is never reached
    assert!(fake.calls().is_empty());
}

#[tokio::test]
async fn traced_capture_passes_through() {
    let dir = tempfile::tempdir().unwrap();
    let fake = FakeCaptureAdapter::default();
    let traced = TracedCaptureAdapter::new(fake.clone());

    let handle = traced
        .start(
            "Arte",
            Duration::from_secs(3),
            &dir.path().join("recording.ts"),
        )
        .await
        .unwrap();

    assert!(traced.is_alive(&handle).await.unwrap());
    fake.set_exited(&handle.id);
    assert!(!traced.is_alive(&handle).await.unwrap());
}

// =============================================================================
// Tracing output verification tests
// =============================================================================

#[test]
fn traced_capture_start_logs_entry_and_completion() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("recording.ts");

    let (logs, result) = with_tracing(|| async {
        let traced = TracedCaptureAdapter::new(FakeCaptureAdapter::default());
        traced.start("Arte", Duration::from_secs(3), &output).await
    });

    assert!(result.is_ok(), "start should succeed: {:?}", result);
    assert!(
        logs.contains("capture.start"),
        "Should log span name. Logs:\n{}",
        logs
    );
    assert!(
        logs.contains("Arte"),
        "Should log channel. Logs:\n{}",
        logs
    );
    assert!(
        logs.contains("starting"),
        "Should log entry message. Logs:\n{}",
        logs
    );
    assert!(
        logs.contains("capture started"),
        "Should log completion. Logs:\n{}",
        logs
    );
    assert!(
        logs.contains("elapsed_ms"),
        "Should log timing. Logs:\n{}",
        logs
    );
}

#[test]
fn traced_capture_logs_start_failure() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("recording.ts");

    let (logs, result) = with_tracing(|| async {
        let fake = FakeCaptureAdapter::default();
        fake.fail_starts(true);
        TracedCaptureAdapter::new(fake)
            .start("Arte", Duration::from_secs(3), &output)
            .await
    });

    assert!(result.is_err());
    assert!(
        logs.contains("start failed"),
        "Should log failure. Logs:\n{}",
        logs
    );
}

#[test]
fn traced_postprocess_logs_completion() {
    let (logs, result) = with_tracing(|| async {
        let traced = TracedPostProcessAdapter::new(FakePostProcessAdapter::default());
        traced
            .process(Path::new("/rec/a.ts"), Path::new("/rec/News.mp4"), "News")
            .await
    });

    assert!(result.is_ok());
    assert!(
        logs.contains("postprocess"),
        "Should log span name. Logs:\n{}",
        logs
    );
    assert!(
        logs.contains("post-processing finished"),
        "Should log completion. Logs:\n{}",
        logs
    );
}

#[test]
fn traced_postprocess_logs_failure() {
    let (logs, result) = with_tracing(|| async {
        let fake = FakePostProcessAdapter::default();
        fake.set_failing(true);
        TracedPostProcessAdapter::new(fake)
            .process(Path::new("/rec/a.ts"), Path::new("/rec/News.mp4"), "News")
            .await
    });

    assert!(result.is_err());
    assert!(
        logs.contains("post-processing failed"),
        "Should log failure. Logs:\n{}",
        logs
    );
}
