// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for the external capture and transcode processes

pub mod capture;
pub mod postprocess;
pub mod traced;

pub use capture::{CaptureAdapter, CaptureError, CaptureHandle, ZapCaptureAdapter};
pub use postprocess::{FfmpegAdapter, PostProcessAdapter, PostProcessError};
pub use traced::{TracedCaptureAdapter, TracedPostProcessAdapter};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use capture::{CaptureCall, FakeCapture, FakeCaptureAdapter};
#[cfg(any(test, feature = "test-support"))]
pub use postprocess::{FakePostProcessAdapter, PostProcessCall};
