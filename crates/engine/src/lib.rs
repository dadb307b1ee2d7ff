// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Recorder engine: drives the recording lifecycle in wall-clock time

mod error;
mod runtime;
mod slot;

pub use error::RuntimeError;
pub use runtime::{
    Recorder, RecorderConfig, RecorderDeps, RunOutcome, Tick, DEFAULT_EXIT_POLL_INTERVAL,
};
pub use slot::{ActiveCapture, CaptureSlot};
