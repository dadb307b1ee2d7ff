// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! dvr-core: Core library for the single-tuner recorder
//!
//! This crate provides:
//! - Programme intervals, schedule entries and the schedule itself
//! - The interval resolver that books the tuner without double-booking
//! - The pure recording lifecycle state machine
//! - Clock abstraction, timestamp format and artifact naming

pub mod clock;
pub mod naming;
pub mod programme;
pub mod recording;
pub mod resolver;
pub mod schedule;
pub mod timestamp;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock};
pub use naming::{ArtifactNamer, NamingError, DEFAULT_CAPTURE_TEMPLATE};
pub use programme::{ProgrammeInterval, ScheduleEntry, ScheduleError};
pub use recording::{
    ControllerState, Effect, Timing, Transition, DEFAULT_OVERRUN_MARGIN, DEFAULT_PERIOD,
};
pub use resolver::{resolve, resolve_detailed, Rejection, Resolution};
pub use schedule::Schedule;
