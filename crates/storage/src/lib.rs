// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Durable schedule storage and guide loading

mod guide;
mod json;
mod store;

#[cfg(any(test, feature = "test-support"))]
mod memory;

pub use guide::{load_guide, GuideFile, GuideLoad};
pub use json::JsonScheduleStore;
pub use store::{ScheduleStore, StoreError};

#[cfg(any(test, feature = "test-support"))]
pub use memory::MemoryScheduleStore;
