// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the recorder runtime

use dvr_adapters::CaptureError;
use dvr_core::NamingError;
use dvr_storage::StoreError;
use thiserror::Error;

/// Errors that can occur while executing a cycle
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("naming error: {0}")]
    Naming(#[from] NamingError),
    #[error("capture error: {0}")]
    Capture(#[from] CaptureError),
    #[error("tuner busy with \"{title}\" on {channel}")]
    TunerBusy { channel: String, title: String },
}
