// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! dvbv5-zap capture adapter

use super::{CaptureAdapter, CaptureError, CaptureHandle};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::process::{Child, Command};

/// Captures a channel with `dvbv5-zap` on a DVB adapter
#[derive(Clone)]
pub struct ZapCaptureAdapter {
    program: String,
    channels: PathBuf,
    adapter: String,
    children: Arc<Mutex<HashMap<String, Child>>>,
}

impl ZapCaptureAdapter {
    pub fn new(channels: impl Into<PathBuf>, adapter: impl Into<String>) -> Self {
        Self {
            program: "dvbv5-zap".to_string(),
            channels: channels.into(),
            adapter: adapter.into(),
            children: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Use a different executable with the same arguments
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Arguments passed to the capture program
    pub fn args(&self, channel: &str, duration: Duration, output: &Path) -> Vec<String> {
        vec![
            "-r".to_string(),
            channel.to_string(),
            "-t".to_string(),
            whole_seconds(duration).to_string(),
            "-o".to_string(),
            output.display().to_string(),
            "-c".to_string(),
            self.channels.display().to_string(),
            "-a".to_string(),
            self.adapter.clone(),
        ]
    }
}

/// Round to the nearest second, never below one
fn whole_seconds(duration: Duration) -> u64 {
    let millis = duration.as_millis();
    let secs = (millis + 500) / 1000;
    u64::try_from(secs).unwrap_or(u64::MAX).max(1)
}

#[async_trait]
impl CaptureAdapter for ZapCaptureAdapter {
    async fn start(
        &self,
        channel: &str,
        duration: Duration,
        output: &Path,
    ) -> Result<CaptureHandle, CaptureError> {
        let child = Command::new(&self.program)
            .args(self.args(channel, duration, output))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| CaptureError::SpawnFailed(format!("{}: {}", self.program, e)))?;

        let id = format!("zap-{}", uuid::Uuid::new_v4());
        if let Some(pid) = child.id() {
            tracing::debug!(id = %id, pid, "capture process spawned");
        }
        self.children
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(id.clone(), child);

        Ok(CaptureHandle {
            id,
            channel: channel.to_string(),
            output: output.to_path_buf(),
        })
    }

    async fn is_alive(&self, handle: &CaptureHandle) -> Result<bool, CaptureError> {
        let mut children = self.children.lock().unwrap_or_else(|e| e.into_inner());
        let Some(child) = children.get_mut(&handle.id) else {
            // Already reaped
            return Ok(false);
        };

        match child.try_wait() {
            Ok(None) => Ok(true),
            Ok(Some(status)) => {
                tracing::debug!(id = %handle.id, %status, "capture process exited");
                children.remove(&handle.id);
                Ok(false)
            }
            Err(e) => Err(CaptureError::CommandFailed(e.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "zap_tests.rs"]
mod tests;
