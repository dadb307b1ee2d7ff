// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ffmpeg remux adapter

use super::{PostProcessAdapter, PostProcessError};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// Remuxes a transport stream into MP4 without re-encoding
#[derive(Clone)]
pub struct FfmpegAdapter {
    program: String,
}

impl Default for FfmpegAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl FfmpegAdapter {
    pub fn new() -> Self {
        Self {
            program: "ffmpeg".to_string(),
        }
    }

    /// Use a different executable with the same arguments
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Arguments passed to ffmpeg
    pub fn args(&self, input: &Path, output: &Path, title: &str) -> Vec<String> {
        vec![
            "-y".to_string(),
            "-i".to_string(),
            input.display().to_string(),
            "-c".to_string(),
            "copy".to_string(),
            "-metadata".to_string(),
            format!("title={}", title),
            output.display().to_string(),
        ]
    }
}

#[async_trait]
impl PostProcessAdapter for FfmpegAdapter {
    async fn process(
        &self,
        input: &Path,
        output: &Path,
        title: &str,
    ) -> Result<(), PostProcessError> {
        let result = Command::new(&self.program)
            .args(self.args(input, output, title))
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| PostProcessError::SpawnFailed(format!("{}: {}", self.program, e)))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let last_line = stderr.lines().last().unwrap_or_default();
            return Err(PostProcessError::Failed(format!(
                "{} ({})",
                result.status, last_line
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "ffmpeg_tests.rs"]
mod tests;
