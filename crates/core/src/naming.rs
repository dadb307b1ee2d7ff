// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output artifact naming
//!
//! The capture file name comes from a user template rendered with the
//! entry's `timestamp`, `channel` and `title`. The transcoded file is
//! always `<title>-<timestamp>.mp4` in the recordings directory.

use crate::programme::ScheduleEntry;
use crate::timestamp;
use minijinja::{context, Environment};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default capture file template
pub const DEFAULT_CAPTURE_TEMPLATE: &str = "recording-{{ timestamp }}.ts";

/// Errors from output naming
#[derive(Debug, Error)]
pub enum NamingError {
    #[error("invalid output template {template:?}: {source}")]
    InvalidTemplate {
        template: String,
        #[source]
        source: minijinja::Error,
    },
    #[error("output template {0:?} rendered an empty file name")]
    EmptyName(String),
}

/// Builds capture and transcode paths for schedule entries
#[derive(Debug, Clone)]
pub struct ArtifactNamer {
    recordings_dir: PathBuf,
    template: String,
}

impl ArtifactNamer {
    /// Create a namer, checking that the template parses
    pub fn new(
        recordings_dir: impl Into<PathBuf>,
        template: impl Into<String>,
    ) -> Result<Self, NamingError> {
        let template = template.into();
        Environment::new()
            .template_from_str(&template)
            .map_err(|source| NamingError::InvalidTemplate {
                template: template.clone(),
                source,
            })?;
        Ok(Self {
            recordings_dir: recordings_dir.into(),
            template,
        })
    }

    pub fn recordings_dir(&self) -> &Path {
        &self.recordings_dir
    }

    /// Path the capture process writes to.
    ///
    /// Relative renders land in the recordings directory.
    pub fn capture_path(&self, entry: &ScheduleEntry) -> Result<PathBuf, NamingError> {
        let env = Environment::new();
        let tmpl = env
            .template_from_str(&self.template)
            .map_err(|source| self.invalid(source))?;
        let rendered = tmpl
            .render(context! {
                timestamp => timestamp::compact(&entry.start),
                channel => sanitize(&entry.channel),
                title => sanitize(&entry.title),
            })
            .map_err(|source| self.invalid(source))?;

        let rendered = rendered.trim();
        if rendered.is_empty() {
            return Err(NamingError::EmptyName(self.template.clone()));
        }

        let path = Path::new(rendered);
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            Ok(self.recordings_dir.join(path))
        }
    }

    /// Path the post-processing step writes to
    pub fn transcode_path(&self, entry: &ScheduleEntry) -> PathBuf {
        let name = format!(
            "{}-{}.mp4",
            entry.title,
            timestamp::compact(&entry.start)
        );
        self.recordings_dir.join(sanitize(&name))
    }

    fn invalid(&self, source: minijinja::Error) -> NamingError {
        NamingError::InvalidTemplate {
            template: self.template.clone(),
            source,
        }
    }
}

/// Replace characters that break shell quoting or escape the directory
pub fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            ' ' | '\'' | '/' | '\\' => '_',
            other => other,
        })
        .collect()
}

#[cfg(test)]
#[path = "naming_tests.rs"]
mod tests;
