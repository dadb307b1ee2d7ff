// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Programme guide directory loading
//!
//! The guide is a directory of `*.json` files, each holding a list of
//! programmes. Files are read in name order so candidate order is stable.
//! A file that does not parse is assumed to be mid-write and is skipped.

use crate::store::StoreError;
use dvr_core::{ProgrammeInterval, ScheduleError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// On-disk shape of one guide file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuideFile {
    #[serde(default)]
    pub programmes: Vec<ProgrammeInterval>,
}

/// Programmes read from a guide directory, in guide order
#[derive(Debug, Default)]
pub struct GuideLoad {
    pub programmes: Vec<ProgrammeInterval>,
    /// Files that could not be read or parsed
    pub skipped_files: Vec<PathBuf>,
    /// Programmes dropped for an empty or inverted interval
    pub invalid: Vec<ScheduleError>,
}

/// Read every `*.json` file in `dir`
pub fn load_guide(dir: &Path) -> Result<GuideLoad, StoreError> {
    let read_dir = match fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(StoreError::NotFound(dir.to_path_buf()))
        }
        Err(source) => {
            return Err(StoreError::Io {
                path: dir.to_path_buf(),
                source,
            })
        }
    };

    let mut files: Vec<PathBuf> = read_dir
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    let mut load = GuideLoad::default();
    for path in files {
        let parsed = fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|content| {
                serde_json::from_str::<GuideFile>(&content).map_err(|e| e.to_string())
            });

        let guide = match parsed {
            Ok(guide) => guide,
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "skipping incomplete guide file");
                load.skipped_files.push(path);
                continue;
            }
        };

        for programme in guide.programmes {
            match programme.validate() {
                Ok(()) => load.programmes.push(programme),
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "skipping programme");
                    load.invalid.push(error);
                }
            }
        }
    }

    tracing::debug!(
        dir = %dir.display(),
        programmes = load.programmes.len(),
        skipped = load.skipped_files.len(),
        "guide loaded"
    );
    Ok(load)
}

#[cfg(test)]
#[path = "guide_tests.rs"]
mod tests;
