// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Programme intervals and schedule entries
//!
//! A [`ProgrammeInterval`] is a candidate produced by rule matching against
//! the guide. Once the resolver accepts it, it becomes a [`ScheduleEntry`],
//! a booking of the tuner that no other entry may overlap.

use crate::timestamp;
use chrono::{DateTime, FixedOffset, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while validating intervals
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("invalid interval for \"{title}\" on {channel}: stop {stop} is not after start {start}")]
    InvalidInterval {
        channel: String,
        title: String,
        start: String,
        stop: String,
    },
}

/// A programme occurrence matched by a rule but not yet booked
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProgrammeInterval {
    pub channel: String,
    pub title: String,
    #[serde(with = "timestamp")]
    pub start: DateTime<FixedOffset>,
    #[serde(with = "timestamp")]
    pub stop: DateTime<FixedOffset>,
}

impl ProgrammeInterval {
    /// Create a validated interval
    pub fn new(
        channel: impl Into<String>,
        title: impl Into<String>,
        start: DateTime<FixedOffset>,
        stop: DateTime<FixedOffset>,
    ) -> Result<Self, ScheduleError> {
        let interval = Self {
            channel: channel.into(),
            title: title.into(),
            start,
            stop,
        };
        interval.validate()?;
        Ok(interval)
    }

    /// Reject zero-length and inverted intervals
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.stop <= self.start {
            return Err(ScheduleError::InvalidInterval {
                channel: self.channel.clone(),
                title: self.title.clone(),
                start: timestamp::format(&self.start),
                stop: timestamp::format(&self.stop),
            });
        }
        Ok(())
    }

    pub fn duration(&self) -> TimeDelta {
        self.stop - self.start
    }
}

/// An accepted booking of the tuner
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub channel: String,
    pub title: String,
    #[serde(with = "timestamp")]
    pub start: DateTime<FixedOffset>,
    #[serde(with = "timestamp")]
    pub stop: DateTime<FixedOffset>,
}

impl ScheduleEntry {
    /// Half-open overlap test: an entry ending exactly when another
    /// starts does not conflict with it.
    pub fn overlaps(&self, start: &DateTime<FixedOffset>, stop: &DateTime<FixedOffset>) -> bool {
        self.start < *stop && *start < self.stop
    }

    pub fn overlaps_entry(&self, other: &ScheduleEntry) -> bool {
        self.overlaps(&other.start, &other.stop)
    }

    /// Signed time from `now` until the window opens (negative once started)
    pub fn until_start(&self, now: DateTime<Utc>) -> TimeDelta {
        self.start.with_timezone(&Utc) - now
    }

    /// Signed time from `now` until the window closes
    pub fn remaining(&self, now: DateTime<Utc>) -> TimeDelta {
        self.stop.with_timezone(&Utc) - now
    }

    pub fn duration(&self) -> TimeDelta {
        self.stop - self.start
    }
}

impl From<ProgrammeInterval> for ScheduleEntry {
    fn from(interval: ProgrammeInterval) -> Self {
        ScheduleEntry {
            channel: interval.channel,
            title: interval.title,
            start: interval.start,
            stop: interval.stop,
        }
    }
}

impl std::fmt::Display for ScheduleEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {} : {}, {}",
            timestamp::hour_minute(&self.start),
            timestamp::hour_minute(&self.stop),
            self.channel,
            self.title
        )
    }
}

#[cfg(test)]
#[path = "programme_tests.rs"]
mod tests;
