// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The accepted recording schedule
//!
//! Entries are kept in store order. The resolver produces them sorted by
//! start time; the controller only ever removes entries. A schedule read
//! back from disk may have been edited by hand, so lookups do not assume
//! the ordering or the no-overlap invariant hold.

use crate::programme::ScheduleEntry;
use serde::{Deserialize, Serialize};

/// Ordered sequence of bookings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(default)]
    recordings: Vec<ScheduleEntry>,
}

impl Schedule {
    /// Wrap entries, keeping the given order
    pub fn from_entries(recordings: Vec<ScheduleEntry>) -> Self {
        Self { recordings }
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.recordings
    }

    pub fn into_entries(self) -> Vec<ScheduleEntry> {
        self.recordings
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScheduleEntry> {
        self.recordings.iter()
    }

    pub fn len(&self) -> usize {
        self.recordings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recordings.is_empty()
    }

    pub fn contains(&self, entry: &ScheduleEntry) -> bool {
        self.recordings.contains(entry)
    }

    /// The entry with the earliest start.
    ///
    /// Equal starts only happen in a corrupted store; the first one in store
    /// order wins and the other stays pending.
    pub fn next_entry(&self) -> Option<&ScheduleEntry> {
        let mut next: Option<&ScheduleEntry> = None;
        for entry in &self.recordings {
            match next {
                Some(current) if entry.start >= current.start => {}
                _ => next = Some(entry),
            }
        }
        next
    }

    /// Copy of the schedule without the first entry equal to `entry`
    pub fn without(&self, entry: &ScheduleEntry) -> Schedule {
        let mut recordings = self.recordings.clone();
        if let Some(pos) = recordings.iter().position(|e| e == entry) {
            recordings.remove(pos);
        }
        Schedule { recordings }
    }

    /// Whether entries are in start-ascending order
    pub fn is_ordered(&self) -> bool {
        self.recordings.windows(2).all(|w| w[0].start <= w[1].start)
    }

    /// Index pairs of entries that double-book the tuner
    pub fn conflicts(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for (i, a) in self.recordings.iter().enumerate() {
            for (j, b) in self.recordings.iter().enumerate().skip(i + 1) {
                if a.overlaps_entry(b) {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a ScheduleEntry;
    type IntoIter = std::slice::Iter<'a, ScheduleEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.recordings.iter()
    }
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;
