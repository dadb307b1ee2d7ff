// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Interval resolver: turns overlapping candidates into a bookable schedule
//!
//! Candidates are taken greedily in the order supplied. That order is the
//! priority: a candidate is accepted only if it overlaps none of the
//! candidates accepted before it, and a rejected candidate is never
//! reconsidered. Callers pass rule-definition order, then guide order.

use crate::programme::{ProgrammeInterval, ScheduleEntry, ScheduleError};
use crate::schedule::Schedule;

/// A candidate that lost its slot to an earlier, higher-priority booking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub candidate: ProgrammeInterval,
    pub occupied_by: ScheduleEntry,
}

/// Outcome of a resolution, including what was turned away
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub schedule: Schedule,
    pub rejected: Vec<Rejection>,
}

/// Resolve candidates into a conflict-free schedule sorted by start time.
///
/// Fails without resolving anything if any candidate is empty or inverted.
pub fn resolve(candidates: &[ProgrammeInterval]) -> Result<Schedule, ScheduleError> {
    Ok(resolve_detailed(candidates)?.schedule)
}

/// Like [`resolve`], also reporting each rejected candidate
pub fn resolve_detailed(candidates: &[ProgrammeInterval]) -> Result<Resolution, ScheduleError> {
    for candidate in candidates {
        candidate.validate()?;
    }

    let mut accepted: Vec<ScheduleEntry> = Vec::new();
    let mut rejected = Vec::new();

    for candidate in candidates {
        let occupied = accepted
            .iter()
            .find(|booked| booked.overlaps(&candidate.start, &candidate.stop));

        match occupied {
            Some(booked) => {
                tracing::debug!(
                    channel = %candidate.channel,
                    title = %candidate.title,
                    occupied_by = %booked.title,
                    "slot occupied"
                );
                rejected.push(Rejection {
                    candidate: candidate.clone(),
                    occupied_by: booked.clone(),
                });
            }
            None => {
                tracing::debug!(
                    channel = %candidate.channel,
                    title = %candidate.title,
                    "slot accepted"
                );
                accepted.push(ScheduleEntry::from(candidate.clone()));
            }
        }
    }

    accepted.sort_by_key(|entry| entry.start);

    Ok(Resolution {
        schedule: Schedule::from_entries(accepted),
        rejected,
    })
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
