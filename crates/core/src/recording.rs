// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recording lifecycle state machine
//!
//! The controller samples the schedule once per period and moves through
//! Idle → Armed → Capturing → Finalizing → Idle. [`ControllerState::step`]
//! is pure: it returns the next state, the effects the runtime must
//! perform, and how long to sleep before the next cycle.

use crate::programme::ScheduleEntry;
use crate::schedule::Schedule;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Default sampling period
pub const DEFAULT_PERIOD: Duration = Duration::from_secs(1);

/// Default overrun margin before an uncaptured entry is purged
pub const DEFAULT_OVERRUN_MARGIN: Duration = Duration::from_secs(5);

/// Polling cadence of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Sampling period `P`
    pub period: Duration,
    /// Overrun margin `M`
    pub overrun_margin: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            period: DEFAULT_PERIOD,
            overrun_margin: DEFAULT_OVERRUN_MARGIN,
        }
    }
}

impl Timing {
    fn period_ms(&self) -> i64 {
        i64::try_from(self.period.as_millis()).unwrap_or(i64::MAX)
    }

    fn margin_ms(&self) -> i64 {
        i64::try_from(self.overrun_margin.as_millis()).unwrap_or(i64::MAX)
    }

    /// Sleep until `until_ms` has elapsed, never longer than one period
    fn wake_after(&self, until_ms: i64) -> Duration {
        Duration::from_millis(until_ms.clamp(0, self.period_ms()) as u64)
    }
}

/// Controller state. Non-idle states carry the entry being handled.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ControllerState {
    /// Waiting for the next entry to come due
    #[default]
    Idle,
    /// Next entry is due within one period; capture starts next cycle
    Armed { entry: ScheduleEntry },
    /// Capture process started; waiting for the window to close
    Capturing { entry: ScheduleEntry },
    /// Window closed; waiting for the capture process to exit
    Finalizing { entry: ScheduleEntry },
}

/// Side effects requested by a transition, in execution order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Remove an entry whose window passed uncaptured
    PurgeEntry { entry: ScheduleEntry },
    /// Start the capture process for a bounded duration
    StartCapture {
        entry: ScheduleEntry,
        duration: Duration,
    },
    /// Block until the capture process is no longer running
    AwaitCaptureExit,
    /// Hand the captured artifact to post-processing (fire-and-forget)
    PostProcess { entry: ScheduleEntry },
    /// Remove an entry whose window has been captured
    ConsumeEntry { entry: ScheduleEntry },
    /// Schedule is empty: stop the loop
    Terminate,
}

/// Result of one controller cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: ControllerState,
    pub effects: Vec<Effect>,
    /// Delay before the next cycle
    pub wake: Duration,
}

impl ControllerState {
    pub fn name(&self) -> &'static str {
        match self {
            ControllerState::Idle => "idle",
            ControllerState::Armed { .. } => "armed",
            ControllerState::Capturing { .. } => "capturing",
            ControllerState::Finalizing { .. } => "finalizing",
        }
    }

    pub fn entry(&self) -> Option<&ScheduleEntry> {
        match self {
            ControllerState::Idle => None,
            ControllerState::Armed { entry }
            | ControllerState::Capturing { entry }
            | ControllerState::Finalizing { entry } => Some(entry),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, ControllerState::Idle)
    }

    /// Advance the state machine by one cycle
    pub fn step(&self, schedule: &Schedule, now: DateTime<Utc>, timing: &Timing) -> Transition {
        match self {
            ControllerState::Idle => Self::step_idle(schedule, now, timing),

            ControllerState::Armed { entry } => {
                let remaining_ms = entry.remaining(now).num_milliseconds();
                if remaining_ms <= 0 {
                    // Armed too late: nothing left to capture
                    return Transition {
                        state: ControllerState::Idle,
                        effects: vec![Effect::PurgeEntry {
                            entry: entry.clone(),
                        }],
                        wake: Duration::ZERO,
                    };
                }
                let duration = Duration::from_millis(remaining_ms as u64);
                Transition {
                    state: ControllerState::Capturing {
                        entry: entry.clone(),
                    },
                    effects: vec![Effect::StartCapture {
                        entry: entry.clone(),
                        duration,
                    }],
                    wake: timing.wake_after(remaining_ms.saturating_sub(timing.period_ms())),
                }
            }

            ControllerState::Capturing { entry } => {
                let remaining_ms = entry.remaining(now).num_milliseconds();
                if remaining_ms <= timing.period_ms() {
                    Transition {
                        state: ControllerState::Finalizing {
                            entry: entry.clone(),
                        },
                        effects: vec![],
                        wake: timing.wake_after(remaining_ms),
                    }
                } else {
                    Transition {
                        state: self.clone(),
                        effects: vec![],
                        wake: timing.wake_after(remaining_ms.saturating_sub(timing.period_ms())),
                    }
                }
            }

            ControllerState::Finalizing { entry } => Transition {
                state: ControllerState::Idle,
                effects: vec![
                    Effect::AwaitCaptureExit,
                    Effect::PostProcess {
                        entry: entry.clone(),
                    },
                    Effect::ConsumeEntry {
                        entry: entry.clone(),
                    },
                ],
                wake: Duration::ZERO,
            },
        }
    }

    fn step_idle(schedule: &Schedule, now: DateTime<Utc>, timing: &Timing) -> Transition {
        let Some(next) = schedule.next_entry() else {
            return Transition {
                state: ControllerState::Idle,
                effects: vec![Effect::Terminate],
                wake: Duration::ZERO,
            };
        };

        let delta_ms = next.until_start(now).num_milliseconds();

        if delta_ms < -timing.margin_ms() {
            Transition {
                state: ControllerState::Idle,
                effects: vec![Effect::PurgeEntry {
                    entry: next.clone(),
                }],
                wake: Duration::ZERO,
            }
        } else if delta_ms <= timing.period_ms() {
            Transition {
                state: ControllerState::Armed {
                    entry: next.clone(),
                },
                effects: vec![],
                wake: timing.wake_after(delta_ms),
            }
        } else {
            Transition {
                state: ControllerState::Idle,
                effects: vec![],
                wake: timing.wake_after(delta_ms.saturating_sub(timing.period_ms())),
            }
        }
    }
}

impl std::fmt::Display for ControllerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[path = "recording_tests.rs"]
mod tests;
