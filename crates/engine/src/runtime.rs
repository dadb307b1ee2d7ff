// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recorder runtime
//!
//! Each cycle loads the schedule (when idle), steps the state machine and
//! executes the effects it asks for. The loop sleeps for the wake delay
//! the transition computed, so the controller reacts at most one period
//! late.

use crate::slot::{ActiveCapture, CaptureSlot};
use crate::RuntimeError;
use chrono::{DateTime, TimeDelta, Utc};
use dvr_adapters::{CaptureAdapter, PostProcessAdapter};
use dvr_core::{
    ArtifactNamer, Clock, ControllerState, Effect, Schedule, ScheduleEntry, Timing,
};
use dvr_storage::ScheduleStore;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinSet;

/// How often liveness is checked while waiting for a capture to exit
pub const DEFAULT_EXIT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Recorder adapter dependencies
pub struct RecorderDeps<S, C, P> {
    pub store: S,
    pub capture: C,
    pub postprocess: P,
}

/// Recorder settings
#[derive(Debug, Clone)]
pub struct RecorderConfig {
    pub timing: Timing,
    pub exit_poll_interval: Duration,
    pub namer: ArtifactNamer,
}

impl RecorderConfig {
    pub fn new(namer: ArtifactNamer) -> Self {
        Self {
            timing: Timing::default(),
            exit_poll_interval: DEFAULT_EXIT_POLL_INTERVAL,
            namer,
        }
    }
}

/// Outcome of one cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    pub state: ControllerState,
    pub wake: Duration,
    pub terminated: bool,
}

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Schedule became empty while idle
    ScheduleEmpty,
    /// Shutdown was requested between cycles
    Shutdown,
}

/// Drives captures for the entries in a schedule store
pub struct Recorder<S, C, P, K> {
    store: S,
    capture: C,
    postprocess: P,
    clock: K,
    config: RecorderConfig,
    state: ControllerState,
    slot: CaptureSlot,
    post_tasks: JoinSet<()>,
}

impl<S, C, P, K> Recorder<S, C, P, K>
where
    S: ScheduleStore,
    C: CaptureAdapter,
    P: PostProcessAdapter,
    K: Clock,
{
    pub fn new(deps: RecorderDeps<S, C, P>, clock: K, config: RecorderConfig) -> Self {
        Self {
            store: deps.store,
            capture: deps.capture,
            postprocess: deps.postprocess,
            clock,
            config,
            state: ControllerState::Idle,
            slot: CaptureSlot::new(),
            post_tasks: JoinSet::new(),
        }
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn slot(&self) -> &CaptureSlot {
        &self.slot
    }

    /// Run until the schedule is empty
    pub async fn run(&mut self) -> RunOutcome {
        self.run_until(std::future::pending()).await
    }

    /// Run until the schedule is empty or `shutdown` resolves.
    ///
    /// Shutdown is only observed while sleeping between cycles, so a
    /// cycle in progress always completes. Either way, post-processing
    /// already handed off is drained before returning.
    pub async fn run_until<F>(&mut self, shutdown: F) -> RunOutcome
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        loop {
            let tick = self.tick().await;
            if tick.terminated {
                tracing::info!("schedule empty, stopping");
                self.wait_post_processing().await;
                return RunOutcome::ScheduleEmpty;
            }
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!(state = %self.state, "shutdown requested");
                    self.wait_post_processing().await;
                    return RunOutcome::Shutdown;
                }
                _ = tokio::time::sleep(tick.wake) => {}
            }
        }
    }

    /// Run one controller cycle
    pub async fn tick(&mut self) -> Tick {
        while self.post_tasks.try_join_next().is_some() {}

        let timing = self.config.timing;
        let schedule = if self.state.is_idle() {
            match self.store.load() {
                Ok(schedule) => schedule,
                Err(e) => {
                    tracing::error!(error = %e, "failed to load schedule, retrying next period");
                    return Tick {
                        state: self.state.clone(),
                        wake: timing.period,
                        terminated: false,
                    };
                }
            }
        } else {
            Schedule::default()
        };

        let now = self.clock.now();
        let mut transition = self.state.step(&schedule, now, &timing);
        let mut terminated = false;

        for effect in std::mem::take(&mut transition.effects) {
            match effect {
                Effect::PurgeEntry { entry } => {
                    tracing::warn!(
                        channel = %entry.channel,
                        title = %entry.title,
                        start = %entry.start,
                        "window passed uncaptured, dropping entry"
                    );
                    self.remove_entry(&entry);
                }
                Effect::StartCapture { entry, duration } => {
                    if let Err(e) = self.start_capture(&entry, duration).await {
                        tracing::error!(
                            channel = %entry.channel,
                            title = %entry.title,
                            error = %e,
                            "capture did not start, dropping entry"
                        );
                        self.remove_entry(&entry);
                        transition.state = ControllerState::Idle;
                        transition.wake = Duration::ZERO;
                    }
                }
                Effect::AwaitCaptureExit => self.await_capture_exit().await,
                Effect::PostProcess { entry } => self.dispatch_post_processing(&entry),
                Effect::ConsumeEntry { entry } => self.remove_entry(&entry),
                Effect::Terminate => terminated = true,
            }
        }

        if transition.state != self.state {
            tracing::info!(
                from = %self.state,
                to = %transition.state,
                channel = transition.state.entry().map(|e| e.channel.as_str()),
                title = transition.state.entry().map(|e| e.title.as_str()),
                "state changed"
            );
        }
        self.report_countdown(&schedule, &transition.state, now);
        self.state = transition.state;

        Tick {
            state: self.state.clone(),
            wake: transition.wake,
            terminated,
        }
    }

    /// Wait for outstanding post-processing tasks
    pub async fn wait_post_processing(&mut self) {
        while let Some(result) = self.post_tasks.join_next().await {
            if let Err(e) = result {
                tracing::warn!(error = %e, "post-processing task aborted");
            }
        }
    }

    async fn start_capture(
        &mut self,
        entry: &ScheduleEntry,
        duration: Duration,
    ) -> Result<(), RuntimeError> {
        if let Some(held) = self.slot.current() {
            return Err(RuntimeError::TunerBusy {
                channel: held.entry.channel.clone(),
                title: held.entry.title.clone(),
            });
        }

        let output = self.config.namer.capture_path(entry)?;
        let handle = self
            .capture
            .start(&entry.channel, duration, &output)
            .await?;
        self.slot.occupy(ActiveCapture {
            entry: entry.clone(),
            handle,
        })
    }

    async fn await_capture_exit(&self) {
        let Some(active) = self.slot.current() else {
            return;
        };
        loop {
            match self.capture.is_alive(&active.handle).await {
                Ok(true) => {
                    tracing::debug!(handle = %active.handle.id, "capture still running");
                    tokio::time::sleep(self.config.exit_poll_interval).await;
                }
                Ok(false) => break,
                Err(e) => {
                    tracing::warn!(
                        handle = %active.handle.id,
                        error = %e,
                        "cannot check capture, assuming it finished"
                    );
                    break;
                }
            }
        }
    }

    fn dispatch_post_processing(&mut self, entry: &ScheduleEntry) {
        let Some(active) = self.slot.take() else {
            tracing::debug!(title = %entry.title, "no capture to post-process");
            return;
        };

        let input = active.handle.output;
        let output = self.config.namer.transcode_path(&active.entry);
        let title = active.entry.title;
        let postprocess = self.postprocess.clone();

        tracing::info!(input = %input.display(), output = %output.display(), "handing off capture");
        self.post_tasks.spawn(async move {
            if let Err(e) = postprocess.process(&input, &output, &title).await {
                tracing::warn!(title = %title, error = %e, "post-processing failed");
            }
        });
    }

    /// Remove `entry` from the store as it is now, not as it was loaded
    fn remove_entry(&self, entry: &ScheduleEntry) {
        let result = self
            .store
            .load()
            .and_then(|current| self.store.remove_entry(&current, entry));
        if let Err(e) = result {
            tracing::error!(
                title = %entry.title,
                error = %e,
                "failed to remove entry, retrying next cycle"
            );
        }
    }

    fn report_countdown(
        &self,
        schedule: &Schedule,
        state: &ControllerState,
        now: DateTime<Utc>,
    ) {
        match state {
            ControllerState::Idle => {
                let upcoming = schedule
                    .next_entry()
                    .filter(|next| next.until_start(now) > TimeDelta::zero());
                if let Some(next) = upcoming {
                    tracing::info!(
                        channel = %next.channel,
                        title = %next.title,
                        starts_in = %countdown(next.until_start(now)),
                        "waiting"
                    );
                }
            }
            ControllerState::Capturing { entry } => {
                tracing::info!(
                    channel = %entry.channel,
                    title = %entry.title,
                    remaining = %countdown(entry.remaining(now)),
                    "recording"
                );
            }
            ControllerState::Armed { .. } | ControllerState::Finalizing { .. } => {}
        }
    }
}

/// Human-readable whole seconds, zero when already past
fn countdown(delta: TimeDelta) -> humantime::FormattedDuration {
    let secs = u64::try_from(delta.num_seconds()).unwrap_or(0);
    humantime::format_duration(Duration::from_secs(secs))
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
