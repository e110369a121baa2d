use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate};
use tracing::{error, info, warn};

use super::machine::TimerState;
use super::types::{PhaseDurations, TimerEvent, TimerPhase, TimerSnapshot};
use crate::notify::Notifier;
use crate::storage::{self, COMPLETED_POMODOROS_KEY, KeyValueStore};

pub const WORK_COMPLETE_TITLE: &str = "Work Session Complete!";
pub const WORK_COMPLETE_MESSAGE: &str = "Time to take a break!";
pub const BREAK_COMPLETE_TITLE: &str = "Break Complete!";
pub const BREAK_COMPLETE_MESSAGE: &str = "Time to get back to work!";

/// Owner of the canonical timer state.
///
/// Created once at daemon start and mutated only through its own methods.
/// Each operation returns the events it produced, in order; the caller
/// broadcasts their snapshots. Storage and notification failures are
/// logged and swallowed.
pub struct TimerService {
    state: TimerState,
    durations: PhaseDurations,
    store: Arc<dyn KeyValueStore>,
    notifier: Arc<dyn Notifier>,
    last_sweep_date: NaiveDate,
}

impl TimerService {
    /// Build a service with a fresh work phase and the persisted completed count.
    ///
    /// Only `completedPomodoros` survives a restart; phase and remaining
    /// time always start over.
    pub fn new(
        durations: PhaseDurations,
        store: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
        now: DateTime<Local>,
    ) -> Self {
        let completed = match storage::load::<u32>(store.as_ref(), COMPLETED_POMODOROS_KEY) {
            Ok(Some(count)) => count,
            Ok(None) => 0,
            Err(e) => {
                warn!(
                    event = "core.timer.load_completed_failed",
                    error = %e,
                    "Falling back to 0 completed pomodoros"
                );
                0
            }
        };

        info!(
            event = "core.timer.service_created",
            work_secs = durations.work_secs,
            break_secs = durations.break_secs,
            completed_pomodoros = completed,
        );

        Self {
            state: TimerState::new(&durations, completed),
            durations,
            store,
            notifier,
            last_sweep_date: now.date_naive(),
        }
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        self.state.snapshot()
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    /// Start the current phase. No-op when already running.
    pub fn start(&mut self, now: DateTime<Local>) -> Vec<TimerEvent> {
        if !self.state.start(now, &self.durations) {
            info!(event = "core.timer.start_ignored", reason = "already running");
            return Vec::new();
        }

        info!(
            event = "core.timer.started",
            phase = %self.state.phase,
            time_left = self.state.time_left,
        );
        vec![TimerEvent::Started(self.snapshot())]
    }

    /// Pause, keeping the remaining time. No-op when idle.
    pub fn stop(&mut self) -> Vec<TimerEvent> {
        if !self.state.stop() {
            return Vec::new();
        }

        info!(
            event = "core.timer.stopped",
            phase = %self.state.phase,
            time_left = self.state.time_left,
        );
        vec![TimerEvent::Stopped(self.snapshot())]
    }

    /// Advance a running timer. Produces a `Tick`, followed by a
    /// `PhaseCompleted` when the phase ran out.
    pub fn tick(&mut self, now: DateTime<Local>) -> Vec<TimerEvent> {
        let Some(outcome) = self.state.tick(now, &self.durations) else {
            return Vec::new();
        };

        let mut events = vec![TimerEvent::Tick(outcome.ticked)];

        if let Some(completed) = outcome.completed {
            self.on_phase_completed(completed);
            events.push(TimerEvent::PhaseCompleted {
                completed,
                next: self.state.phase,
                snapshot: self.snapshot(),
            });
        }

        events
    }

    /// Reset the completed count once the local date has changed since the
    /// previous sweep. Independent of the timer phase.
    pub fn sweep_midnight(&mut self, now: DateTime<Local>) -> Vec<TimerEvent> {
        let today = now.date_naive();
        if today == self.last_sweep_date {
            return Vec::new();
        }

        info!(
            event = "core.timer.daily_reset",
            previous_date = %self.last_sweep_date,
            date = %today,
            completed_pomodoros = self.state.completed_pomodoros,
        );

        self.last_sweep_date = today;
        self.state.reset_completed();
        self.persist_completed();

        vec![TimerEvent::CounterReset(self.snapshot())]
    }

    fn on_phase_completed(&mut self, completed: TimerPhase) {
        info!(
            event = "core.timer.phase_completed",
            completed = %completed,
            next = %self.state.phase,
            completed_pomodoros = self.state.completed_pomodoros,
        );

        match completed {
            TimerPhase::Work => {
                self.persist_completed();
                self.notifier.notify(WORK_COMPLETE_TITLE, WORK_COMPLETE_MESSAGE);
            }
            TimerPhase::Break => {
                self.notifier.notify(BREAK_COMPLETE_TITLE, BREAK_COMPLETE_MESSAGE);
            }
        }
    }

    fn persist_completed(&self) {
        if let Err(e) = storage::save(
            self.store.as_ref(),
            COMPLETED_POMODOROS_KEY,
            &self.state.completed_pomodoros,
        ) {
            error!(
                event = "core.timer.persist_completed_failed",
                completed_pomodoros = self.state.completed_pomodoros,
                error = %e,
            );
        }
    }
}
