use chrono::{DateTime, Duration, Local};

use super::types::{PhaseDurations, TimerPhase, TimerSnapshot};

/// Result of one tick of a running timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// State right after recomputing `time_left` (zero when the phase ended).
    pub ticked: TimerSnapshot,
    /// Set when the phase reached zero and the timer moved to the next one.
    pub completed: Option<TimerPhase>,
}

/// Canonical timer state.
///
/// `time_left` is recomputed from `start_time` on each tick rather than
/// decremented, so late ticks do not make the countdown drift.
///
/// Invariant: `0 <= time_left <= durations.for_phase(phase)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    pub time_left: i64,
    pub is_running: bool,
    pub phase: TimerPhase,
    pub completed_pomodoros: u32,
    /// Wall-clock instant at which the current phase would have begun had it
    /// run without pauses. `None` while idle.
    pub start_time: Option<DateTime<Local>>,
}

impl TimerState {
    /// Fresh, idle work phase.
    pub fn new(durations: &PhaseDurations, completed_pomodoros: u32) -> Self {
        Self {
            time_left: durations.work_secs,
            is_running: false,
            phase: TimerPhase::Work,
            completed_pomodoros,
            start_time: None,
        }
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            time_left: self.time_left,
            is_running: self.is_running,
            is_work_mode: self.phase.is_work(),
            completed_pomodoros: self.completed_pomodoros,
        }
    }

    /// Begin counting down. Returns false (and changes nothing) when already running.
    pub fn start(&mut self, now: DateTime<Local>, durations: &PhaseDurations) -> bool {
        if self.is_running {
            return false;
        }

        let already_elapsed = durations.for_phase(self.phase) - self.time_left;
        self.start_time = Some(now - Duration::seconds(already_elapsed));
        self.is_running = true;
        true
    }

    /// Pause, keeping `time_left`. Returns false when already idle.
    pub fn stop(&mut self) -> bool {
        if !self.is_running {
            return false;
        }

        self.is_running = false;
        self.start_time = None;
        true
    }

    /// Recompute `time_left` from the wall clock; on reaching zero switch to
    /// the next phase and go idle.
    ///
    /// Returns `None` when the timer is not running.
    pub fn tick(
        &mut self,
        now: DateTime<Local>,
        durations: &PhaseDurations,
    ) -> Option<TickOutcome> {
        if !self.is_running {
            return None;
        }
        let start_time = self.start_time?;

        let total = durations.for_phase(self.phase);
        let elapsed = (now - start_time).num_seconds().max(0);
        // A clock stepping backwards must not give time back
        self.time_left = (total - elapsed).clamp(0, self.time_left);

        let ticked = self.snapshot();
        if self.time_left > 0 {
            return Some(TickOutcome {
                ticked,
                completed: None,
            });
        }

        let completed = self.phase;
        if completed == TimerPhase::Work {
            self.completed_pomodoros = self.completed_pomodoros.saturating_add(1);
        }
        self.phase = completed.next();
        self.time_left = durations.for_phase(self.phase);
        self.is_running = false;
        self.start_time = None;

        Some(TickOutcome {
            ticked,
            completed: Some(completed),
        })
    }

    pub fn reset_completed(&mut self) {
        self.completed_pomodoros = 0;
    }
}
