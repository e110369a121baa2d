use serde::{Deserialize, Serialize};

use crate::config::TimerConfig;

/// Which interval of the timer is active.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    Work,
    Break,
}

impl TimerPhase {
    /// The phase that follows this one.
    pub fn next(self) -> Self {
        match self {
            TimerPhase::Work => TimerPhase::Break,
            TimerPhase::Break => TimerPhase::Work,
        }
    }

    pub fn is_work(self) -> bool {
        matches!(self, TimerPhase::Work)
    }
}

impl std::fmt::Display for TimerPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TimerPhase::Work => "Work Mode",
            TimerPhase::Break => "Break Mode",
        };
        write!(f, "{label}")
    }
}

/// Phase lengths in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseDurations {
    pub work_secs: i64,
    pub break_secs: i64,
}

impl Default for PhaseDurations {
    fn default() -> Self {
        Self {
            work_secs: 25 * 60,
            break_secs: 5 * 60,
        }
    }
}

impl PhaseDurations {
    pub fn for_phase(&self, phase: TimerPhase) -> i64 {
        match phase {
            TimerPhase::Work => self.work_secs,
            TimerPhase::Break => self.break_secs,
        }
    }
}

impl From<&TimerConfig> for PhaseDurations {
    fn from(config: &TimerConfig) -> Self {
        Self {
            work_secs: config.work_duration_secs(),
            break_secs: config.break_duration_secs(),
        }
    }
}

/// Immutable copy of timer state sent across the process boundary.
///
/// Field names on the wire are camelCase: `timeLeft`, `isRunning`,
/// `isWorkMode`, `completedPomodoros`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub time_left: i64,
    pub is_running: bool,
    pub is_work_mode: bool,
    pub completed_pomodoros: u32,
}

impl Default for TimerSnapshot {
    /// What a panel shows when it cannot reach the daemon.
    fn default() -> Self {
        Self {
            time_left: PhaseDurations::default().work_secs,
            is_running: false,
            is_work_mode: true,
            completed_pomodoros: 0,
        }
    }
}

impl TimerSnapshot {
    pub fn phase(&self) -> TimerPhase {
        if self.is_work_mode {
            TimerPhase::Work
        } else {
            TimerPhase::Break
        }
    }
}

/// What changed as the result of a timer operation.
///
/// Every variant carries the snapshot to broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    Started(TimerSnapshot),
    Stopped(TimerSnapshot),
    Tick(TimerSnapshot),
    PhaseCompleted {
        completed: TimerPhase,
        next: TimerPhase,
        snapshot: TimerSnapshot,
    },
    CounterReset(TimerSnapshot),
}

impl TimerEvent {
    pub fn snapshot(&self) -> &TimerSnapshot {
        match self {
            TimerEvent::Started(snapshot)
            | TimerEvent::Stopped(snapshot)
            | TimerEvent::Tick(snapshot)
            | TimerEvent::CounterReset(snapshot) => snapshot,
            TimerEvent::PhaseCompleted { snapshot, .. } => snapshot,
        }
    }

    /// Short name used in log events.
    pub fn name(&self) -> &'static str {
        match self {
            TimerEvent::Started(_) => "started",
            TimerEvent::Stopped(_) => "stopped",
            TimerEvent::Tick(_) => "tick",
            TimerEvent::PhaseCompleted { .. } => "phase_completed",
            TimerEvent::CounterReset(_) => "counter_reset",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_alternates() {
        assert_eq!(TimerPhase::Work.next(), TimerPhase::Break);
        assert_eq!(TimerPhase::Break.next(), TimerPhase::Work);
    }

    #[test]
    fn test_phase_labels() {
        assert_eq!(TimerPhase::Work.to_string(), "Work Mode");
        assert_eq!(TimerPhase::Break.to_string(), "Break Mode");
    }

    #[test]
    fn test_snapshot_wire_field_names() {
        let snapshot = TimerSnapshot {
            time_left: 1234,
            is_running: true,
            is_work_mode: false,
            completed_pomodoros: 2,
        };
        let json = serde_json::to_value(snapshot).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "timeLeft": 1234,
                "isRunning": true,
                "isWorkMode": false,
                "completedPomodoros": 2
            })
        );
    }

    #[test]
    fn test_default_snapshot_is_fresh_work_phase() {
        let snapshot = TimerSnapshot::default();
        assert_eq!(snapshot.time_left, 1500);
        assert!(!snapshot.is_running);
        assert_eq!(snapshot.phase(), TimerPhase::Work);
        assert_eq!(snapshot.completed_pomodoros, 0);
    }

    #[test]
    fn test_durations_from_config() {
        let config = TimerConfig {
            work_minutes: Some(1),
            break_minutes: Some(2),
        };
        let durations = PhaseDurations::from(&config);
        assert_eq!(durations.for_phase(TimerPhase::Work), 60);
        assert_eq!(durations.for_phase(TimerPhase::Break), 120);
    }
}
