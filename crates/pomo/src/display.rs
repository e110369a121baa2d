use pomo_core::TimerSnapshot;

/// Format seconds as `MM:SS`, both parts zero-padded.
pub fn format_time(secs: i64) -> String {
    let secs = secs.max(0);
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

pub fn running_label(snapshot: &TimerSnapshot) -> &'static str {
    if snapshot.is_running { "running" } else { "paused" }
}

/// One-line rendering used by `status` and `watch`.
pub fn render_snapshot(snapshot: &TimerSnapshot) -> String {
    format!(
        "{}  {}  ({})  Completed Pomodoros: {}",
        format_time(snapshot.time_left),
        snapshot.phase(),
        running_label(snapshot),
        snapshot.completed_pomodoros
    )
}
