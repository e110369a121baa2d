//! Platform-native desktop notification dispatch.
//!
//! Best-effort notifications: failures are logged but never propagate.
//! The timer fires one notification per phase transition.

use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread;

use tracing::{info, warn};

#[cfg(not(target_os = "macos"))]
use tracing::debug;

/// Sink for user-facing notifications.
pub trait Notifier: Send + Sync {
    /// Fire a notification. Must not fail or block for long.
    fn notify(&self, title: &str, message: &str);
}

/// Sends notifications through the desktop notification service.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    enabled: bool,
}

impl DesktopNotifier {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, message: &str) {
        if !self.enabled {
            info!(
                event = "core.notify.send_skipped",
                reason = "disabled in config",
                title = title,
            );
            return;
        }
        send_notification(title, message);
    }
}

/// Records notifications instead of displaying them.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications fired so far, as `(title, message)` pairs.
    pub fn sent(&self) -> Vec<(String, String)> {
        match self.sent.lock() {
            Ok(sent) => sent.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, title: &str, message: &str) {
        let mut sent = match self.sent.lock() {
            Ok(sent) => sent,
            Err(poisoned) => poisoned.into_inner(),
        };
        sent.push((title.to_string(), message.to_string()));
    }
}

/// Delivers notifications on a dedicated thread.
///
/// `notify` only queues the message, so a notification tool that hangs
/// (e.g. `notify-send` waiting on D-Bus) never stalls the caller.
/// Messages are delivered in order. The thread exits when this value is
/// dropped.
pub struct BackgroundNotifier {
    queue: Option<Sender<(String, String)>>,
    inner: Arc<dyn Notifier>,
}

impl BackgroundNotifier {
    pub fn new(inner: Arc<dyn Notifier>) -> Self {
        let (tx, rx) = mpsc::channel::<(String, String)>();
        let worker_inner = inner.clone();

        let spawned = thread::Builder::new()
            .name("pomo-notify".to_string())
            .spawn(move || {
                for (title, message) in rx {
                    worker_inner.notify(&title, &message);
                }
            });

        let queue = match spawned {
            Ok(_) => Some(tx),
            Err(e) => {
                warn!(
                    event = "core.notify.thread_spawn_failed",
                    error = %e,
                    "Delivering notifications inline"
                );
                None
            }
        };

        Self { queue, inner }
    }
}

impl Notifier for BackgroundNotifier {
    fn notify(&self, title: &str, message: &str) {
        let Some(queue) = &self.queue else {
            self.inner.notify(title, message);
            return;
        };

        if queue.send((title.to_string(), message.to_string())).is_err() {
            warn!(
                event = "core.notify.send_failed",
                title = title,
                reason = "notification thread exited",
            );
        }
    }
}

/// Escape a string for use inside an AppleScript string literal.
pub fn applescript_escape(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}

/// Send a platform-native desktop notification (best-effort).
///
/// - macOS: `osascript` (Notification Center)
/// - Linux: `notify-send` (requires libnotify)
/// - Other: no-op
///
/// Failures are logged at warn level but never returned as errors.
pub fn send_notification(title: &str, message: &str) {
    info!(
        event = "core.notify.send_started",
        title = title,
        message = message,
    );

    send_platform_notification(title, message);
}

#[cfg(target_os = "macos")]
fn send_platform_notification(title: &str, message: &str) {
    let script = format!(
        r#"display notification "{}" with title "{}""#,
        applescript_escape(message),
        applescript_escape(title)
    );

    match std::process::Command::new("osascript")
        .arg("-e")
        .arg(&script)
        .output()
    {
        Ok(output) if output.status.success() => {
            info!(event = "core.notify.send_completed", title = title);
        }
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(
                event = "core.notify.send_failed",
                title = title,
                stderr = %stderr,
            );
        }
        Err(e) => {
            warn!(
                event = "core.notify.send_failed",
                title = title,
                error = %e,
            );
        }
    }
}

#[cfg(target_os = "linux")]
fn send_platform_notification(title: &str, message: &str) {
    match which::which("notify-send") {
        Ok(_) => {}
        Err(which::Error::CannotFindBinaryPath) => {
            debug!(
                event = "core.notify.send_skipped",
                reason = "notify-send not found",
            );
            return;
        }
        Err(e) => {
            warn!(
                event = "core.notify.send_failed",
                title = title,
                error = %e,
            );
            return;
        }
    }

    match std::process::Command::new("notify-send")
        .args(["--app-name", "pomo"])
        .arg(title)
        .arg(message)
        .output()
    {
        Ok(output) if output.status.success() => {
            info!(event = "core.notify.send_completed", title = title);
        }
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(
                event = "core.notify.send_failed",
                title = title,
                stderr = %stderr,
            );
        }
        Err(e) => {
            warn!(
                event = "core.notify.send_failed",
                title = title,
                error = %e,
            );
        }
    }
}

#[cfg(not(any(target_os = "macos", target_os = "linux")))]
fn send_platform_notification(_title: &str, _message: &str) {
    debug!(
        event = "core.notify.send_skipped",
        reason = "unsupported platform",
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::new();
        notifier.notify("First", "one");
        notifier.notify("Second", "two");
        assert_eq!(
            notifier.sent(),
            vec![
                ("First".to_string(), "one".to_string()),
                ("Second".to_string(), "two".to_string()),
            ]
        );
    }

    /// Records after a fixed delay, like a notification tool that hangs.
    struct SlowNotifier {
        delay: Duration,
        inner: RecordingNotifier,
    }

    impl Notifier for SlowNotifier {
        fn notify(&self, title: &str, message: &str) {
            thread::sleep(self.delay);
            self.inner.notify(title, message);
        }
    }

    #[test]
    fn test_background_notifier_does_not_block_caller() {
        let slow = Arc::new(SlowNotifier {
            delay: Duration::from_millis(300),
            inner: RecordingNotifier::new(),
        });
        let notifier = BackgroundNotifier::new(slow.clone());

        let started = Instant::now();
        notifier.notify("First", "one");
        notifier.notify("Second", "two");
        assert!(
            started.elapsed() < Duration::from_millis(200),
            "notify blocked for {:?}",
            started.elapsed()
        );

        let deadline = Instant::now() + Duration::from_secs(5);
        while slow.inner.sent().len() < 2 {
            assert!(Instant::now() < deadline, "notifications never delivered");
            thread::sleep(Duration::from_millis(20));
        }
        assert_eq!(
            slow.inner.sent(),
            vec![
                ("First".to_string(), "one".to_string()),
                ("Second".to_string(), "two".to_string()),
            ]
        );
    }

    #[test]
    fn test_disabled_desktop_notifier_is_silent() {
        // Must return without shelling out
        DesktopNotifier::new(false).notify("Title", "Body");
    }

    #[test]
    fn test_applescript_escape() {
        assert_eq!(applescript_escape(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(applescript_escape("a\\b"), "a\\\\b");
        assert_eq!(applescript_escape("line\nbreak"), "line\\nbreak");
    }

    #[test]
    fn test_send_notification_does_not_panic() {
        // Should never panic regardless of platform or tool availability
        send_notification("Test Title", "Test message body");
    }
}
