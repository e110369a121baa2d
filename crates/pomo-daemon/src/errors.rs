use pomo_core::errors::PomoError;

#[derive(Debug, thiserror::Error)]
pub enum DaemonError {
    #[error("Daemon is not running")]
    NotRunning,

    #[error("Daemon is already running (socket {0})")]
    AlreadyRunning(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("IPC protocol error: {0}")]
    ProtocolError(String),

    #[error("Message exceeds the {limit} byte limit")]
    MessageTooLarge { limit: usize },

    #[error("Timer worker is not available")]
    TimerUnavailable,

    #[error("Daemon returned error {code}: {message}")]
    Remote { code: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DaemonError {
    /// Wire error code sent to clients in `error` messages.
    pub fn wire_code(&self) -> &'static str {
        match self {
            DaemonError::NotRunning => "not_running",
            DaemonError::AlreadyRunning(_) => "already_running",
            DaemonError::ConnectionFailed(_) => "connection_failed",
            DaemonError::ProtocolError(_) => "invalid_message",
            DaemonError::MessageTooLarge { .. } => "message_too_large",
            DaemonError::TimerUnavailable => "timer_unavailable",
            DaemonError::Remote { .. } => "remote_error",
            DaemonError::Io(_) => "io_error",
        }
    }
}

impl PomoError for DaemonError {
    fn error_code(&self) -> &'static str {
        match self {
            DaemonError::NotRunning => "DAEMON_NOT_RUNNING",
            DaemonError::AlreadyRunning(_) => "DAEMON_ALREADY_RUNNING",
            DaemonError::ConnectionFailed(_) => "DAEMON_CONNECTION_FAILED",
            DaemonError::ProtocolError(_) => "DAEMON_PROTOCOL_ERROR",
            DaemonError::MessageTooLarge { .. } => "DAEMON_MESSAGE_TOO_LARGE",
            DaemonError::TimerUnavailable => "DAEMON_TIMER_UNAVAILABLE",
            DaemonError::Remote { .. } => "DAEMON_ERROR",
            DaemonError::Io(_) => "DAEMON_IO_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            DaemonError::NotRunning | DaemonError::AlreadyRunning(_)
        )
    }
}
