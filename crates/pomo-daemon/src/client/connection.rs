use std::collections::VecDeque;
use std::path::Path;

use pomo_core::TimerSnapshot;
use tokio::io::BufReader;
use tokio::net::UnixStream;
use tokio::net::unix::{OwnedReadHalf, OwnedWriteHalf};
use tracing::debug;

use crate::errors::DaemonError;
use crate::protocol::codec::{read_message, write_message};
use crate::protocol::messages::{ClientMessage, DaemonMessage};

/// Panel-side connection to the timer daemon.
///
/// Requests are answered in order, but after `subscribe` the daemon
/// interleaves `timerUpdate` pushes on the same socket. Pushes that arrive
/// while waiting for a response are queued and returned by `next_update`.
pub struct DaemonClient {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
    next_id: u64,
    pending_updates: VecDeque<TimerSnapshot>,
}

impl DaemonClient {
    /// Connect to the daemon at the given socket path.
    pub async fn connect(socket_path: &Path) -> Result<Self, DaemonError> {
        let stream = UnixStream::connect(socket_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::ConnectionRefused
                || e.kind() == std::io::ErrorKind::NotFound
            {
                DaemonError::NotRunning
            } else {
                DaemonError::ConnectionFailed(e.to_string())
            }
        })?;

        let (reader, writer) = stream.into_split();

        debug!(
            event = "daemon.client.connected",
            socket = %socket_path.display(),
        );

        Ok(Self {
            reader: BufReader::new(reader),
            writer,
            next_id: 1,
            pending_updates: VecDeque::new(),
        })
    }

    fn next_id(&mut self) -> String {
        let id = self.next_id;
        self.next_id += 1;
        format!("req-{}", id)
    }

    /// Send a request and wait for the response carrying the same id.
    async fn request(&mut self, msg: &ClientMessage) -> Result<DaemonMessage, DaemonError> {
        write_message(&mut self.writer, msg).await?;

        loop {
            let response: DaemonMessage = read_message(&mut self.reader)
                .await?
                .ok_or_else(|| DaemonError::ConnectionFailed("connection closed".to_string()))?;

            let response_id = match &response {
                DaemonMessage::TimerUpdate { snapshot } => {
                    self.pending_updates.push_back(*snapshot);
                    continue;
                }
                DaemonMessage::Ack { id, .. }
                | DaemonMessage::TimerState { id, .. }
                | DaemonMessage::Error { id, .. } => id,
            };

            // An empty id answers a request the daemon could not parse.
            if response_id == msg.id() || response_id.is_empty() {
                return Ok(response);
            }
            debug!(
                event = "daemon.client.unmatched_response",
                expected = msg.id(),
                response = ?response,
            );
        }
    }

    fn check_error(response: &DaemonMessage) -> Result<(), DaemonError> {
        if let DaemonMessage::Error { code, message, .. } = response {
            return Err(match code.as_str() {
                "timer_unavailable" => DaemonError::TimerUnavailable,
                "invalid_message" => DaemonError::ProtocolError(message.clone()),
                _ => DaemonError::Remote {
                    code: code.clone(),
                    message: message.clone(),
                },
            });
        }
        Ok(())
    }

    async fn expect_ack(&mut self, msg: ClientMessage) -> Result<(), DaemonError> {
        let response = self.request(&msg).await?;
        Self::check_error(&response)?;

        match response {
            DaemonMessage::Ack { success: true, .. } => Ok(()),
            DaemonMessage::Ack { success: false, id } => Err(DaemonError::Remote {
                code: "request_failed".to_string(),
                message: format!("request {} was not successful", id),
            }),
            _ => Err(DaemonError::ProtocolError(
                "unexpected response type".to_string(),
            )),
        }
    }

    /// Begin or resume the countdown.
    pub async fn start_timer(&mut self) -> Result<(), DaemonError> {
        let id = self.next_id();
        self.expect_ack(ClientMessage::StartTimer { id }).await
    }

    /// Pause the countdown.
    pub async fn stop_timer(&mut self) -> Result<(), DaemonError> {
        let id = self.next_id();
        self.expect_ack(ClientMessage::StopTimer { id }).await
    }

    /// Fetch the current snapshot.
    pub async fn get_timer_state(&mut self) -> Result<TimerSnapshot, DaemonError> {
        let id = self.next_id();
        let response = self.request(&ClientMessage::GetTimerState { id }).await?;
        Self::check_error(&response)?;

        if let DaemonMessage::TimerState { snapshot, .. } = response {
            Ok(snapshot)
        } else {
            Err(DaemonError::ProtocolError(
                "unexpected response type".to_string(),
            ))
        }
    }

    /// Start receiving `timerUpdate` pushes. The first push carries the
    /// current snapshot; read pushes with `next_update`.
    pub async fn subscribe(&mut self) -> Result<(), DaemonError> {
        let id = self.next_id();
        self.expect_ack(ClientMessage::Subscribe { id }).await
    }

    pub async fn ping(&mut self) -> Result<(), DaemonError> {
        let id = self.next_id();
        self.expect_ack(ClientMessage::Ping { id }).await
    }

    /// Ask the daemon to exit.
    pub async fn shutdown(&mut self) -> Result<(), DaemonError> {
        let id = self.next_id();
        self.expect_ack(ClientMessage::Shutdown { id }).await
    }

    /// Next pushed snapshot, or `None` when the daemon closed the connection.
    pub async fn next_update(&mut self) -> Result<Option<TimerSnapshot>, DaemonError> {
        if let Some(snapshot) = self.pending_updates.pop_front() {
            return Ok(Some(snapshot));
        }

        loop {
            let msg: Option<DaemonMessage> = read_message(&mut self.reader).await?;
            match msg {
                Some(DaemonMessage::TimerUpdate { snapshot }) => return Ok(Some(snapshot)),
                Some(other) => {
                    debug!(event = "daemon.client.unexpected_message", message = ?other);
                }
                None => return Ok(None),
            }
        }
    }
}
