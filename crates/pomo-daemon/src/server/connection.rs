use std::sync::Arc;

use pomo_core::TimerSnapshot;
use tokio::io::BufReader;
use tokio::net::UnixStream;
use tokio::net::unix::OwnedWriteHalf;
use tokio::sync::{Mutex, broadcast};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::errors::DaemonError;
use crate::protocol::codec::{read_message, write_message};
use crate::protocol::messages::{ClientMessage, DaemonMessage};
use crate::timer::TimerHandle;

pub type ConnectionId = u64;

/// Handle a single panel connection.
///
/// Reads JSONL requests, forwards them to the timer task and writes the
/// responses. After `subscribe`, a streaming task pushes `timerUpdate`
/// messages on the same socket while requests keep being served.
pub async fn handle_connection(
    stream: UnixStream,
    connection_id: ConnectionId,
    timer: TimerHandle,
    shutdown: CancellationToken,
) {
    debug!(
        event = "daemon.connection.accepted",
        connection_id = connection_id
    );

    let (reader, writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let writer = Arc::new(Mutex::new(writer));
    let mut streaming = false;

    loop {
        tokio::select! {
            result = read_message::<_, ClientMessage>(&mut reader) => {
                let response = match result {
                    Ok(Some(msg)) => {
                        dispatch_message(
                            msg,
                            connection_id,
                            &timer,
                            &writer,
                            &shutdown,
                            &mut streaming,
                        ).await
                    }
                    Ok(None) => {
                        debug!(
                            event = "daemon.connection.closed",
                            connection_id = connection_id,
                        );
                        break;
                    }
                    Err(DaemonError::ProtocolError(message)) => {
                        warn!(
                            event = "daemon.connection.invalid_message",
                            connection_id = connection_id,
                            error = %message,
                        );
                        Some(DaemonMessage::Error {
                            id: String::new(),
                            code: "invalid_message".to_string(),
                            message,
                        })
                    }
                    Err(e @ DaemonError::MessageTooLarge { .. }) => {
                        warn!(
                            event = "daemon.connection.oversized_message",
                            connection_id = connection_id,
                            error = %e,
                        );
                        // The rest of the line is still unread; report, then drop.
                        let rejection = error_response(String::new(), &e);
                        let mut w = writer.lock().await;
                        let _ = write_message(&mut *w, &rejection).await;
                        break;
                    }
                    Err(e) => {
                        warn!(
                            event = "daemon.connection.read_error",
                            connection_id = connection_id,
                            error = %e,
                        );
                        break;
                    }
                };

                if let Some(response) = response {
                    let mut w = writer.lock().await;
                    if let Err(e) = write_message(&mut *w, &response).await {
                        error!(
                            event = "daemon.connection.write_failed",
                            connection_id = connection_id,
                            error = %e,
                        );
                        break;
                    }
                }
            }
            _ = shutdown.cancelled() => {
                debug!(
                    event = "daemon.connection.shutdown",
                    connection_id = connection_id,
                );
                break;
            }
        }
    }
}

/// Dispatch a request to the timer task and build the response.
///
/// Returns `None` when the response was already written inline.
async fn dispatch_message(
    msg: ClientMessage,
    connection_id: ConnectionId,
    timer: &TimerHandle,
    writer: &Arc<Mutex<OwnedWriteHalf>>,
    shutdown: &CancellationToken,
    streaming: &mut bool,
) -> Option<DaemonMessage> {
    match msg {
        ClientMessage::StartTimer { id } => Some(match timer.start().await {
            Ok(_) => DaemonMessage::Ack { id, success: true },
            Err(e) => error_response(id, &e),
        }),

        ClientMessage::StopTimer { id } => Some(match timer.stop().await {
            Ok(_) => DaemonMessage::Ack { id, success: true },
            Err(e) => error_response(id, &e),
        }),

        ClientMessage::GetTimerState { id } => Some(match timer.state().await {
            Ok(snapshot) => DaemonMessage::TimerState { id, snapshot },
            Err(e) => error_response(id, &e),
        }),

        ClientMessage::Subscribe { id } => {
            if *streaming {
                return Some(DaemonMessage::Ack { id, success: true });
            }

            // Subscribe BEFORE reading the snapshot so no update between the
            // two is lost. A duplicate push is harmless.
            let rx = timer.subscribe();
            let snapshot = match timer.state().await {
                Ok(snapshot) => snapshot,
                Err(e) => return Some(error_response(id, &e)),
            };

            {
                let mut w = writer.lock().await;
                let ack = DaemonMessage::Ack { id, success: true };
                if let Err(e) = write_message(&mut *w, &ack).await {
                    warn!(
                        event = "daemon.connection.ack_write_failed",
                        connection_id = connection_id,
                        error = %e,
                    );
                    return None;
                }
                let current = DaemonMessage::TimerUpdate { snapshot };
                if let Err(e) = write_message(&mut *w, &current).await {
                    warn!(
                        event = "daemon.connection.snapshot_write_failed",
                        connection_id = connection_id,
                        error = %e,
                    );
                    return None;
                }
            }

            info!(
                event = "daemon.connection.subscribed",
                connection_id = connection_id
            );
            *streaming = true;

            let writer = writer.clone();
            let shutdown = shutdown.clone();
            tokio::spawn(async move {
                stream_updates(rx, connection_id, writer, shutdown).await;
            });

            None
        }

        ClientMessage::Ping { id } => Some(DaemonMessage::Ack { id, success: true }),

        ClientMessage::Shutdown { id } => {
            info!(
                event = "daemon.server.stop_requested",
                connection_id = connection_id
            );
            // Ack before cancelling so the requester sees the reply.
            {
                let mut w = writer.lock().await;
                let ack = DaemonMessage::Ack { id, success: true };
                if let Err(e) = write_message(&mut *w, &ack).await {
                    debug!(
                        event = "daemon.connection.ack_write_failed",
                        connection_id = connection_id,
                        error = %e,
                    );
                }
            }
            shutdown.cancel();
            None
        }
    }
}

fn error_response(id: String, e: &DaemonError) -> DaemonMessage {
    DaemonMessage::Error {
        id,
        code: e.wire_code().to_string(),
        message: e.to_string(),
    }
}

/// Push snapshots to one subscriber until it disconnects or the daemon stops.
async fn stream_updates(
    mut rx: broadcast::Receiver<TimerSnapshot>,
    connection_id: ConnectionId,
    writer: Arc<Mutex<OwnedWriteHalf>>,
    shutdown: CancellationToken,
) {
    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(snapshot) => {
                        let mut w = writer.lock().await;
                        let update = DaemonMessage::TimerUpdate { snapshot };
                        if let Err(e) = write_message(&mut *w, &update).await {
                            debug!(
                                event = "daemon.connection.stream_write_failed",
                                connection_id = connection_id,
                                error = %e,
                            );
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        // Only the latest snapshot matters; keep going.
                        warn!(
                            event = "daemon.connection.stream_lagged",
                            connection_id = connection_id,
                            skipped = skipped,
                        );
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        debug!(
                            event = "daemon.connection.stream_closed",
                            connection_id = connection_id,
                        );
                        break;
                    }
                }
            }
            _ = shutdown.cancelled() => break,
        }
    }
}
