pub mod connection;

use std::path::Path;
use std::sync::Arc;

use chrono::Local;
use pomo_core::storage::{self, FileStore};
use pomo_core::{BackgroundNotifier, DesktopNotifier, TimerService};
use tokio::net::{UnixListener, UnixStream};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::errors::DaemonError;
use crate::timer::spawn_timer_worker;
use crate::types::DaemonConfig;

/// Run the daemon until a `shutdown` request or SIGINT/SIGTERM.
///
/// Seeds storage defaults, spawns the timer task, then accepts panel
/// connections on the Unix socket. The socket file is removed on exit.
pub async fn run_server(config: DaemonConfig) -> Result<(), DaemonError> {
    info!(
        event = "daemon.server.start_started",
        socket = %config.socket_path.display(),
        data_dir = %config.data_dir.display(),
    );

    prepare_socket_path(&config.socket_path).await?;

    let store = Arc::new(FileStore::new(&config.data_dir));
    match storage::seed_defaults(store.as_ref()) {
        Ok(seeded) if !seeded.is_empty() => {
            info!(event = "daemon.server.storage_seeded", keys = ?seeded);
        }
        Ok(_) => {}
        Err(e) => {
            warn!(event = "daemon.server.storage_seed_failed", error = %e);
        }
    }

    // Notification tools can hang; keep them off the timer task
    let desktop = Arc::new(DesktopNotifier::new(config.notifications_enabled));
    let notifier = Arc::new(BackgroundNotifier::new(desktop));
    let service = TimerService::new(config.durations, store, notifier, Local::now());

    let shutdown = CancellationToken::new();
    let (timer, worker) = spawn_timer_worker(service, &config, shutdown.clone());

    let listener = UnixListener::bind(&config.socket_path)?;
    info!(
        event = "daemon.server.start_completed",
        socket = %config.socket_path.display(),
        pid = std::process::id(),
    );

    tokio::spawn(watch_signals(shutdown.clone()));

    let mut next_connection_id: connection::ConnectionId = 0;
    loop {
        tokio::select! {
            accepted = listener.accept() => {
                match accepted {
                    Ok((stream, _addr)) => {
                        next_connection_id += 1;
                        tokio::spawn(connection::handle_connection(
                            stream,
                            next_connection_id,
                            timer.clone(),
                            shutdown.clone(),
                        ));
                    }
                    Err(e) => {
                        error!(event = "daemon.server.accept_failed", error = %e);
                    }
                }
            }
            _ = shutdown.cancelled() => break,
        }
    }

    info!(event = "daemon.server.stop_started");
    drop(listener);
    if let Err(e) = worker.await {
        error!(event = "daemon.server.worker_join_failed", error = %e);
    }
    if let Err(e) = tokio::fs::remove_file(&config.socket_path).await
        && e.kind() != std::io::ErrorKind::NotFound
    {
        warn!(
            event = "daemon.server.socket_cleanup_failed",
            socket = %config.socket_path.display(),
            error = %e,
        );
    }
    info!(event = "daemon.server.stop_completed");
    Ok(())
}

/// Create the socket's parent directory and clear a stale socket file.
///
/// Fails with `AlreadyRunning` when another daemon answers on the socket.
async fn prepare_socket_path(socket_path: &Path) -> Result<(), DaemonError> {
    if let Some(parent) = socket_path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    if !socket_path.exists() {
        return Ok(());
    }

    if UnixStream::connect(socket_path).await.is_ok() {
        return Err(DaemonError::AlreadyRunning(
            socket_path.display().to_string(),
        ));
    }

    warn!(
        event = "daemon.server.stale_socket_removed",
        socket = %socket_path.display(),
    );
    tokio::fs::remove_file(socket_path).await?;
    Ok(())
}

async fn watch_signals(shutdown: CancellationToken) {
    let mut sigterm =
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(signal) => signal,
            Err(e) => {
                warn!(event = "daemon.server.signal_install_failed", error = %e);
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = shutdown.cancelled() => return,
                }
                shutdown.cancel();
                return;
            }
        };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!(event = "daemon.server.signal_received", signal = "SIGINT");
        }
        _ = sigterm.recv() => {
            info!(event = "daemon.server.signal_received", signal = "SIGTERM");
        }
        _ = shutdown.cancelled() => return,
    }
    shutdown.cancel();
}
