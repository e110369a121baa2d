use chrono::Local;
use pomo_core::{TimerEvent, TimerService, TimerSnapshot};
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::errors::DaemonError;
use crate::types::DaemonConfig;

const COMMAND_QUEUE_DEPTH: usize = 32;

/// Request handled by the timer task.
#[derive(Debug)]
pub enum TimerCommand {
    Start {
        reply: oneshot::Sender<TimerSnapshot>,
    },
    Stop {
        reply: oneshot::Sender<TimerSnapshot>,
    },
    GetState {
        reply: oneshot::Sender<TimerSnapshot>,
    },
}

/// Cloneable handle to the timer task.
#[derive(Debug, Clone)]
pub struct TimerHandle {
    commands: mpsc::Sender<TimerCommand>,
    updates: broadcast::Sender<TimerSnapshot>,
}

impl TimerHandle {
    pub async fn start(&self) -> Result<TimerSnapshot, DaemonError> {
        self.call(|reply| TimerCommand::Start { reply }).await
    }

    pub async fn stop(&self) -> Result<TimerSnapshot, DaemonError> {
        self.call(|reply| TimerCommand::Stop { reply }).await
    }

    pub async fn state(&self) -> Result<TimerSnapshot, DaemonError> {
        self.call(|reply| TimerCommand::GetState { reply }).await
    }

    /// Receive every snapshot broadcast after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<TimerSnapshot> {
        self.updates.subscribe()
    }

    async fn call(
        &self,
        make: impl FnOnce(oneshot::Sender<TimerSnapshot>) -> TimerCommand,
    ) -> Result<TimerSnapshot, DaemonError> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(make(reply))
            .await
            .map_err(|_| DaemonError::TimerUnavailable)?;
        rx.await.map_err(|_| DaemonError::TimerUnavailable)
    }
}

/// Move `service` into a new task and return a handle to it.
///
/// The task exits when `shutdown` is cancelled or every handle is dropped.
pub fn spawn_timer_worker(
    service: TimerService,
    config: &DaemonConfig,
    shutdown: CancellationToken,
) -> (TimerHandle, JoinHandle<()>) {
    let (commands_tx, commands_rx) = mpsc::channel(COMMAND_QUEUE_DEPTH);
    let (updates_tx, _) = broadcast::channel(config.broadcast_capacity.max(1));

    let worker = TimerWorker {
        service,
        commands: commands_rx,
        updates: updates_tx.clone(),
        ticker: None,
        tick_period: config.tick_interval(),
        midnight_period: config.midnight_check_interval(),
    };
    let join = tokio::spawn(worker.run(shutdown));

    let handle = TimerHandle {
        commands: commands_tx,
        updates: updates_tx,
    };
    (handle, join)
}

struct TimerWorker {
    service: TimerService,
    commands: mpsc::Receiver<TimerCommand>,
    updates: broadcast::Sender<TimerSnapshot>,
    /// Present only while the timer is running.
    ticker: Option<Interval>,
    tick_period: std::time::Duration,
    midnight_period: std::time::Duration,
}

impl TimerWorker {
    async fn run(mut self, shutdown: CancellationToken) {
        info!(event = "daemon.timer.worker_started");

        let mut midnight = interval(self.midnight_period);
        midnight.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                cmd = self.commands.recv() => {
                    match cmd {
                        Some(cmd) => self.handle_command(cmd),
                        None => break,
                    }
                }
                _ = next_tick(&mut self.ticker) => {
                    let events = self.service.tick(Local::now());
                    self.publish(events);
                }
                _ = midnight.tick() => {
                    let events = self.service.sweep_midnight(Local::now());
                    self.publish(events);
                }
                _ = shutdown.cancelled() => break,
            }
        }

        if self.service.is_running() {
            let events = self.service.stop();
            self.publish(events);
        }
        info!(event = "daemon.timer.worker_stopped");
    }

    fn handle_command(&mut self, cmd: TimerCommand) {
        let (events, reply) = match cmd {
            TimerCommand::Start { reply } => (self.service.start(Local::now()), reply),
            TimerCommand::Stop { reply } => (self.service.stop(), reply),
            TimerCommand::GetState { reply } => (Vec::new(), reply),
        };
        self.publish(events);

        // Requester may have gone away; nothing to do then.
        let _ = reply.send(self.service.snapshot());
    }

    /// Broadcast each event's snapshot and keep the ticker in step with
    /// the running flag.
    fn publish(&mut self, events: Vec<TimerEvent>) {
        for event in &events {
            debug!(
                event = "daemon.timer.broadcast",
                kind = event.name(),
                time_left = event.snapshot().time_left,
                subscribers = self.updates.receiver_count(),
            );
            // Err only means nobody is subscribed.
            let _ = self.updates.send(*event.snapshot());
        }
        self.sync_ticker();
    }

    fn sync_ticker(&mut self) {
        match (self.service.is_running(), self.ticker.is_some()) {
            (true, false) => {
                let mut ticker =
                    interval_at(Instant::now() + self.tick_period, self.tick_period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
                self.ticker = Some(ticker);
            }
            (false, true) => self.ticker = None,
            _ => {}
        }
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
