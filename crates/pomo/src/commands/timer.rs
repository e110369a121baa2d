use clap::ArgMatches;
use tracing::{error, info};

use pomo_core::config::Config;

use super::{block_on, connect, load_config_with_warning, print_daemon_hint};
use crate::display::render_snapshot;

pub(crate) fn handle_start_command(
    _matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.start_started");
    send_and_report(TimerAction::Start)
}

pub(crate) fn handle_stop_command(_matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.stop_started");
    send_and_report(TimerAction::Stop)
}

pub(crate) fn handle_shutdown_command(
    _matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.shutdown_started");

    let paths = Config::new();
    let config = load_config_with_warning(&paths);

    let result = block_on(async {
        let mut client = connect(&paths, &config).await?;
        client.shutdown().await
    })?;

    match result {
        Ok(()) => {
            println!("Timer daemon stopped.");
            info!(event = "cli.shutdown_completed");
            Ok(())
        }
        Err(e) => {
            print_daemon_hint(&e);
            error!(event = "cli.shutdown_failed", error = %e);
            Err(Box::new(e))
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum TimerAction {
    Start,
    Stop,
}

impl TimerAction {
    fn name(self) -> &'static str {
        match self {
            TimerAction::Start => "start",
            TimerAction::Stop => "stop",
        }
    }
}

/// Send a start/stop request, then print the resulting state.
fn send_and_report(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let paths = Config::new();
    let config = load_config_with_warning(&paths);

    let result = block_on(async {
        let mut client = connect(&paths, &config).await?;
        match action {
            TimerAction::Start => client.start_timer().await?,
            TimerAction::Stop => client.stop_timer().await?,
        }
        client.get_timer_state().await
    })?;

    match result {
        Ok(snapshot) => {
            println!("{}", render_snapshot(&snapshot));
            info!(
                event = "cli.timer_request_completed",
                action = action.name(),
                time_left = snapshot.time_left,
                is_running = snapshot.is_running,
            );
            Ok(())
        }
        Err(e) => {
            print_daemon_hint(&e);
            error!(event = "cli.timer_request_failed", action = action.name(), error = %e);
            Err(Box::new(e))
        }
    }
}
