use clap::ArgMatches;
use tracing::{info, warn};

use pomo_core::TimerSnapshot;
use pomo_core::config::{Config, PomoConfig};
use pomo_daemon::DaemonError;

use super::{block_on, connect, load_config_with_warning, print_daemon_hint};
use crate::display::render_snapshot;

/// Print the current snapshot.
///
/// An unreachable daemon is not an error here: the panel shows the
/// default state (25:00, Work Mode, idle) plus a hint on stderr.
pub(crate) fn handle_status_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    info!(event = "cli.status_started", json_output = json_output);

    let paths = Config::new();
    let config = load_config_with_warning(&paths);

    let result = block_on(async {
        let mut client = connect(&paths, &config).await?;
        client.get_timer_state().await
    })?;

    let snapshot = match result {
        Ok(snapshot) => snapshot,
        Err(e) => {
            print_daemon_hint(&e);
            warn!(event = "cli.status_daemon_unreachable", error = %e);
            TimerSnapshot::default()
        }
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{}", render_snapshot(&snapshot));
    }

    info!(
        event = "cli.status_completed",
        time_left = snapshot.time_left,
        is_running = snapshot.is_running,
    );
    Ok(())
}

/// Subscribe and print every pushed snapshot until the daemon goes away
/// or the user interrupts.
pub(crate) fn handle_watch_command(
    _matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.watch_started");

    let paths = Config::new();
    let config = load_config_with_warning(&paths);

    let result = block_on(follow_updates(&paths, &config))?;

    match result {
        Ok(()) => {
            info!(event = "cli.watch_completed");
            Ok(())
        }
        Err(e) => {
            print_daemon_hint(&e);
            Err(Box::new(e))
        }
    }
}

async fn follow_updates(paths: &Config, config: &PomoConfig) -> Result<(), DaemonError> {
    let mut client = connect(paths, config).await?;
    client.subscribe().await?;

    loop {
        tokio::select! {
            update = client.next_update() => {
                match update? {
                    Some(snapshot) => println!("{}", render_snapshot(&snapshot)),
                    None => {
                        println!("Timer daemon closed the connection.");
                        return Ok(());
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => return Ok(()),
        }
    }
}
