use clap::ArgMatches;
use tracing::{error, info};

use pomo_core::config::Config;
use pomo_core::events;
use pomo_daemon::DaemonConfig;

use super::{block_on, load_config_with_warning};

pub(crate) fn handle_daemon_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let paths = Config::new();
    let mut config = load_config_with_warning(&paths);

    if let Some(minutes) = matches.get_one::<u64>("work-minutes") {
        config.timer.work_minutes = Some(*minutes);
    }
    if let Some(minutes) = matches.get_one::<u64>("break-minutes") {
        config.timer.break_minutes = Some(*minutes);
    }
    config.validate()?;

    let daemon_config = DaemonConfig::from_config(&paths, &config);
    info!(
        event = "cli.daemon.start_started",
        work_secs = daemon_config.durations.work_secs,
        break_secs = daemon_config.durations.break_secs,
        socket = %daemon_config.socket_path.display(),
    );

    match block_on(pomo_daemon::run_server(daemon_config))? {
        Ok(()) => {
            events::log_app_shutdown();
            Ok(())
        }
        Err(e) => {
            eprintln!("Failed to run timer daemon: {}", e);
            error!(event = "cli.daemon.start_failed", error = %e);
            Err(Box::new(e))
        }
    }
}
