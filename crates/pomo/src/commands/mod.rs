use std::future::Future;

use clap::ArgMatches;
use tracing::{error, warn};

use pomo_core::config::{Config, PomoConfig};
use pomo_core::events;
use pomo_daemon::{DaemonClient, DaemonError};

mod completions;
mod daemon;
mod status;
mod timer;
mod todo;

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup();

    let result = match matches.subcommand() {
        Some(("daemon", sub_matches)) => daemon::handle_daemon_command(sub_matches),
        Some(("status", sub_matches)) => status::handle_status_command(sub_matches),
        Some(("watch", sub_matches)) => status::handle_watch_command(sub_matches),
        Some(("start", sub_matches)) => timer::handle_start_command(sub_matches),
        Some(("stop", sub_matches)) => timer::handle_stop_command(sub_matches),
        Some(("shutdown", sub_matches)) => timer::handle_shutdown_command(sub_matches),
        Some(("todo", sub_matches)) => todo::handle_todo_command(sub_matches),
        Some(("completions", sub_matches)) => {
            completions::handle_completions_command(sub_matches)
        }
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    };

    if let Err(e) = &result {
        events::log_app_error(e.as_ref());
    }
    result
}

/// Load config, warning on stderr and falling back to defaults on error.
fn load_config_with_warning(paths: &Config) -> PomoConfig {
    match PomoConfig::load_hierarchy(paths) {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Could not load config: {}. Using defaults.\n\
                 Tip: Check {} for syntax errors.",
                e,
                paths.config_path().display()
            );
            warn!(
                event = "cli.config.load_failed",
                error = %e,
                "Config load failed, using defaults"
            );
            PomoConfig::default()
        }
    }
}

/// Run an async panel operation on a fresh runtime.
fn block_on<F: Future>(future: F) -> Result<F::Output, Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(future))
}

/// Connect to the daemon using the configured socket path.
async fn connect(paths: &Config, config: &PomoConfig) -> Result<DaemonClient, DaemonError> {
    let socket_path = config.socket_path(paths);
    DaemonClient::connect(&socket_path).await
}

/// Print a hint for a daemon that is not reachable.
fn print_daemon_hint(e: &DaemonError) {
    match e {
        DaemonError::NotRunning => {
            eprintln!("Timer daemon is not running. Start it with: pomo daemon");
        }
        other => eprintln!("Could not reach the timer daemon: {}", other),
    }
}
