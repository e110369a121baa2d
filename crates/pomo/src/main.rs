use pomo_core::init_logging;

mod app;
mod commands;
mod display;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let app = app::build_cli();
    let matches = app.get_matches();

    // The daemon always logs; panel commands stay quiet unless -v is given
    let verbose = matches.get_flag("verbose");
    let is_daemon = matches!(matches.subcommand_name(), Some("daemon"));
    init_logging(!verbose && !is_daemon);

    commands::run_command(&matches)?;

    Ok(())
}
