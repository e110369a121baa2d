use clap::{Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("pomo")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Pomodoro timer with a companion todo list")
        .long_about("pomo runs a background timer daemon that alternates 25-minute work sessions with 5-minute breaks, counts completed pomodoros per day, and notifies you at every transition. The other subcommands are panels that talk to the daemon or edit the todo list.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("daemon")
                .about("Run the timer daemon in the foreground")
                .arg(
                    Arg::new("work-minutes")
                        .long("work-minutes")
                        .help("Length of a work session in minutes (overrides config)")
                        .value_parser(clap::value_parser!(u64).range(1..))
                )
                .arg(
                    Arg::new("break-minutes")
                        .long("break-minutes")
                        .help("Length of a break in minutes (overrides config)")
                        .value_parser(clap::value_parser!(u64).range(1..))
                )
        )
        .subcommand(
            Command::new("status")
                .about("Show the current timer state")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(Command::new("start").about("Start or resume the timer"))
        .subcommand(Command::new("stop").about("Pause the timer, keeping the remaining time"))
        .subcommand(Command::new("watch").about("Follow the timer live until interrupted"))
        .subcommand(Command::new("shutdown").about("Stop the timer daemon"))
        .subcommand(
            Command::new("todo")
                .about("Manage the todo list")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    Command::new("add")
                        .about("Append a todo item")
                        .arg(
                            Arg::new("text")
                                .help("Todo text")
                                .required(true)
                                .num_args(1..)
                                .index(1)
                        )
                )
                .subcommand(
                    Command::new("list")
                        .about("List todo items")
                        .arg(
                            Arg::new("json")
                                .long("json")
                                .help("Output in JSON format")
                                .action(ArgAction::SetTrue)
                        )
                )
                .subcommand(
                    Command::new("toggle")
                        .about("Flip an item between done and not done")
                        .arg(
                            Arg::new("position")
                                .help("Item number as shown by 'pomo todo list'")
                                .required(true)
                                .value_parser(clap::value_parser!(usize))
                                .index(1)
                        )
                )
                .subcommand(
                    Command::new("delete")
                        .about("Remove an item")
                        .arg(
                            Arg::new("position")
                                .help("Item number as shown by 'pomo todo list'")
                                .required(true)
                                .value_parser(clap::value_parser!(usize))
                                .index(1)
                        )
                )
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(
                    Arg::new("shell")
                        .help("Target shell")
                        .required(true)
                        .value_parser(clap::value_parser!(clap_complete::Shell))
                        .index(1)
                )
        )
}
