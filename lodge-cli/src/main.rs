//! Main entry point for the lodge CLI.
//!
//! This is the command-line interface for the lodge availability and
//! booking engine. Hosts publish days, guests reserve ranges, and bookings
//! move through `PENDING`, `CONFIRMED` and `CANCELLED`.

mod cli;
mod commands;
mod error;
mod output;
mod utils;

use clap::Parser;
use cli::{Cli, Command};
use utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    lodge::init_logger(cli.verbose, cli.quiet).install();

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        busy_timeout: cli.busy_timeout,
        disable_autoinit: cli.disable_autoinit,
        actor: cli.actor,
        role: cli.role,
    };

    let result = match cli.command {
        Command::Init(cmd) => cmd.execute(&global),
        Command::RegisterProperty(cmd) => cmd.execute(&global),
        Command::PublishDay(cmd) => cmd.execute(&global),
        Command::PublishRange(cmd) => cmd.execute(&global),
        Command::Availability(cmd) => cmd.execute(&global),
        Command::Reserve(cmd) => cmd.execute(&global),
        Command::SetStatus(cmd) => cmd.execute(&global),
        Command::Confirm(cmd) => cmd.execute(&global),
        Command::Cancel(cmd) => cmd.execute(&global),
        Command::Delete(cmd) => cmd.execute(&global),
        Command::Show(cmd) => cmd.execute(&global),
        Command::List(cmd) => cmd.execute(&global),
        Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
