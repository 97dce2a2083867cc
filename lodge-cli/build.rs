//! Build script for lodge-cli.
//!
//! Generates the `lodge.1` man page into `OUT_DIR` with clap_mangen.
//!
//! Build scripts cannot depend on the crate being built, so the command
//! structure is declared here by hand.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// Keep this synchronized with src/cli.rs.
fn build_cli() -> Command {
    Command::new("lodge")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Publish property availability and manage bookings")
        .long_about(
            "Command-line tool for publishing day-level property availability, \
             reserving date ranges without double-booking, and managing the \
             booking lifecycle",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("LODGE_DATA_DIR"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the busy timeout (in seconds)")
                .value_name("SECONDS")
                .global(true)
                .env("LODGE_BUSY_TIMEOUT"),
        )
        .arg(
            Arg::new("disable-autoinit")
                .long("disable-autoinit")
                .help("Disable automatic database initialization")
                .global(true)
                .action(ArgAction::SetTrue)
                .env("LODGE_DISABLE_AUTOINIT"),
        )
        .arg(
            Arg::new("actor")
                .long("actor")
                .help("User performing the command")
                .value_name("USER")
                .global(true)
                .env("LODGE_ACTOR"),
        )
        .arg(
            Arg::new("role")
                .long("role")
                .help("Role of the acting user: user, host or admin")
                .value_name("ROLE")
                .global(true)
                .env("LODGE_ROLE"),
        )
        .subcommands(vec![
            Command::new("init")
                .about("Initialize lodge data directory and database")
                .long_about("Create the data directory, the database and optionally a config file"),
            Command::new("register-property")
                .about("Register or update a property")
                .long_about("Record a property's owner and base nightly price"),
            Command::new("publish-day")
                .about("Publish availability for one day")
                .long_about("Create one availability row; fails if the day already exists"),
            Command::new("publish-range")
                .about("Publish availability for a range of days")
                .long_about("Create a row for every day in the range that has none yet"),
            Command::new("availability")
                .about("Show published days for a property")
                .long_about("List the availability rows of a property within a date range"),
            Command::new("reserve")
                .about("Reserve a range of days")
                .long_about("Atomically hold every day of an inclusive range and create a booking"),
            Command::new("set-status")
                .about("Change a booking's status")
                .long_about("Move a booking to PENDING, CONFIRMED or CANCELLED under role rules"),
            Command::new("confirm")
                .about("Confirm a pending booking")
                .long_about("Move a pending booking to CONFIRMED"),
            Command::new("cancel")
                .about("Cancel a booking and release its days")
                .long_about("Move a booking to CANCELLED and reopen the days it held"),
            Command::new("delete")
                .about("Permanently delete a booking")
                .long_about("Release any held days and remove the booking record"),
            Command::new("show")
                .about("Show one booking")
                .long_about("Display a booking visible to the acting user"),
            Command::new("list")
                .about("List bookings")
                .long_about("List your bookings, a property's bookings, or all bookings"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() -> std::io::Result<()> {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").map_err(std::io::Error::other)?);
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let mut buffer = Vec::new();
    Man::new(build_cli()).render(&mut buffer)?;
    fs::write(man_dir.join("lodge.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
