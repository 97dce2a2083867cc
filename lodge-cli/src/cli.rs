//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lodge::Role;

use crate::commands::{
    AvailabilityCommand, CancelCommand, CompletionsCommand, ConfirmCommand, DeleteCommand,
    InitCommand, ListCommand, PublishDayCommand, PublishRangeCommand, RegisterPropertyCommand,
    ReserveCommand, SetStatusCommand, ShowCommand,
};

/// Command-line tool for property availability and bookings.
#[derive(Parser)]
#[command(name = "lodge")]
#[command(version, about = "Publish property availability and manage bookings", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "LODGE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "LODGE_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u64>,

    /// Disable automatic database initialization
    #[arg(long, global = true, env = "LODGE_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    /// User performing the command
    #[arg(long, value_name = "USER", global = true, env = "LODGE_ACTOR")]
    pub actor: Option<String>,

    /// Role of the acting user: user, host or admin
    #[arg(long, value_name = "ROLE", global = true, env = "LODGE_ROLE", default_value = "user")]
    pub role: Role,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize lodge data directory and database
    Init(InitCommand),

    /// Register or update a property
    RegisterProperty(RegisterPropertyCommand),

    /// Publish availability for one day
    PublishDay(PublishDayCommand),

    /// Publish availability for a range of days
    PublishRange(PublishRangeCommand),

    /// Show published days for a property
    Availability(AvailabilityCommand),

    /// Reserve a range of days
    Reserve(ReserveCommand),

    /// Change a booking's status
    SetStatus(SetStatusCommand),

    /// Confirm a pending booking
    Confirm(ConfirmCommand),

    /// Cancel a booking and release its days
    Cancel(CancelCommand),

    /// Permanently delete a booking
    Delete(DeleteCommand),

    /// Show one booking
    Show(ShowCommand),

    /// List bookings
    List(ListCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
