//! Booking status commands.
//!
//! `set-status` accepts any target status; `confirm` and `cancel` are
//! shorthands for the two common transitions. Cancelling releases the
//! booking's days in the same transaction.

use clap::Args;
use lodge::config::OutputFormat;
use lodge::operations::{SetStatusOptions, SetStatusPlan};
use lodge::{BookingId, BookingStatus, PlanExecutor};

use crate::error::CliError;
use crate::output::write_booking;
use crate::utils::{
    current_actor, load_configuration, open_database, print_dry_run, print_warnings, GlobalOptions,
};

/// Change the status of a booking.
#[derive(Args)]
pub struct SetStatusCommand {
    /// Booking id
    #[arg(value_name = "BOOKING")]
    pub booking: BookingId,

    /// New status: PENDING, CONFIRMED or CANCELLED
    #[arg(value_name = "STATUS")]
    pub status: BookingStatus,

    /// Output format for the updated booking
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl SetStatusCommand {
    /// Execute the set-status command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        transition(global, self.booking, self.status, self.format, self.dry_run)
    }
}

/// Confirm a pending booking (hosts and admins).
#[derive(Args)]
pub struct ConfirmCommand {
    /// Booking id
    #[arg(value_name = "BOOKING")]
    pub booking: BookingId,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl ConfirmCommand {
    /// Execute the confirm command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        transition(global, self.booking, BookingStatus::Confirmed, None, self.dry_run)
    }
}

/// Cancel a booking and release its days.
#[derive(Args)]
pub struct CancelCommand {
    /// Booking id
    #[arg(value_name = "BOOKING")]
    pub booking: BookingId,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl CancelCommand {
    /// Execute the cancel command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        transition(global, self.booking, BookingStatus::Cancelled, None, self.dry_run)
    }
}

fn transition(
    global: &GlobalOptions,
    booking_id: BookingId,
    status: BookingStatus,
    format: Option<OutputFormat>,
    dry_run: bool,
) -> Result<(), CliError> {
    let actor = current_actor(global)?;
    let config = load_configuration(global)?;
    let mut db = open_database(global, &config)?;

    let plan = SetStatusPlan::new(SetStatusOptions::new(actor, booking_id, status))
        .build_plan(db.connection())?;

    if dry_run {
        print_dry_run(&plan, global);
        return Ok(());
    }

    let result = PlanExecutor::new(&mut db).execute(&plan)?;
    print_warnings(&result.warnings, global);

    match &result.booking {
        Some(booking) => write_booking(booking, format.unwrap_or(config.output_format())),
        None => Ok(()),
    }
}
