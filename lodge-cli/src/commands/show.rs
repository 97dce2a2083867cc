//! Show command implementation.

use clap::Args;
use lodge::config::OutputFormat;
use lodge::operations::queries;
use lodge::BookingId;

use crate::error::CliError;
use crate::output::write_booking;
use crate::utils::{current_actor, load_configuration, open_database, GlobalOptions};

/// Show one booking visible to the actor.
#[derive(Args)]
pub struct ShowCommand {
    /// Booking id
    #[arg(value_name = "BOOKING")]
    pub booking: BookingId,

    /// Output format: json for an object, anything else for `key: value` lines
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

impl ShowCommand {
    /// Execute the show command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let actor = current_actor(global)?;
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let booking = queries::get_booking(db.connection(), &actor, self.booking)?;
        write_booking(&booking, self.format.unwrap_or(config.output_format()))
    }
}
