//! Delete command implementation.

use clap::Args;
use lodge::operations::{DeleteOptions, DeletePlan};
use lodge::{BookingId, PlanExecutor};

use crate::error::CliError;
use crate::utils::{
    current_actor, load_configuration, open_database, print_dry_run, print_warnings, GlobalOptions,
};

/// Permanently delete a booking, releasing any days it still holds.
///
/// Guests may not delete a confirmed booking; cancel it instead.
#[derive(Args)]
pub struct DeleteCommand {
    /// Booking id
    #[arg(value_name = "BOOKING")]
    pub booking: BookingId,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl DeleteCommand {
    /// Execute the delete command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let actor = current_actor(global)?;
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let plan = DeletePlan::new(DeleteOptions::new(actor, self.booking))
            .build_plan(db.connection())?;

        if self.dry_run {
            print_dry_run(&plan, global);
            return Ok(());
        }

        let result = PlanExecutor::new(&mut db).execute(&plan)?;
        print_warnings(&result.warnings, global);

        if let Some(id) = result.deleted {
            if !global.quiet {
                eprintln!("Deleted booking {id}");
            }
        }
        Ok(())
    }
}
