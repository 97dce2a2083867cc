//! Reserve command implementation.
//!
//! Books an inclusive range of days for the acting user and prints the new
//! booking's id on stdout so scripts can capture it.

use chrono::NaiveDate;
use clap::Args;
use lodge::calendar::parse_day;
use lodge::operations::{ReserveOptions, ReservePlan};
use lodge::{DateRange, Error, PlanExecutor, PropertyId};

use crate::error::CliError;
use crate::utils::{
    current_actor, load_configuration, open_database, print_dry_run, print_warnings, GlobalOptions,
};

/// Reserve a range of days at a property.
#[derive(Args)]
pub struct ReserveCommand {
    /// Property identifier
    #[arg(value_name = "PROPERTY")]
    pub property: PropertyId,

    /// Check-in day (YYYY-MM-DD)
    #[arg(value_name = "START", value_parser = parse_day)]
    pub start: NaiveDate,

    /// Last night of the stay, inclusive (YYYY-MM-DD)
    #[arg(value_name = "END", value_parser = parse_day)]
    pub end: NaiveDate,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl ReserveCommand {
    /// Execute the reserve command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let range = DateRange::new(self.start, self.end).map_err(Error::from)?;
        let actor = current_actor(global)?;
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let options = ReserveOptions::new(actor, self.property, range);
        let plan = ReservePlan::new(options, &config).build_plan(db.connection())?;

        if self.dry_run {
            print_dry_run(&plan, global);
            return Ok(());
        }

        let result = PlanExecutor::new(&mut db).execute(&plan)?;

        if let Some(booking) = &result.booking {
            println!("{}", booking.id());
            if !global.quiet {
                eprintln!(
                    "Reserved {} for {} ({} night(s), total {})",
                    booking.property_id(),
                    booking.dates(),
                    booking.dates().len(),
                    booking.total_price()
                );
            }
        }

        print_warnings(&result.warnings, global);
        Ok(())
    }
}
