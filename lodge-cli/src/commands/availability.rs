//! Availability command implementation.

use chrono::NaiveDate;
use clap::Args;
use lodge::calendar::parse_day;
use lodge::config::OutputFormat;
use lodge::operations::queries;
use lodge::{DateRange, Error, PropertyId};

use crate::error::CliError;
use crate::output::write_availability;
use crate::utils::{load_configuration, open_database, GlobalOptions};

/// Show the published days of a property in a range.
///
/// Days that were never published are omitted.
#[derive(Args)]
pub struct AvailabilityCommand {
    /// Property identifier
    #[arg(value_name = "PROPERTY")]
    pub property: PropertyId,

    /// First day (YYYY-MM-DD)
    #[arg(value_name = "START", value_parser = parse_day)]
    pub start: NaiveDate,

    /// Last day, inclusive (YYYY-MM-DD)
    #[arg(value_name = "END", value_parser = parse_day)]
    pub end: NaiveDate,

    /// Output format: table, json, csv or tsv
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

impl AvailabilityCommand {
    /// Execute the availability command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let range = DateRange::new(self.start, self.end).map_err(Error::from)?;
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let days = queries::query_availability(db.connection(), &self.property, range)?;
        write_availability(&days, self.format.unwrap_or(config.output_format()))
    }
}
