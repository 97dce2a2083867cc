//! Publish commands.
//!
//! `publish-day` creates one availability row and refuses a day that already
//! has one. `publish-range` fills every day of a range that has no row yet
//! and leaves existing rows alone.

use chrono::NaiveDate;
use clap::Args;
use lodge::calendar::parse_day;
use lodge::operations::{PublishDayOptions, PublishDayPlan, PublishRangeOptions, PublishRangePlan};
use lodge::{DateRange, Error, Money, PlanExecutor, PropertyId};

use crate::error::CliError;
use crate::output::write_availability;
use crate::utils::{
    current_actor, load_configuration, open_database, print_dry_run, print_warnings, GlobalOptions,
};

/// Publish availability for a single day.
#[derive(Args)]
pub struct PublishDayCommand {
    /// Property identifier
    #[arg(value_name = "PROPERTY")]
    pub property: PropertyId,

    /// Day to publish (YYYY-MM-DD)
    #[arg(value_name = "DATE", value_parser = parse_day)]
    pub date: NaiveDate,

    /// Publish the day as closed instead of open
    #[arg(long)]
    pub closed: bool,

    /// Nightly price for this day (default: the property's base price)
    #[arg(long, value_name = "AMOUNT")]
    pub price: Option<Money>,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl PublishDayCommand {
    /// Execute the publish-day command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let actor = current_actor(global)?;
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let options = PublishDayOptions::new(actor, self.property, self.date)
            .with_available(!self.closed)
            .with_price(self.price);
        let plan = PublishDayPlan::new(options).build_plan(db.connection())?;

        if self.dry_run {
            print_dry_run(&plan, global);
            return Ok(());
        }

        let result = PlanExecutor::new(&mut db).execute(&plan)?;
        print_warnings(&result.warnings, global);
        write_availability(&result.availability, config.output_format())
    }
}

/// Publish availability for every day of an inclusive range.
#[derive(Args)]
pub struct PublishRangeCommand {
    /// Property identifier
    #[arg(value_name = "PROPERTY")]
    pub property: PropertyId,

    /// First day (YYYY-MM-DD)
    #[arg(value_name = "START", value_parser = parse_day)]
    pub start: NaiveDate,

    /// Last day, inclusive (YYYY-MM-DD)
    #[arg(value_name = "END", value_parser = parse_day)]
    pub end: NaiveDate,

    /// Publish the days as closed instead of open
    #[arg(long)]
    pub closed: bool,

    /// Nightly price for the new days (default: the property's base price)
    #[arg(long, value_name = "AMOUNT")]
    pub price: Option<Money>,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl PublishRangeCommand {
    /// Execute the publish-range command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let range = DateRange::new(self.start, self.end).map_err(Error::from)?;
        let actor = current_actor(global)?;
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let options = PublishRangeOptions::new(actor, self.property, range)
            .with_available(!self.closed)
            .with_price(self.price);
        let plan = PublishRangePlan::new(options, &config).build_plan(db.connection())?;

        if self.dry_run {
            print_dry_run(&plan, global);
            return Ok(());
        }

        let result = PlanExecutor::new(&mut db).execute(&plan)?;
        print_warnings(&result.warnings, global);
        write_availability(&result.availability, config.output_format())
    }
}
