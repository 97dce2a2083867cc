//! List command implementation.
//!
//! This module implements the `list` command, which displays bookings in
//! various formats (table, JSON, CSV, TSV). What is listed depends on the
//! actor: their own bookings by default, a property's bookings for its host,
//! or everything for an admin.

use clap::{ArgGroup, Args};
use lodge::config::OutputFormat;
use lodge::operations::queries;
use lodge::{BookingStatus, PropertyId};

use crate::error::CliError;
use crate::output::write_bookings;
use crate::utils::{current_actor, load_configuration, open_database, GlobalOptions};

/// List bookings.
#[derive(Args)]
#[command(group(ArgGroup::new("scope").args(["property", "all"])))]
pub struct ListCommand {
    /// List bookings on a property you manage
    #[arg(long, value_name = "PROPERTY")]
    pub property: Option<PropertyId>,

    /// List every booking (admins only)
    #[arg(long)]
    pub all: bool,

    /// Only show bookings with this status
    #[arg(long, value_name = "STATUS")]
    pub status: Option<BookingStatus>,

    /// Output format: table, json, csv or tsv
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let actor = current_actor(global)?;
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;
        let conn = db.connection();

        let mut bookings = match (&self.property, self.all) {
            (Some(property), _) => queries::list_bookings_for_property(conn, &actor, property)?,
            (None, true) => queries::list_all_bookings(conn, &actor)?,
            (None, false) => queries::list_bookings_for_guest(conn, &actor)?,
        };

        if let Some(status) = self.status {
            bookings.retain(|b| b.status() == status);
        }

        write_bookings(&bookings, self.format.unwrap_or(config.output_format()))
    }
}
