//! Register-property command implementation.
//!
//! Properties belong to an external directory; this command is how that
//! directory's records reach the local database.

use clap::Args;
use lodge::{Database, Error, Money, Property, PropertyId, Role, UserId};

use crate::error::CliError;
use crate::utils::{current_actor, load_configuration, open_database, GlobalOptions};

/// Register or update a property with its owner and base nightly price.
#[derive(Args)]
pub struct RegisterPropertyCommand {
    /// Property identifier
    #[arg(value_name = "PROPERTY")]
    pub property: PropertyId,

    /// Base nightly price, e.g. 120 or 99.50
    #[arg(long, value_name = "AMOUNT")]
    pub price: Money,

    /// Owner of the property (admins only; defaults to the actor)
    #[arg(long, value_name = "USER")]
    pub owner: Option<UserId>,
}

impl RegisterPropertyCommand {
    /// Execute the register-property command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let actor = current_actor(global)?;
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let owner = match (actor.role, self.owner) {
            (Role::Admin, Some(owner)) => owner,
            (Role::Admin | Role::Host, None) => actor.id.clone(),
            (Role::Host, Some(owner)) if owner == actor.id => owner,
            _ => {
                return Err(Error::Unauthorized {
                    reason: format!("{actor} may not register a property for another owner"),
                }
                .into())
            }
        };

        if let Some(existing) = Database::get_property(db.connection(), &self.property)? {
            if !existing.is_managed_by(&actor) {
                return Err(Error::Unauthorized {
                    reason: format!("{actor} does not manage property {}", existing.id),
                }
                .into());
            }
        }

        let property = Property::new(self.property, owner, self.price);
        Database::register_property(db.connection(), &property)?;

        if !global.quiet {
            eprintln!(
                "Registered property {} (owner {}, {} per night)",
                property.id, property.owner_id, property.price
            );
        }
        Ok(())
    }
}
