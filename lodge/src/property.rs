//! Read-only view of properties.
//!
//! Property management lives outside this crate. The engine only needs to
//! know who owns a property and its base nightly price, which it reads
//! through the [`PropertyDirectory`] trait.

use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{Actor, Money, PropertyId, Role, UserId};

/// A property as seen by the booking engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    /// The property identifier.
    pub id: PropertyId,
    /// The host who owns the property.
    pub owner_id: UserId,
    /// Base nightly price.
    pub price: Money,
}

impl Property {
    /// Creates a property record.
    #[must_use]
    pub const fn new(id: PropertyId, owner_id: UserId, price: Money) -> Self {
        Self {
            id,
            owner_id,
            price,
        }
    }

    /// Returns true if `actor` is a host that owns this property.
    #[must_use]
    pub fn is_owned_by(&self, actor: &Actor) -> bool {
        actor.role == Role::Host && self.owner_id == actor.id
    }

    /// Returns true if `actor` may manage this property's calendar and bookings.
    ///
    /// Admins manage every property; hosts only the ones they own.
    #[must_use]
    pub fn is_managed_by(&self, actor: &Actor) -> bool {
        actor.is_admin() || self.is_owned_by(actor)
    }
}

/// Source of property records.
#[cfg_attr(test, mockall::automock)]
pub trait PropertyDirectory {
    /// Looks up a property, returning `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup itself fails.
    fn property(&self, id: &PropertyId) -> Result<Option<Property>>;
}

/// Looks up a property, failing with `NotFound` if it does not exist.
///
/// # Errors
///
/// Returns `NotFound` for unknown properties, or the lookup error.
pub fn require_property<D>(directory: &D, id: &PropertyId) -> Result<Property>
where
    D: PropertyDirectory + ?Sized,
{
    directory
        .property(id)?
        .ok_or_else(|| Error::not_found(format!("property {id}")))
}

impl PropertyDirectory for Connection {
    fn property(&self, id: &PropertyId) -> Result<Option<Property>> {
        let row = self
            .query_row(
                "SELECT owner_id, price FROM properties WHERE id = ?1",
                params![id.as_str()],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)),
            )
            .optional()?;

        row.map(|(owner, price)| {
            Ok(Property::new(
                id.clone(),
                UserId::new(owner).map_err(|e| Error::DatabaseCorruption {
                    details: format!("property {id}: {e}"),
                })?,
                Money::from_cents(price).map_err(|e| Error::DatabaseCorruption {
                    details: format!("property {id}: {e}"),
                })?,
            ))
        })
        .transpose()
    }
}

/// Decides whether `actor` may act on `property`'s calendar or bookings.
///
/// # Errors
///
/// Returns `Unauthorized` for plain users and for hosts that do not own the
/// property.
pub fn authorize_management(actor: &Actor, property: &Property) -> Result<()> {
    if property.is_managed_by(actor) {
        return Ok(());
    }
    Err(match actor.role {
        Role::User => Error::unauthorized(format!(
            "user {} cannot manage property {}",
            actor.id, property.id
        )),
        _ => Error::unauthorized(format!(
            "host {} does not own property {}",
            actor.id, property.id
        )),
    })
}
