//! Core value types shared by the availability store and booking engine.
//!
//! Identifiers supplied by external collaborators (`PropertyId`, `UserId`) are
//! opaque validated strings; money is held in integer minor units.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl ValidationError {
    pub(crate) fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

fn non_empty(field: &str, value: impl Into<String>) -> Result<String, ValidationError> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(
            field,
            format!("{field} must be non-empty after trimming whitespace"),
        ));
    }
    Ok(trimmed.to_string())
}

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, trimming surrounding whitespace.
            ///
            /// # Errors
            ///
            /// Returns an error if the identifier is empty after trimming.
            pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
                non_empty($field, value).map(Self)
            }

            /// Returns the identifier text.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

opaque_id!(
    /// Identifier of a property, assigned by the property collaborator.
    ///
    /// # Examples
    ///
    /// ```
    /// use lodge::PropertyId;
    ///
    /// let id = PropertyId::new(" villa-7 ").unwrap();
    /// assert_eq!(id.as_str(), "villa-7");
    /// assert!(PropertyId::new("   ").is_err());
    /// ```
    PropertyId,
    "property_id"
);

opaque_id!(
    /// Identifier of a user (guest, host or admin), assigned by the identity
    /// collaborator.
    UserId,
    "user_id"
);

/// A non-negative amount of money in minor units (cents).
///
/// The text form is a whole number (`"120"`) or a number with up to two
/// decimal places (`"99.5"`, `"99.50"`).
///
/// # Examples
///
/// ```
/// use lodge::Money;
///
/// let nightly: Money = "100".parse().unwrap();
/// let total = nightly.checked_mul(3).unwrap();
/// assert_eq!(total.to_string(), "300");
///
/// let odd: Money = "99.5".parse().unwrap();
/// assert_eq!(odd.cents(), 9950);
/// assert_eq!(odd.to_string(), "99.50");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from minor units.
    ///
    /// # Errors
    ///
    /// Returns an error if `cents` is negative.
    pub fn from_cents(cents: i64) -> Result<Self, ValidationError> {
        if cents < 0 {
            return Err(ValidationError::new("price", "price must not be negative"));
        }
        Ok(Self(cents))
    }

    /// Creates an amount from whole units.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is negative or overflows.
    pub fn from_units(units: i64) -> Result<Self, ValidationError> {
        units
            .checked_mul(100)
            .ok_or_else(|| ValidationError::new("price", "price is too large"))
            .and_then(Self::from_cents)
    }

    /// Returns the amount in minor units.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Multiplies the amount by a day count, returning `None` on overflow.
    #[must_use]
    pub fn checked_mul(self, factor: u32) -> Option<Self> {
        self.0.checked_mul(i64::from(factor)).map(Self)
    }

    /// Price of `nights` nights at this nightly rate.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the total overflows.
    pub fn for_nights(self, nights: usize) -> Result<Self, ValidationError> {
        u32::try_from(nights)
            .ok()
            .and_then(|n| self.checked_mul(n))
            .ok_or_else(|| ValidationError::new("total_price", "total price overflows"))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let units = self.0 / 100;
        let cents = self.0 % 100;
        if cents == 0 {
            write!(f, "{units}")
        } else {
            write!(f, "{units}.{cents:02}")
        }
    }
}

impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            ValidationError::new(
                "price",
                format!("'{s}' is not an amount like 120 or 99.50"),
            )
        };

        let text = s.trim();
        let (whole, fraction) = match text.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (text, ""),
        };

        if whole.is_empty()
            || fraction.len() > 2
            || !whole.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
            || (text.contains('.') && fraction.is_empty())
        {
            return Err(invalid());
        }

        let units: i64 = whole.parse().map_err(|_| invalid())?;
        let cents: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };

        units
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .ok_or_else(invalid)
            .map(Self)
    }
}

/// Role of the authenticated actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// An ordinary guest.
    User,
    /// A property owner.
    Host,
    /// An administrator.
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::User => "USER",
            Self::Host => "HOST",
            Self::Admin => "ADMIN",
        })
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USER" | "GUEST" => Ok(Self::User),
            "HOST" => Ok(Self::Host),
            "ADMIN" => Ok(Self::Admin),
            other => Err(ValidationError::new(
                "role",
                format!("unknown role '{other}', expected USER, HOST or ADMIN"),
            )),
        }
    }
}

/// The authenticated caller of an operation.
///
/// Identity is trusted as given; the engine only checks roles and ownership.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Actor {
    /// The actor's user identifier.
    pub id: UserId,
    /// The actor's role.
    pub role: Role,
}

impl Actor {
    /// Creates an actor.
    #[must_use]
    pub const fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }

    /// Returns true if the actor is an administrator.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.role)
    }
}
