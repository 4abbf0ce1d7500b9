use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// A non-negative monetary amount stored as whole cents.
///
/// The backing schema stores prices as `NUMERIC(7, 2)`; representing them as
/// a scaled integer keeps comparisons exact and avoids floating point in
/// filter predicates.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Price(i64);

impl Price {
    /// Build a price from whole cents. Rejects negative amounts.
    pub fn from_cents(cents: i64) -> Result<Self, TypeError> {
        if cents < 0 {
            return Err(TypeError::NegativePrice { cents });
        }
        Ok(Self(cents))
    }

    /// Build a price from a major/minor pair, e.g. `(12, 99)` for 12.99.
    pub fn from_major_minor(major: i64, minor: u8) -> Result<Self, TypeError> {
        Self::from_cents(major * 100 + i64::from(minor))
    }

    /// The zero price.
    pub const fn zero() -> Self {
        Self(0)
    }

    /// The amount in whole cents.
    pub const fn cents(self) -> i64 {
        self.0
    }
}

impl fmt::Debug for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Price({})", self)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}
