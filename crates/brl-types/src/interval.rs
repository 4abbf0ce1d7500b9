use std::fmt;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// A half-open reservation span `[start, end)` with whole-second resolution.
///
/// Construction truncates both instants to whole seconds (the backing store
/// keeps timestamps at second precision) and rejects spans where `start` is
/// not strictly before `end`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReservationInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl ReservationInterval {
    /// Build an interval, truncating sub-second precision.
    ///
    /// Returns [`TypeError::EmptyInterval`] when the truncated start is not
    /// strictly before the truncated end; two instants inside the same
    /// second collapse to an empty span.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, TypeError> {
        let start = start.trunc_subsecs(0);
        let end = end.trunc_subsecs(0);
        if start >= end {
            return Err(TypeError::EmptyInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// The inclusive start instant.
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// The exclusive end instant.
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Whether `instant` falls strictly inside the span:
    /// `start < instant && instant < end`.
    ///
    /// Both boundaries are excluded. This is the primitive the availability
    /// rule is built on.
    pub fn strictly_contains(&self, instant: DateTime<Utc>) -> bool {
        self.start < instant && instant < self.end
    }

    /// Whether the reservation has lapsed: `end < now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.end < now
    }
}

impl fmt::Debug for ReservationInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReservationInterval({self})")
    }
}

impl fmt::Display for ReservationInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
