use serde::{Deserialize, Serialize};

use brl_types::{BookId, ReservationInterval, SubjectId};

/// A reservation row: who holds which book over which span.
///
/// The table carries no surrogate key and no uniqueness constraint on
/// `(subject, book)`: one subject may hold several disjoint intervals on
/// the same book.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub subject: SubjectId,
    pub book: BookId,
    pub interval: ReservationInterval,
}

/// A `(book, interval)` pair from the global active-booking listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveBooking {
    pub book: BookId,
    pub interval: ReservationInterval,
}
