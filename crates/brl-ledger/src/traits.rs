use chrono::{DateTime, Utc};

use brl_types::{BookId, ReservationInterval, SubjectId};

use crate::error::LedgerResult;
use crate::records::{ActiveBooking, Booking};

/// Write boundary for booking ledger mutations.
///
/// `insert` is a check-then-act sequence and the classic race window that
/// comes with it: implementations MUST evaluate the availability rule and
/// insert the row as one atomic unit, either a serializable transaction over
/// the book's interval set or a mutual-exclusion guard held across both steps.
/// Two concurrent overlapping requests for the same book must never both
/// commit.
pub trait BookingWriter: Send + Sync {
    /// Reserve `book_id` for `subject` over `[start, end)`.
    ///
    /// Both instants are truncated to whole seconds before storing. Fails
    /// with `InvalidInterval` when the truncated start is not strictly
    /// before the truncated end, and with `Conflict` when the availability
    /// rule reports the start instant inside an existing reservation.
    ///
    /// Expired rows are swept (as of `now`) before the availability check,
    /// so a lapsed reservation never blocks a new one. There is no
    /// uniqueness constraint on `(subject, book)`.
    fn insert(
        &self,
        subject: SubjectId,
        book_id: BookId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> LedgerResult<Booking>;

    /// Delete every booking matching `(subject, book_id)`, whatever its
    /// interval. Returns the count removed; zero is a no-op signal, not an
    /// error.
    fn cancel(&self, subject: SubjectId, book_id: BookId) -> LedgerResult<u64>;

    /// Delete every booking whose end instant is strictly before `now`.
    ///
    /// Returns the count removed. Idempotent, and commutes with inserts of
    /// non-expired intervals, so it may run concurrently with reads.
    fn sweep_expired(&self, now: DateTime<Utc>) -> LedgerResult<u64>;
}

/// Read boundary for booking ledger queries.
///
/// "Active" means `end >= now`. Callers wanting the store purged of lapsed
/// rows (not merely filtered) run `sweep_expired` first; the query facade
/// orchestrates that ordering.
pub trait BookingReader: Send + Sync {
    /// Active reservation spans for one book.
    fn active_for_book(
        &self,
        book_id: BookId,
        now: DateTime<Utc>,
    ) -> LedgerResult<Vec<ReservationInterval>>;

    /// Active reservations across all books, ordered by book id then start.
    fn all_active(&self, now: DateTime<Utc>) -> LedgerResult<Vec<ActiveBooking>>;
}
