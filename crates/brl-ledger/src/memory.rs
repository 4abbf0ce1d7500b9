use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use brl_types::{BookId, ReservationInterval, SubjectId, TypeError};

use crate::availability::start_is_available;
use crate::error::{LedgerError, LedgerResult};
use crate::records::{ActiveBooking, Booking};
use crate::traits::{BookingReader, BookingWriter};

/// In-memory booking ledger for tests, local demos, and embedding.
///
/// All rows live in a per-book map behind a single `RwLock`. `insert` holds
/// the write guard across the expiry sweep, the availability check, and the
/// row insertion, so the check-then-act sequence is atomic and the
/// no-overlap invariant holds under concurrent callers.
pub struct InMemoryBookingLedger {
    inner: RwLock<LedgerState>,
}

#[derive(Default)]
struct LedgerState {
    bookings: HashMap<BookId, Vec<Booking>>,
}

impl LedgerState {
    /// Drop every row with `end < now`; returns the count removed.
    fn sweep(&mut self, now: DateTime<Utc>) -> u64 {
        let mut removed = 0;
        self.bookings.retain(|_, rows| {
            let before = rows.len();
            rows.retain(|booking| !booking.interval.is_expired(now));
            removed += (before - rows.len()) as u64;
            !rows.is_empty()
        });
        removed
    }
}

impl InMemoryBookingLedger {
    /// Create a new empty ledger.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(LedgerState::default()),
        }
    }

    /// Number of booking rows currently stored, expired or not.
    pub fn booking_count(&self) -> usize {
        self.inner
            .read()
            .expect("lock poisoned")
            .bookings
            .values()
            .map(Vec::len)
            .sum()
    }
}

impl Default for InMemoryBookingLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingWriter for InMemoryBookingLedger {
    fn insert(
        &self,
        subject: SubjectId,
        book_id: BookId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> LedgerResult<Booking> {
        let interval = ReservationInterval::new(start, end).map_err(|err| match err {
            TypeError::EmptyInterval { start, end } => LedgerError::InvalidInterval { start, end },
            other => LedgerError::Store {
                op: "insert",
                reason: other.to_string(),
            },
        })?;

        let mut state = self.inner.write().map_err(|_| LedgerError::poisoned("insert"))?;

        // Sweep, check, insert: one write guard, one atomic unit. A lapsed
        // reservation must not block the candidate, and no concurrent insert
        // may slip between the check and the push.
        state.sweep(now);

        let rows = state.bookings.entry(book_id).or_default();
        let existing: Vec<ReservationInterval> =
            rows.iter().map(|booking| booking.interval).collect();
        if !start_is_available(&existing, interval.start()) {
            return Err(LedgerError::Conflict {
                book_id,
                start: interval.start(),
            });
        }

        let booking = Booking {
            subject,
            book: book_id,
            interval,
        };
        rows.push(booking.clone());
        tracing::debug!(subject = %subject, book = %book_id, interval = %interval, "booking inserted");
        Ok(booking)
    }

    fn cancel(&self, subject: SubjectId, book_id: BookId) -> LedgerResult<u64> {
        let mut state = self.inner.write().map_err(|_| LedgerError::poisoned("cancel"))?;

        let (removed, drained) = match state.bookings.get_mut(&book_id) {
            Some(rows) => {
                let before = rows.len();
                rows.retain(|booking| booking.subject != subject);
                ((before - rows.len()) as u64, rows.is_empty())
            }
            None => (0, false),
        };
        if drained {
            state.bookings.remove(&book_id);
        }

        if removed > 0 {
            tracing::debug!(subject = %subject, book = %book_id, removed, "bookings cancelled");
        }
        Ok(removed)
    }

    fn sweep_expired(&self, now: DateTime<Utc>) -> LedgerResult<u64> {
        let mut state = self
            .inner
            .write()
            .map_err(|_| LedgerError::poisoned("sweep_expired"))?;
        let removed = state.sweep(now);
        if removed > 0 {
            tracing::debug!(removed, "expired bookings swept");
        }
        Ok(removed)
    }
}

impl BookingReader for InMemoryBookingLedger {
    fn active_for_book(
        &self,
        book_id: BookId,
        now: DateTime<Utc>,
    ) -> LedgerResult<Vec<ReservationInterval>> {
        let state = self
            .inner
            .read()
            .map_err(|_| LedgerError::poisoned("active_for_book"))?;

        Ok(state
            .bookings
            .get(&book_id)
            .into_iter()
            .flatten()
            .filter(|booking| !booking.interval.is_expired(now))
            .map(|booking| booking.interval)
            .collect())
    }

    fn all_active(&self, now: DateTime<Utc>) -> LedgerResult<Vec<ActiveBooking>> {
        let state = self
            .inner
            .read()
            .map_err(|_| LedgerError::poisoned("all_active"))?;

        let mut active: Vec<ActiveBooking> = state
            .bookings
            .values()
            .flatten()
            .filter(|booking| !booking.interval.is_expired(now))
            .map(|booking| ActiveBooking {
                book: booking.book,
                interval: booking.interval,
            })
            .collect();
        active.sort_by_key(|entry| (entry.book, entry.interval.start()));
        Ok(active)
    }
}

impl std::fmt::Debug for InMemoryBookingLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryBookingLedger")
            .field("booking_count", &self.booking_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    fn t(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn subject(raw: i64) -> SubjectId {
        SubjectId::new(raw)
    }

    fn book(raw: i64) -> BookId {
        BookId::new(raw)
    }

    #[test]
    fn insert_truncates_to_whole_seconds() {
        let ledger = InMemoryBookingLedger::new();
        let booking = ledger
            .insert(
                subject(1),
                book(1),
                t(0) + Duration::milliseconds(999),
                t(3600) + Duration::milliseconds(400),
                t(0),
            )
            .unwrap();
        assert_eq!(booking.interval.start(), t(0));
        assert_eq!(booking.interval.end(), t(3600));
    }

    #[test]
    fn insert_rejects_empty_interval() {
        let ledger = InMemoryBookingLedger::new();

        let err = ledger
            .insert(subject(1), book(1), t(100), t(100), t(0))
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidInterval { .. }));

        // Sub-second spans collapse to empty after truncation.
        let err = ledger
            .insert(
                subject(1),
                book(1),
                t(100) + Duration::milliseconds(100),
                t(100) + Duration::milliseconds(900),
                t(0),
            )
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidInterval { .. }));
        assert_eq!(ledger.booking_count(), 0);
    }

    #[test]
    fn start_inside_existing_reservation_conflicts() {
        let ledger = InMemoryBookingLedger::new();
        ledger
            .insert(subject(1), book(5), t(0), t(3600), t(0))
            .unwrap();

        let err = ledger
            .insert(subject(2), book(5), t(1800), t(7200), t(0))
            .unwrap_err();
        assert_eq!(
            err,
            LedgerError::Conflict {
                book_id: book(5),
                start: t(1800),
            }
        );
        assert_eq!(ledger.booking_count(), 1);
    }

    #[test]
    fn overlap_from_the_left_is_accepted() {
        // The rule only tests the candidate's start point: [0, 12) against
        // an existing [5, 15) overlaps, but start 0 lies outside [5, 15).
        let ledger = InMemoryBookingLedger::new();
        ledger
            .insert(subject(1), book(1), t(5), t(15), t(0))
            .unwrap();
        ledger
            .insert(subject(2), book(1), t(0), t(12), t(0))
            .unwrap();
        assert_eq!(ledger.booking_count(), 2);
    }

    #[test]
    fn boundary_starts_are_accepted() {
        let ledger = InMemoryBookingLedger::new();
        ledger
            .insert(subject(1), book(1), t(100), t(200), t(0))
            .unwrap();

        // Starting exactly at an existing start or end is available.
        ledger
            .insert(subject(2), book(1), t(200), t(300), t(0))
            .unwrap();
        ledger
            .insert(subject(3), book(1), t(100), t(150), t(0))
            .unwrap();
        assert_eq!(ledger.booking_count(), 3);
    }

    #[test]
    fn books_are_independent() {
        let ledger = InMemoryBookingLedger::new();
        ledger
            .insert(subject(1), book(5), t(0), t(3600), t(0))
            .unwrap();
        // The same span on another book is unrelated.
        ledger
            .insert(subject(2), book(4), t(0), t(3600), t(0))
            .unwrap();
        assert_eq!(ledger.booking_count(), 2);
    }

    #[test]
    fn same_subject_may_hold_disjoint_intervals() {
        let ledger = InMemoryBookingLedger::new();
        ledger
            .insert(subject(1), book(1), t(0), t(100), t(0))
            .unwrap();
        ledger
            .insert(subject(1), book(1), t(200), t(300), t(0))
            .unwrap();
        assert_eq!(ledger.booking_count(), 2);
    }

    #[test]
    fn cancel_removes_every_matching_pair() {
        let ledger = InMemoryBookingLedger::new();
        ledger
            .insert(subject(1), book(1), t(0), t(100), t(0))
            .unwrap();
        ledger
            .insert(subject(1), book(1), t(200), t(300), t(0))
            .unwrap();
        ledger
            .insert(subject(2), book(1), t(400), t(500), t(0))
            .unwrap();

        assert_eq!(ledger.cancel(subject(1), book(1)).unwrap(), 2);
        // The other subject's reservation survives.
        assert_eq!(ledger.booking_count(), 1);
    }

    #[test]
    fn cancel_is_idempotent() {
        let ledger = InMemoryBookingLedger::new();
        ledger
            .insert(subject(1), book(1), t(0), t(100), t(0))
            .unwrap();

        assert_eq!(ledger.cancel(subject(1), book(1)).unwrap(), 1);
        // Second call removes nothing and is not an error.
        assert_eq!(ledger.cancel(subject(1), book(1)).unwrap(), 0);
        assert_eq!(ledger.cancel(subject(9), book(9)).unwrap(), 0);
    }

    #[test]
    fn sweep_removes_only_strictly_expired_rows() {
        let ledger = InMemoryBookingLedger::new();
        ledger
            .insert(subject(1), book(1), t(0), t(100), t(0))
            .unwrap();
        ledger
            .insert(subject(2), book(1), t(200), t(300), t(0))
            .unwrap();

        // end == now is not expired.
        assert_eq!(ledger.sweep_expired(t(100)).unwrap(), 0);
        assert_eq!(ledger.sweep_expired(t(101)).unwrap(), 1);
        assert_eq!(ledger.booking_count(), 1);
        // Idempotent.
        assert_eq!(ledger.sweep_expired(t(101)).unwrap(), 0);
    }

    #[test]
    fn reads_filter_expired_rows_without_deleting_them() {
        let ledger = InMemoryBookingLedger::new();
        ledger
            .insert(subject(1), book(1), t(0), t(100), t(0))
            .unwrap();

        assert!(ledger.active_for_book(book(1), t(200)).unwrap().is_empty());
        // The row is filtered, not purged: an earlier "now" still sees it.
        assert_eq!(ledger.active_for_book(book(1), t(50)).unwrap().len(), 1);
        assert_eq!(ledger.booking_count(), 1);
    }

    #[test]
    fn expired_reservation_does_not_block_insert() {
        let ledger = InMemoryBookingLedger::new();
        ledger
            .insert(subject(1), book(1), t(0), t(100), t(0))
            .unwrap();

        // Start 50 falls inside the old span, but the old span lapsed by
        // now=200 and is swept before the check.
        ledger
            .insert(subject(2), book(1), t(50), t(300), t(200))
            .unwrap();
        assert_eq!(ledger.booking_count(), 1);
    }

    #[test]
    fn all_active_is_ordered_by_book_then_start() {
        let ledger = InMemoryBookingLedger::new();
        ledger
            .insert(subject(1), book(2), t(100), t(200), t(0))
            .unwrap();
        ledger
            .insert(subject(2), book(1), t(300), t(400), t(0))
            .unwrap();
        ledger
            .insert(subject(3), book(1), t(0), t(50), t(0))
            .unwrap();

        let active = ledger.all_active(t(0)).unwrap();
        let keys: Vec<(BookId, DateTime<Utc>)> = active
            .iter()
            .map(|entry| (entry.book, entry.interval.start()))
            .collect();
        assert_eq!(
            keys,
            vec![(book(1), t(0)), (book(1), t(300)), (book(2), t(100))]
        );
    }

    proptest! {
        /// For any sequence of accepted inserts on one book, no two stored
        /// intervals satisfy `a.start < b.start < a.end`.
        #[test]
        fn accepted_inserts_preserve_no_overlap(
            spans in prop::collection::vec((0i64..500, 1i64..120), 1..40)
        ) {
            let ledger = InMemoryBookingLedger::new();
            let target = book(1);
            for (i, (start, len)) in spans.iter().enumerate() {
                let _ = ledger.insert(
                    subject(i as i64),
                    target,
                    t(*start),
                    t(start + len),
                    t(0),
                );
            }

            let stored = ledger.active_for_book(target, t(0)).unwrap();
            for (i, a) in stored.iter().enumerate() {
                for (j, b) in stored.iter().enumerate() {
                    if i != j {
                        prop_assert!(
                            !(a.start() < b.start() && b.start() < a.end()),
                            "stored intervals {a} and {b} violate the invariant"
                        );
                    }
                }
            }
        }
    }
}
