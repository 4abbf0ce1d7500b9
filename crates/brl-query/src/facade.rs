use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use brl_catalog::{BookFilter, CatalogReader, CatalogWriter, InMemoryCatalog};
use brl_ledger::{
    ActiveBooking, Booking, BookingReader, BookingWriter, InMemoryBookingLedger,
};
use brl_types::{BookId, BookSummary, NewBook, ReservationInterval, SubjectId};

use crate::error::{QueryError, QueryResult};

/// The composed read/write surface over a catalog and a booking ledger.
///
/// Generic over the trait boundaries so any backend pair can be wired in;
/// [`Library::in_memory`] assembles the reference implementations. Every
/// time-dependent operation takes `now` explicitly: the caller owns the
/// clock, the facade owns the sweep-before-read ordering.
pub struct Library<C, L> {
    catalog: C,
    ledger: L,
}

impl Library<InMemoryCatalog, InMemoryBookingLedger> {
    /// Assemble a library over the in-memory reference backends.
    pub fn in_memory() -> Self {
        Self::new(InMemoryCatalog::new(), InMemoryBookingLedger::new())
    }
}

impl<C, L> Library<C, L>
where
    C: CatalogReader + CatalogWriter,
    L: BookingReader + BookingWriter,
{
    /// Compose a library from its two stores.
    pub fn new(catalog: C, ledger: L) -> Self {
        Self { catalog, ledger }
    }

    // ---- Catalog operations ----

    /// Insert a book, resolving or creating its author and genres.
    pub fn add_book(&self, book: &NewBook) -> QueryResult<BookId> {
        Ok(self.catalog.add_book(book)?)
    }

    /// Delete a book and its genre associations.
    ///
    /// Reservations referencing the book are left in place (see the crate
    /// docs on orphaned bookings).
    pub fn remove_book(&self, book_id: BookId) -> QueryResult<()> {
        Ok(self.catalog.remove_book(book_id)?)
    }

    /// Genre names of a book, sorted lexicographically.
    pub fn genres_of_book(&self, book_id: BookId) -> QueryResult<Vec<String>> {
        Ok(self.catalog.genres_of_book(book_id)?)
    }

    /// The books matching `filter`, with lapsed bookings swept first so a
    /// caller combining this with booking reads sees one consistent "now".
    pub fn browse(
        &self,
        filter: &BookFilter,
        now: DateTime<Utc>,
    ) -> QueryResult<BTreeMap<BookId, BookSummary>> {
        self.ledger.sweep_expired(now)?;
        Ok(self.catalog.filter_books(filter)?)
    }

    // ---- Booking operations ----

    /// Reserve a book for `subject` over `[start, end)`.
    ///
    /// The book must exist in the catalog; the conflict decision and the
    /// insert are one atomic unit inside the ledger.
    pub fn reserve(
        &self,
        subject: SubjectId,
        book_id: BookId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> QueryResult<Booking> {
        if !self.catalog.book_exists(book_id)? {
            return Err(QueryError::UnknownBook { book_id });
        }
        Ok(self.ledger.insert(subject, book_id, start, end, now)?)
    }

    /// Cancel every reservation `(subject, book_id)` holds. Returns the
    /// count removed; zero means there was nothing to cancel.
    pub fn cancel(&self, subject: SubjectId, book_id: BookId) -> QueryResult<u64> {
        Ok(self.ledger.cancel(subject, book_id)?)
    }

    /// All active reservations, after sweeping lapsed rows.
    pub fn active_bookings(&self, now: DateTime<Utc>) -> QueryResult<Vec<ActiveBooking>> {
        self.ledger.sweep_expired(now)?;
        Ok(self.ledger.all_active(now)?)
    }

    /// Active reservation spans for one book, after sweeping lapsed rows.
    pub fn active_bookings_for_book(
        &self,
        book_id: BookId,
        now: DateTime<Utc>,
    ) -> QueryResult<Vec<ReservationInterval>> {
        self.ledger.sweep_expired(now)?;
        Ok(self.ledger.active_for_book(book_id, now)?)
    }
}
