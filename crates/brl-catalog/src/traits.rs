use std::collections::BTreeMap;

use brl_types::{AuthorId, AuthorName, BookId, BookSummary, GenreId, NewBook};

use crate::error::CatalogResult;
use crate::filter::BookFilter;

/// Write boundary for catalog mutations.
///
/// Implementations backed by a relational store must run each method as a
/// single transaction; `add_book` in particular spans author resolution,
/// genre resolution, the book row, and one join row per genre.
pub trait CatalogWriter: Send + Sync {
    /// Look up an author by `(first, last)`; insert when absent.
    ///
    /// The avatar is persisted only when the row is created. A later call
    /// with a different avatar returns the existing id and leaves the
    /// stored avatar untouched.
    fn resolve_or_create_author(
        &self,
        name: &AuthorName,
        avatar: Option<&[u8]>,
    ) -> CatalogResult<AuthorId>;

    /// Look up a genre by name; insert when absent.
    fn resolve_or_create_genre(&self, name: &str) -> CatalogResult<GenreId>;

    /// Insert a book, resolving or creating its author and genres first.
    ///
    /// Fails with `DuplicateTitle` when the title already exists. On any
    /// failure the book must not become visible in the catalog; author and
    /// genre rows created by the attempt may remain (they are keyed rows, so
    /// a retry resolves instead of duplicating them).
    fn add_book(&self, book: &NewBook) -> CatalogResult<BookId>;

    /// Delete a book's genre associations, then the book row.
    ///
    /// Fails with `BookNotFound` when zero book rows were affected. Never
    /// touches the booking ledger: reservations referencing the deleted book
    /// remain as orphaned rows, a documented gap the caller closes by
    /// cancelling bookings before deletion.
    fn remove_book(&self, book_id: BookId) -> CatalogResult<()>;
}

/// Read boundary for catalog queries.
pub trait CatalogReader: Send + Sync {
    /// The books matching every set field of `filter`, ordered by id.
    ///
    /// A book qualifies only if it has at least one genre association; a
    /// book with zero genres is invisible to every filtered read, including
    /// the empty filter.
    fn filter_books(&self, filter: &BookFilter) -> CatalogResult<BTreeMap<BookId, BookSummary>>;

    /// Genre names of a book, sorted lexicographically.
    ///
    /// An unknown book id yields an empty list, the same as a book with no
    /// associations.
    fn genres_of_book(&self, book_id: BookId) -> CatalogResult<Vec<String>>;

    /// Whether a book row with this id exists.
    fn book_exists(&self, book_id: BookId) -> CatalogResult<bool>;
}
