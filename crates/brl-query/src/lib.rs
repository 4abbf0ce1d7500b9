//! Query facade for the Book Reservation Ledger (BRL).
//!
//! [`Library`] composes a catalog store and a booking ledger behind one API.
//! It owns the two orderings the components themselves cannot see:
//!
//! - Expiry before read: every booking-dependent query sweeps lapsed rows
//!   first, so "active" always means "not yet expired as of this call".
//! - Existence before reservation: a reservation is only handed to the
//!   ledger once the catalog confirms the book row exists, standing in for
//!   the foreign key of the relational schema.
//!
//! Deleting a book does NOT cancel its reservations: orphaned booking rows
//! referencing a deleted book id are a documented gap. Callers wanting a
//! clean deletion cancel the book's reservations first.

pub mod error;
pub mod facade;

pub use error::{QueryError, QueryResult};
pub use facade::Library;
