//! Booking ledger for the Book Reservation Ledger (BRL).
//!
//! This crate is the heart of BRL. It provides:
//! - [`Booking`] reservation records: subject, book, half-open interval
//! - `BookingWriter` / `BookingReader` trait boundaries
//! - The pure start-point availability rule ([`availability`])
//! - [`InMemoryBookingLedger`] implementation for tests and embedding
//! - Lazy expiry: bookings whose end has passed are swept before reads and
//!   conflict checks
//!
//! # The no-overlap invariant
//!
//! For a fixed book, no two stored bookings may satisfy
//! `a.start < b.start < a.end`. The invariant is enforced by evaluating the
//! availability rule and inserting under one write guard: the check and the
//! act are a single atomic unit, so concurrent requests for the same book
//! cannot both pass the check.

pub mod availability;
pub mod error;
pub mod memory;
pub mod records;
pub mod traits;

pub use availability::start_is_available;
pub use error::{LedgerError, LedgerResult};
pub use memory::InMemoryBookingLedger;
pub use records::{ActiveBooking, Booking};
pub use traits::{BookingReader, BookingWriter};
