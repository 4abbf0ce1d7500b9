use std::fmt;

use serde::{Deserialize, Serialize};

/// Row identifier for an author.
///
/// Wraps the serial integer key assigned by the catalog store. Identifiers
/// are opaque to callers; only the store mints them.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AuthorId(i64);

/// Row identifier for a genre.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GenreId(i64);

/// Row identifier for a book.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BookId(i64);

/// Identifier for the party holding a reservation.
///
/// Subjects are not rows the system owns. The caller assigns them (user
/// accounts, library cards, whatever the embedding application tracks).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SubjectId(i64);

macro_rules! impl_id {
    ($name:ident) => {
        impl $name {
            /// Wrap a raw integer key.
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// The raw integer key.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }
    };
}

impl_id!(AuthorId);
impl_id!(GenreId);
impl_id!(BookId);
impl_id!(SubjectId);
