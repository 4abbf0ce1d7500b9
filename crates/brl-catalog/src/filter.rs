use serde::{Deserialize, Serialize};

use brl_types::{BookSummary, Price};

/// Conjunctive filter configuration for catalog reads.
///
/// Every field is optional; set fields are combined with AND. The empty
/// filter matches the whole (genre-joined) catalog. Enumerating the filter
/// fields here keeps validation at one boundary instead of scattering
/// per-parameter checks through the query path.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookFilter {
    /// Lower price bound, inclusive.
    pub min_price: Option<Price>,
    /// Upper price bound, inclusive.
    pub max_price: Option<Price>,
    /// Require at least one association with this genre name.
    pub genre: Option<String>,
    /// Exact match on the author's first name.
    pub author_first: Option<String>,
    /// Exact match on the author's last name.
    pub author_last: Option<String>,
}

impl BookFilter {
    /// The empty filter: matches every book that has a genre association.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn with_min_price(mut self, price: Price) -> Self {
        self.min_price = Some(price);
        self
    }

    pub fn with_max_price(mut self, price: Price) -> Self {
        self.max_price = Some(price);
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn with_author_first(mut self, first: impl Into<String>) -> Self {
        self.author_first = Some(first.into());
        self
    }

    pub fn with_author_last(mut self, last: impl Into<String>) -> Self {
        self.author_last = Some(last.into());
        self
    }

    /// Evaluate the filter against a projected book and its genre names.
    ///
    /// `genres` must be the complete set of genre names associated with the
    /// book. Books without any association never reach this predicate.
    pub fn accepts(&self, summary: &BookSummary, genres: &[String]) -> bool {
        if let Some(min) = self.min_price {
            if summary.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if summary.price > max {
                return false;
            }
        }
        if let Some(genre) = &self.genre {
            if !genres.iter().any(|g| g == genre) {
                return false;
            }
        }
        if let Some(first) = &self.author_first {
            if &summary.author_first != first {
                return false;
            }
        }
        if let Some(last) = &self.author_last {
            if &summary.author_last != last {
                return false;
            }
        }
        true
    }
}
