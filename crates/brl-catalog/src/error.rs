use brl_types::BookId;

/// Errors from catalog store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// A book with this title already exists (title uniqueness violation).
    #[error("duplicate title: {title:?} already exists in the catalog")]
    DuplicateTitle { title: String },

    /// The deletion target was absent: zero book rows affected.
    #[error("book {book_id} not found")]
    BookNotFound { book_id: BookId },

    /// The backing store failed or the session is unusable.
    #[error("store failure during {op}: {reason}")]
    Store { op: &'static str, reason: String },
}

impl CatalogError {
    pub(crate) fn poisoned(op: &'static str) -> Self {
        Self::Store {
            op,
            reason: "catalog lock poisoned".into(),
        }
    }
}

/// Result alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
