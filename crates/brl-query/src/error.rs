use brl_catalog::CatalogError;
use brl_ledger::LedgerError;
use brl_types::BookId;

/// Errors surfaced by the query facade.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// The reservation target is not a known book row.
    #[error("unknown book {book_id}: reservations require an existing catalog entry")]
    UnknownBook { book_id: BookId },

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Result alias for facade operations.
pub type QueryResult<T> = Result<T, QueryError>;
