use chrono::{DateTime, Utc};

use brl_types::BookId;

/// Errors produced by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// The requested span is empty: start is not strictly before end.
    #[error("invalid interval: start {start} is not before end {end}")]
    InvalidInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// The candidate start instant falls inside an existing reservation.
    #[error("booking conflict on book {book_id}: start {start} falls inside an existing reservation")]
    Conflict {
        book_id: BookId,
        start: DateTime<Utc>,
    },

    /// The backing store failed or the session is unusable.
    #[error("store failure during {op}: {reason}")]
    Store { op: &'static str, reason: String },
}

impl LedgerError {
    pub(crate) fn poisoned(op: &'static str) -> Self {
        Self::Store {
            op,
            reason: "ledger lock poisoned".into(),
        }
    }
}

/// Result alias for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
