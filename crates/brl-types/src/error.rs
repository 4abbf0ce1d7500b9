use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors produced by type construction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("empty interval: start {start} is not before end {end}")]
    EmptyInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("negative price: {cents} cents")]
    NegativePrice { cents: i64 },
}
