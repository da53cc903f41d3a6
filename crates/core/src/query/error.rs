//! Query building errors.

use chrono::NaiveDate;
use thiserror::Error;

use crate::invoice::InvoiceError;

/// Errors that can occur while turning filters into a query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// A status or ledger name could not be parsed.
    #[error(transparent)]
    Invoice(#[from] InvoiceError),
}
