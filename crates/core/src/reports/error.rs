//! Report error types.

use thiserror::Error;

use crate::query::QueryError;
use crate::source::FetchError;

/// Errors that can occur while producing a report.
///
/// An empty row set is not an error; it yields a zeroed report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// The filters could not be turned into a query.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// The invoice source failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}
