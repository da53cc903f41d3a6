//! Invoice sources.
//!
//! `InvoiceSource` is the seam between report generation and whatever holds
//! the invoice tables. The warehouse implementation lives in `arap-db`;
//! `MemorySource` serves tests and demos.

use async_trait::async_trait;
use thiserror::Error;

use crate::invoice::{Invoice, InvoiceLedger};
use crate::query::InvoiceQuery;

/// Failure to obtain rows. A successful fetch with zero rows is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Connection could not be opened (network, auth).
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The source rejected or failed the query.
    #[error("Query failed: {0}")]
    Query(String),

    /// A returned row could not be turned into an `Invoice`.
    #[error("Invalid row: {0}")]
    Decode(String),
}

/// Executes invoice queries.
#[async_trait]
pub trait InvoiceSource: Send + Sync {
    /// Runs `query`, returning every matching row (possibly none).
    async fn fetch(&self, query: &InvoiceQuery) -> Result<Vec<Invoice>, FetchError>;
}

/// In-memory invoice tables evaluated with [`crate::query::InvoiceFilter::matches`].
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    receivables: Vec<Invoice>,
    payables: Vec<Invoice>,
}

impl MemorySource {
    /// Creates a source over the given tables.
    #[must_use]
    pub const fn new(receivables: Vec<Invoice>, payables: Vec<Invoice>) -> Self {
        Self {
            receivables,
            payables,
        }
    }

    fn table(&self, ledger: InvoiceLedger) -> &[Invoice] {
        match ledger {
            InvoiceLedger::Receivables => &self.receivables,
            InvoiceLedger::Payables => &self.payables,
        }
    }
}

#[async_trait]
impl InvoiceSource for MemorySource {
    async fn fetch(&self, query: &InvoiceQuery) -> Result<Vec<Invoice>, FetchError> {
        let mut rows: Vec<Invoice> = self
            .table(query.ledger)
            .iter()
            .filter(|inv| query.filter.matches(inv))
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            a.invoice_date
                .cmp(&b.invoice_date)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(rows)
    }
}
