//! Invoice error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while interpreting invoice data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvoiceError {
    /// Status label is not one of Paid, Unpaid, Partially Paid.
    #[error("Unknown invoice status: {0}")]
    UnknownStatus(String),

    /// Ledger name is neither receivables nor payables.
    #[error("Unknown ledger: {0}")]
    UnknownLedger(String),

    /// Month is not in `YYYY-MM` form.
    #[error("Invalid invoice month: {0}")]
    InvalidMonth(String),

    /// Amounts must be non-negative.
    #[error("Invoice {id} has negative amount {amount}")]
    NegativeAmount {
        /// Invoice ID.
        id: String,
        /// Offending amount.
        amount: Decimal,
    },
}
