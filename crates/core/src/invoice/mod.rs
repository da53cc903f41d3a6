//! Invoice domain types.
//!
//! This module provides:
//! - `Invoice` rows as fetched from the AR and AP tables
//! - `InvoiceStatus` and `InvoiceLedger` enums
//! - `InvoiceRow`, an invoice plus fields derived against an as-of date

pub mod error;
pub mod row;
pub mod types;

pub use error::InvoiceError;
pub use row::InvoiceRow;
pub use types::*;
