//! Invoice with fields derived against an as-of date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::types::{Invoice, InvoiceMonth};
use crate::aging::AgingBucket;

/// Raw invoice plus derived reporting fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRow {
    /// The fetched invoice.
    #[serde(flatten)]
    pub invoice: Invoice,
    /// Days past due (negative when not yet due).
    pub days_overdue: i64,
    /// Aging classification of `days_overdue`.
    pub aging_bucket: AgingBucket,
    /// Month of the invoice date.
    pub invoice_month: InvoiceMonth,
    /// Unpaid and past due.
    pub is_overdue: bool,
}

impl InvoiceRow {
    /// Derives reporting fields for `invoice` as of `as_of`.
    #[must_use]
    pub fn derive(invoice: Invoice, as_of: NaiveDate) -> Self {
        let days_overdue = invoice.days_overdue(as_of);
        Self {
            days_overdue,
            aging_bucket: AgingBucket::from_days(days_overdue),
            invoice_month: invoice.invoice_month(),
            is_overdue: invoice.is_overdue(as_of),
            invoice,
        }
    }
}
