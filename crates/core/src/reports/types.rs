//! Report data types.

use std::collections::BTreeMap;

use arap_shared::{MeanDaysBasis, ReportConfig};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aging::AgingBucket;
use crate::invoice::{InvoiceLedger, InvoiceMonth, InvoiceRow, InvoiceStatus};

/// Knobs for report calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOptions {
    /// Period length in days for DSO/DPO.
    pub period_days: u32,
    /// Which rows feed mean days outstanding.
    pub mean_days_basis: MeanDaysBasis,
    /// Whether the aging pivot carries row totals and a grand-total row.
    pub include_totals: bool,
    /// Trailing window (months) for the trend mean and forecast.
    pub forecast_window: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self::from(&ReportConfig::default())
    }
}

impl From<&ReportConfig> for ReportOptions {
    fn from(config: &ReportConfig) -> Self {
        Self {
            period_days: config.period_days,
            mean_days_basis: config.mean_days_basis,
            include_totals: config.include_totals,
            forecast_window: config.forecast_window.max(1),
        }
    }
}

/// Scalar metrics for one ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceMetrics {
    /// Number of rows.
    pub invoice_count: u64,
    /// Sum of all amounts.
    pub total_amount: Decimal,
    /// Sum of amounts not fully paid.
    pub outstanding_amount: Decimal,
    /// Sum of amounts unpaid and past due.
    pub overdue_amount: Decimal,
    /// Number of unpaid, past-due rows.
    pub overdue_count: u64,
    /// Mean days overdue over the configured basis.
    pub mean_days_outstanding: Decimal,
    /// Basis used for `mean_days_outstanding`.
    pub mean_days_basis: MeanDaysBasis,
    /// `outstanding / total * period_days` (DSO for AR, DPO for AP).
    pub days_outstanding: Decimal,
    /// Period used for `days_outstanding`.
    pub period_days: u32,
}

/// Overdue exposure for one counterparty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterpartySummary {
    /// Customer or vendor name.
    pub counterparty_name: String,
    /// Sum of overdue amounts.
    pub total_amount: Decimal,
    /// Number of overdue invoices.
    pub invoice_count: u64,
    /// Mean days past due of those invoices.
    pub mean_days_past_due: Decimal,
}

/// Invoiced amount for one counterparty split by status, over every fetched row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterpartyStatusRow {
    /// Customer or vendor name.
    pub counterparty_name: String,
    /// Amount per status; every status present.
    pub amounts: BTreeMap<InvoiceStatus, Decimal>,
    /// Sum across statuses.
    pub total: Decimal,
}

/// One row of the aging pivot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingPivotRow {
    /// Customer or vendor name (`Total` for the grand-total row).
    pub counterparty_name: String,
    /// Amount per bucket; every bucket present.
    pub buckets: BTreeMap<AgingBucket, Decimal>,
    /// Row total, when totals are enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<Decimal>,
}

/// Counterparty x aging bucket cross-tab of outstanding amounts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingPivot {
    /// Rows sorted by counterparty name.
    pub rows: Vec<AgingPivotRow>,
    /// Column sums, when totals are enabled and rows exist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grand_total: Option<AgingPivotRow>,
}

/// Outstanding amount invoiced in one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Invoice month.
    pub month: InvoiceMonth,
    /// Sum of amounts not fully paid.
    pub outstanding_amount: Decimal,
    /// Mean of this and the preceding months over the window, once the window is full.
    pub trailing_mean: Option<Decimal>,
}

/// Month-by-month outstanding amounts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTrend {
    /// Points in ascending month order.
    pub points: Vec<TrendPoint>,
    /// Naive next-month forecast: mean of the last `window` points.
    pub forecast: Option<Decimal>,
    /// Window length used.
    pub window: usize,
}

/// Self-contained result of one AR or AP submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceReport {
    /// Ledger reported on.
    pub ledger: InvoiceLedger,
    /// Date derived fields were computed against.
    pub as_of: NaiveDate,
    /// True when the fetch returned no rows.
    pub is_empty: bool,
    /// Scalar metrics.
    pub metrics: InvoiceMetrics,
    /// Overdue summary per counterparty, largest first.
    pub counterparties: Vec<CounterpartySummary>,
    /// Amount per counterparty and status, largest total first.
    pub counterparty_status: Vec<CounterpartyStatusRow>,
    /// Aging pivot over outstanding (not fully paid) rows.
    pub outstanding_aging: AgingPivot,
    /// Monthly outstanding trend.
    pub trend: MonthlyTrend,
    /// Fetched rows with derived fields.
    pub rows: Vec<InvoiceRow>,
}

/// Side-by-side AR vs AP comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceComparison {
    /// AR total.
    pub receivables_total: Decimal,
    /// AP total.
    pub payables_total: Decimal,
    /// AR total minus AP total.
    pub net_total: Decimal,
    /// AR outstanding.
    pub receivables_outstanding: Decimal,
    /// AP outstanding.
    pub payables_outstanding: Decimal,
    /// AR outstanding minus AP outstanding.
    pub net_outstanding: Decimal,
}

impl BalanceComparison {
    /// Compares an AR report with an AP report.
    #[must_use]
    pub fn new(receivables: &InvoiceReport, payables: &InvoiceReport) -> Self {
        let ar = &receivables.metrics;
        let ap = &payables.metrics;
        Self {
            receivables_total: ar.total_amount,
            payables_total: ap.total_amount,
            net_total: ar.total_amount - ap.total_amount,
            receivables_outstanding: ar.outstanding_amount,
            payables_outstanding: ap.outstanding_amount,
            net_outstanding: ar.outstanding_amount - ap.outstanding_amount,
        }
    }
}
