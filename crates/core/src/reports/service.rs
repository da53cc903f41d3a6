//! Report generation service.

use std::collections::BTreeMap;

use arap_shared::MeanDaysBasis;
use arap_shared::types::{mean, round_report, safe_div};
use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::ReportError;
use super::types::{
    AgingPivot, AgingPivotRow, CounterpartyStatusRow, CounterpartySummary, InvoiceMetrics,
    InvoiceReport, MonthlyTrend, ReportOptions, TrendPoint,
};
use crate::aging::AgingBucket;
use crate::invoice::{Invoice, InvoiceLedger, InvoiceMonth, InvoiceRow, InvoiceStatus};
use crate::query::{InvoiceFilter, InvoiceQuery};
use crate::source::InvoiceSource;

/// Service for generating AR/AP reports.
pub struct ReportService;

impl ReportService {
    /// Builds the query, fetches rows and aggregates them.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Query` for unusable filters and `ReportError::Fetch`
    /// when the source fails. No aggregation happens after a failed fetch.
    pub async fn generate(
        source: &dyn InvoiceSource,
        ledger: InvoiceLedger,
        filter: &InvoiceFilter,
        as_of: NaiveDate,
        options: &ReportOptions,
    ) -> Result<InvoiceReport, ReportError> {
        let query = InvoiceQuery::build(ledger, filter)?;
        let invoices = source.fetch(&query).await?;
        Ok(Self::build(ledger, invoices, as_of, options))
    }

    /// Aggregates fetched invoices into a report. Never fails; empty input gives a zeroed report.
    #[must_use]
    pub fn build(
        ledger: InvoiceLedger,
        invoices: Vec<Invoice>,
        as_of: NaiveDate,
        options: &ReportOptions,
    ) -> InvoiceReport {
        let rows: Vec<InvoiceRow> = invoices
            .into_iter()
            .map(|invoice| InvoiceRow::derive(invoice, as_of))
            .collect();

        InvoiceReport {
            ledger,
            as_of,
            is_empty: rows.is_empty(),
            metrics: Self::metrics(&rows, options),
            counterparties: Self::counterparty_summary(&rows),
            counterparty_status: Self::counterparty_status(&rows),
            outstanding_aging: Self::outstanding_aging_pivot(&rows, options.include_totals),
            trend: Self::monthly_trend(&rows, options.forecast_window),
            rows,
        }
    }

    /// Computes scalar metrics.
    #[must_use]
    pub fn metrics(rows: &[InvoiceRow], options: &ReportOptions) -> InvoiceMetrics {
        let total_amount: Decimal = rows.iter().map(|r| r.invoice.amount).sum();
        let outstanding_amount: Decimal = rows
            .iter()
            .filter(|r| !r.invoice.status.is_paid())
            .map(|r| r.invoice.amount)
            .sum();
        let overdue: Vec<&InvoiceRow> = rows.iter().filter(|r| r.is_overdue).collect();
        let overdue_amount: Decimal = overdue.iter().map(|r| r.invoice.amount).sum();

        let mean_days_outstanding = match options.mean_days_basis {
            MeanDaysBasis::AllRows => mean(rows.iter().map(|r| Decimal::from(r.days_overdue))),
            MeanDaysBasis::OverdueOnly => {
                mean(overdue.iter().map(|r| Decimal::from(r.days_overdue)))
            }
        };

        InvoiceMetrics {
            invoice_count: rows.len() as u64,
            total_amount,
            outstanding_amount,
            overdue_amount,
            overdue_count: overdue.len() as u64,
            mean_days_outstanding: round_report(mean_days_outstanding),
            mean_days_basis: options.mean_days_basis,
            days_outstanding: Self::days_outstanding(
                outstanding_amount,
                total_amount,
                options.period_days,
            ),
            period_days: options.period_days,
        }
    }

    /// `outstanding / total * period_days`, zero when `total` is zero.
    #[must_use]
    pub fn days_outstanding(outstanding: Decimal, total: Decimal, period_days: u32) -> Decimal {
        round_report(safe_div(outstanding * Decimal::from(period_days), total))
    }

    /// Overdue exposure per counterparty, largest first (ties by name).
    ///
    /// Only overdue rows count; counterparties without any are left out.
    #[must_use]
    pub fn counterparty_summary(rows: &[InvoiceRow]) -> Vec<CounterpartySummary> {
        let mut groups: BTreeMap<&str, (Decimal, u64, i64)> = BTreeMap::new();
        for row in rows.iter().filter(|r| r.is_overdue) {
            let entry = groups
                .entry(row.invoice.counterparty_name.as_str())
                .or_insert((Decimal::ZERO, 0, 0));
            entry.0 += row.invoice.amount;
            entry.1 += 1;
            entry.2 += row.days_overdue;
        }

        let mut summaries: Vec<CounterpartySummary> = groups
            .into_iter()
            .map(|(name, (amount, count, days))| CounterpartySummary {
                counterparty_name: name.to_string(),
                total_amount: amount,
                invoice_count: count,
                mean_days_past_due: round_report(safe_div(
                    Decimal::from(days),
                    Decimal::from(count),
                )),
            })
            .collect();

        summaries.sort_by(|a, b| {
            b.total_amount
                .cmp(&a.total_amount)
                .then_with(|| a.counterparty_name.cmp(&b.counterparty_name))
        });
        summaries
    }

    /// Amount per counterparty split by status over all rows, zero-filled.
    ///
    /// Sorted by total descending, ties by name.
    #[must_use]
    pub fn counterparty_status(rows: &[InvoiceRow]) -> Vec<CounterpartyStatusRow> {
        let mut groups: BTreeMap<&str, BTreeMap<InvoiceStatus, Decimal>> = BTreeMap::new();
        for row in rows {
            *groups
                .entry(row.invoice.counterparty_name.as_str())
                .or_insert_with(|| {
                    InvoiceStatus::ALL
                        .into_iter()
                        .map(|status| (status, Decimal::ZERO))
                        .collect()
                })
                .entry(row.invoice.status)
                .or_insert(Decimal::ZERO) += row.invoice.amount;
        }

        let mut result: Vec<CounterpartyStatusRow> = groups
            .into_iter()
            .map(|(name, amounts)| CounterpartyStatusRow {
                counterparty_name: name.to_string(),
                total: amounts.values().copied().sum(),
                amounts,
            })
            .collect();

        result.sort_by(|a, b| {
            b.total
                .cmp(&a.total)
                .then_with(|| a.counterparty_name.cmp(&b.counterparty_name))
        });
        result
    }

    /// Counterparty x bucket sums of outstanding (not fully paid) amounts, zero-filled.
    #[must_use]
    pub fn outstanding_aging_pivot(rows: &[InvoiceRow], include_totals: bool) -> AgingPivot {
        let mut cells: BTreeMap<&str, BTreeMap<AgingBucket, Decimal>> = BTreeMap::new();
        for row in rows.iter().filter(|r| !r.invoice.status.is_paid()) {
            *cells
                .entry(row.invoice.counterparty_name.as_str())
                .or_insert_with(zero_buckets)
                .entry(row.aging_bucket)
                .or_insert(Decimal::ZERO) += row.invoice.amount;
        }

        let rows: Vec<AgingPivotRow> = cells
            .into_iter()
            .map(|(name, buckets)| AgingPivotRow {
                counterparty_name: name.to_string(),
                total: include_totals.then(|| buckets.values().copied().sum()),
                buckets,
            })
            .collect();

        let grand_total = (include_totals && !rows.is_empty()).then(|| {
            let mut buckets = zero_buckets();
            for row in &rows {
                for (bucket, amount) in &row.buckets {
                    *buckets.entry(*bucket).or_insert(Decimal::ZERO) += *amount;
                }
            }
            AgingPivotRow {
                counterparty_name: "Total".to_string(),
                total: Some(buckets.values().copied().sum()),
                buckets,
            }
        });

        AgingPivot { rows, grand_total }
    }

    /// Outstanding amount per invoice month with a trailing-mean forecast.
    #[must_use]
    pub fn monthly_trend(rows: &[InvoiceRow], window: usize) -> MonthlyTrend {
        let window = window.max(1);
        let mut months: BTreeMap<InvoiceMonth, Decimal> = BTreeMap::new();
        for row in rows.iter().filter(|r| !r.invoice.status.is_paid()) {
            *months.entry(row.invoice_month).or_insert(Decimal::ZERO) += row.invoice.amount;
        }

        let amounts: Vec<Decimal> = months.values().copied().collect();
        let points: Vec<TrendPoint> = months
            .into_iter()
            .enumerate()
            .map(|(i, (month, outstanding_amount))| TrendPoint {
                month,
                outstanding_amount,
                trailing_mean: (i + 1 >= window)
                    .then(|| round_report(mean(amounts[i + 1 - window..=i].iter().copied()))),
            })
            .collect();

        let forecast = points.last().and_then(|p| p.trailing_mean);

        MonthlyTrend {
            points,
            forecast,
            window,
        }
    }
}

fn zero_buckets() -> BTreeMap<AgingBucket, Decimal> {
    AgingBucket::ALL
        .into_iter()
        .map(|bucket| (bucket, Decimal::ZERO))
        .collect()
}
