//! Report routes.
//!
//! - `GET /reports/{ledger}`: full report bundle as JSON
//! - `GET /reports/{ledger}/export`: report rows as CSV
//! - `GET /reports/overview`: AR and AP side by side

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use arap_core::export::to_csv_bytes;
use arap_core::invoice::InvoiceLedger;
use arap_core::query::{DateRange, InvoiceFilter, parse_status_list};
use arap_core::reports::{BalanceComparison, InvoiceReport, ReportError, ReportService};

use crate::AppState;
use crate::error::{ApiError, ErrorResponse};

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports/overview", get(get_overview))
        .route("/reports/{ledger}", get(get_report))
        .route("/reports/{ledger}/export", get(export_report))
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Filter parameters shared by every report endpoint.
///
/// Values arrive as raw strings so malformed input produces the JSON error
/// envelope instead of the extractor's plain-text rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    /// Start of the invoice date range (`YYYY-MM-DD`).
    pub from: Option<String>,
    /// End of the invoice date range (`YYYY-MM-DD`).
    pub to: Option<String>,
    /// Case-insensitive counterparty substring.
    pub name: Option<String>,
    /// Comma-separated statuses.
    pub status: Option<String>,
    /// Date derived fields are computed against (defaults to today).
    pub as_of: Option<String>,
}

impl ReportQuery {
    /// Validates the parameters into a filter.
    pub fn to_filter(&self) -> Result<InvoiceFilter, ApiError> {
        let from = parse_date_param("from", self.from.as_deref())?;
        let to = parse_date_param("to", self.to.as_deref())?;

        let mut filter = InvoiceFilter::default();
        if let Some(range) = DateRange::from_bounds(from, to)? {
            filter = filter.with_date_range(range);
        }
        if let Some(name) = &self.name {
            filter = filter.with_name(name.as_str());
        }
        if let Some(raw) = &self.status {
            filter.statuses = parse_status_list(raw)?;
        }
        Ok(filter)
    }

    /// The as-of date, falling back to today.
    pub fn as_of(&self) -> Result<NaiveDate, ApiError> {
        Ok(parse_date_param("as_of", self.as_of.as_deref())?
            .unwrap_or_else(|| chrono::Utc::now().date_naive()))
    }
}

fn parse_date_param(field: &str, raw: Option<&str>) -> Result<Option<NaiveDate>, ApiError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| {
                ApiError::validation(format!("{field} must be a YYYY-MM-DD date, got {s:?}"))
            }),
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// One side of the overview: a report or the error that prevented it.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum LedgerOutcome {
    /// The report was produced.
    Report(Box<InvoiceReport>),
    /// The report failed.
    Failed(ErrorResponse),
}

/// Response for the AR vs AP overview.
#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    /// Accounts receivable side.
    pub receivables: LedgerOutcome,
    /// Accounts payable side.
    pub payables: LedgerOutcome,
    /// Present only when both sides succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<BalanceComparison>,
}

// ============================================================================
// Handlers
// ============================================================================

async fn generate(
    state: &AppState,
    ledger: InvoiceLedger,
    filter: &InvoiceFilter,
    as_of: NaiveDate,
) -> Result<InvoiceReport, ReportError> {
    let result =
        ReportService::generate(state.source.as_ref(), ledger, filter, as_of, &state.options).await;
    match &result {
        Ok(report) => debug!(
            ledger = %ledger,
            rows = report.rows.len(),
            ratio = ledger.days_outstanding_label(),
            days_outstanding = %report.metrics.days_outstanding,
            "Report generated"
        ),
        Err(e) => error!(ledger = %ledger, error = %e, "Report generation failed"),
    }
    result
}

/// `GET /reports/{ledger}`
async fn get_report(
    State(state): State<AppState>,
    Path(ledger): Path<String>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<InvoiceReport>, ApiError> {
    let ledger: InvoiceLedger = ledger.parse()?;
    let filter = query.to_filter()?;
    let as_of = query.as_of()?;

    let report = generate(&state, ledger, &filter, as_of).await?;
    Ok(Json(report))
}

/// `GET /reports/{ledger}/export`
async fn export_report(
    State(state): State<AppState>,
    Path(ledger): Path<String>,
    Query(query): Query<ReportQuery>,
) -> Result<Response, ApiError> {
    let ledger: InvoiceLedger = ledger.parse()?;
    let filter = query.to_filter()?;
    let as_of = query.as_of()?;

    let report = generate(&state, ledger, &filter, as_of).await?;
    let body = to_csv_bytes(&report.rows)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}_invoices.csv\"", ledger.slug()),
            ),
        ],
        body,
    )
        .into_response())
}

/// `GET /reports/overview`
///
/// The two ledgers are fetched concurrently; a failure on one side does not
/// affect the other.
async fn get_overview(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<OverviewResponse>, ApiError> {
    let filter = query.to_filter()?;
    let as_of = query.as_of()?;

    let (receivables, payables) = tokio::join!(
        generate(&state, InvoiceLedger::Receivables, &filter, as_of),
        generate(&state, InvoiceLedger::Payables, &filter, as_of),
    );

    let balance = match (&receivables, &payables) {
        (Ok(ar), Ok(ap)) => Some(BalanceComparison::new(ar, ap)),
        _ => None,
    };

    Ok(Json(OverviewResponse {
        receivables: outcome(receivables),
        payables: outcome(payables),
        balance,
    }))
}

fn outcome(result: Result<InvoiceReport, ReportError>) -> LedgerOutcome {
    match result {
        Ok(report) => LedgerOutcome::Report(Box::new(report)),
        Err(e) => LedgerOutcome::Failed(ErrorResponse::from(&ApiError::from(e).0)),
    }
}
