//! CSV export of report rows.
//!
//! Header:
//! `id,counterparty_name,invoice_date,due_date,amount,status,days_overdue,aging_bucket,invoice_month`
//!
//! Reading accepts the same layout; the derived columns may be absent and are ignored.

use std::io::{Read, Write};

use chrono::NaiveDate;
use csv::{ReaderBuilder, Terminator, WriterBuilder};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::invoice::{Invoice, InvoiceRow, InvoiceStatus};

/// Errors from CSV export and import.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV encoding/decoding error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Underlying writer failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A field could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Column names of an exported document, in order.
pub const CSV_HEADER: [&str; 9] = [
    "id",
    "counterparty_name",
    "invoice_date",
    "due_date",
    "amount",
    "status",
    "days_overdue",
    "aging_bucket",
    "invoice_month",
];

#[derive(Serialize)]
struct CsvOutRow<'a> {
    id: &'a str,
    counterparty_name: &'a str,
    invoice_date: String,
    due_date: String,
    amount: String,
    status: &'static str,
    days_overdue: i64,
    aging_bucket: &'static str,
    invoice_month: String,
}

#[derive(Deserialize)]
struct CsvInRow {
    id: String,
    counterparty_name: String,
    invoice_date: String,
    due_date: String,
    amount: String,
    status: String,
}

/// Writes rows as CSV. The header line is written even when `rows` is empty.
///
/// # Errors
///
/// Returns an error if encoding or the underlying writer fails.
pub fn write_csv<W: Write>(writer: W, rows: &[InvoiceRow]) -> Result<(), ExportError> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
    for row in rows {
        let inv = &row.invoice;
        wtr.serialize(CsvOutRow {
            id: &inv.id,
            counterparty_name: &inv.counterparty_name,
            invoice_date: inv.invoice_date.format("%Y-%m-%d").to_string(),
            due_date: inv.due_date.format("%Y-%m-%d").to_string(),
            amount: inv.amount.to_string(),
            status: inv.status.as_str(),
            days_overdue: row.days_overdue,
            aging_bucket: row.aging_bucket.label(),
            invoice_month: row.invoice_month.to_string(),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes rows to an in-memory CSV document.
///
/// # Errors
///
/// Returns an error if encoding fails.
pub fn to_csv_bytes(rows: &[InvoiceRow]) -> Result<Vec<u8>, ExportError> {
    let mut out = Vec::new();
    write_csv(&mut out, rows)?;
    Ok(out)
}

/// Reads invoices from CSV produced by [`write_csv`].
///
/// # Errors
///
/// Returns `ExportError::Parse` for malformed dates, amounts or statuses.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<Invoice>, ExportError> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let mut invoices = Vec::new();

    for rec in rdr.deserialize::<CsvInRow>() {
        let row = rec?;
        let invoice = Invoice {
            invoice_date: parse_date(&row.invoice_date, "invoice_date")?,
            due_date: parse_date(&row.due_date, "due_date")?,
            amount: row
                .amount
                .trim()
                .parse::<Decimal>()
                .map_err(|e| ExportError::Parse(format!("amount: {e}")))?,
            status: row
                .status
                .parse::<InvoiceStatus>()
                .map_err(|e| ExportError::Parse(e.to_string()))?,
            id: row.id,
            counterparty_name: row.counterparty_name,
        };
        invoice
            .validate()
            .map_err(|e| ExportError::Parse(e.to_string()))?;
        invoices.push(invoice);
    }

    Ok(invoices)
}

fn parse_date(raw: &str, field: &str) -> Result<NaiveDate, ExportError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| ExportError::Parse(format!("{field}: {e}")))
}
