//! Development fixtures: deterministic demo invoices and a bulk loader.
//!
//! Used by the seeder binary and the integration tests. Production data is
//! owned by the warehouse; nothing in the reporting path writes.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, Statement, Value};

use arap_core::invoice::{Invoice, InvoiceLedger, InvoiceStatus};

/// Inserts invoices into the ledger's table with bound parameters.
///
/// # Errors
///
/// Returns an error if any insert fails.
pub async fn insert_invoices(
    db: &DatabaseConnection,
    ledger: InvoiceLedger,
    invoices: &[Invoice],
) -> Result<u64, DbErr> {
    let sql = format!(
        "INSERT INTO {table} (INVOICEID, {counterparty}, INVOICEDATE, DUEDATE, INVOICEAMOUNT, STATUS) \
         VALUES ($1, $2, $3, $4, $5, $6)",
        table = ledger.table(),
        counterparty = ledger.counterparty_column(),
    );

    let mut inserted = 0;
    for invoice in invoices {
        let stmt = Statement::from_sql_and_values(
            db.get_database_backend(),
            sql.as_str(),
            [
                Value::from(invoice.id.clone()),
                Value::from(invoice.counterparty_name.clone()),
                Value::from(invoice.invoice_date),
                Value::from(invoice.due_date),
                Value::from(invoice.amount),
                Value::from(invoice.status.as_str().to_string()),
            ],
        );
        inserted += db.execute(stmt).await?.rows_affected();
    }
    Ok(inserted)
}

/// Deletes every row from the ledger's table.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub async fn clear_invoices(db: &DatabaseConnection, ledger: InvoiceLedger) -> Result<u64, DbErr> {
    let sql = format!("DELETE FROM {}", ledger.table());
    Ok(db.execute_unprepared(&sql).await?.rows_affected())
}

/// Demo invoices spread across aging buckets, months and statuses, relative to `as_of`.
#[must_use]
pub fn demo_invoices(ledger: InvoiceLedger, as_of: NaiveDate) -> Vec<Invoice> {
    let (prefix, parties): (&str, [&str; 4]) = match ledger {
        InvoiceLedger::Receivables => ("AR", ["Acme Corp", "Globex", "Initech", "O'Hara & Sons"]),
        InvoiceLedger::Payables => (
            "AP",
            ["Supply Co", "Cloud Hosting Ltd", "Paper_Works 100%", "Umbrella"],
        ),
    };

    // (days before as_of the invoice was issued, payment terms, amount in cents, status)
    let plan: [(u64, u64, i64, InvoiceStatus); 12] = [
        (150, 30, 1_250_000, InvoiceStatus::Unpaid),
        (120, 30, 430_050, InvoiceStatus::PartiallyPaid),
        (100, 30, 99_900, InvoiceStatus::Paid),
        (85, 30, 2_000_000, InvoiceStatus::Unpaid),
        (70, 45, 15_075, InvoiceStatus::Paid),
        (60, 30, 780_000, InvoiceStatus::Unpaid),
        (45, 30, 120_000, InvoiceStatus::PartiallyPaid),
        (40, 30, 64_999, InvoiceStatus::Unpaid),
        (20, 30, 310_000, InvoiceStatus::Unpaid),
        (15, 30, 55_500, InvoiceStatus::Paid),
        (10, 60, 900_000, InvoiceStatus::Unpaid),
        (2, 30, 42_000, InvoiceStatus::PartiallyPaid),
    ];

    plan.iter()
        .enumerate()
        .filter_map(|(i, (issued_ago, terms, cents, status))| {
            let invoice_date = as_of.checked_sub_days(Days::new(*issued_ago))?;
            let due_date = invoice_date.checked_add_days(Days::new(*terms))?;
            Some(Invoice {
                id: format!("{prefix}-{:04}", i + 1),
                counterparty_name: parties[i % parties.len()].to_string(),
                invoice_date,
                due_date,
                amount: Decimal::new(*cents, 2),
                status: *status,
            })
        })
        .collect()
}
