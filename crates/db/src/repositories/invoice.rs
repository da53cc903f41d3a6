//! Invoice repository: runs parameterized invoice reads against the warehouse.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, DbErr, FromQueryResult, Statement, Value};
use std::sync::Arc;
use tracing::{debug, error};

use arap_core::invoice::{Invoice, InvoiceStatus};
use arap_core::query::{InvoiceQuery, QueryParam};
use arap_core::source::{FetchError, InvoiceSource};

use crate::LazyConnection;

/// Row shape produced by `InvoiceQuery` SQL (column aliases match field names).
#[derive(Debug, Clone, FromQueryResult)]
pub struct InvoiceRecord {
    /// Invoice ID.
    pub id: String,
    /// Customer or vendor name.
    pub counterparty_name: String,
    /// Invoice date.
    pub invoice_date: NaiveDate,
    /// Due date.
    pub due_date: NaiveDate,
    /// Amount.
    pub amount: Decimal,
    /// Raw status label.
    pub status: String,
}

impl TryFrom<InvoiceRecord> for Invoice {
    type Error = FetchError;

    fn try_from(record: InvoiceRecord) -> Result<Self, Self::Error> {
        let status = record
            .status
            .parse::<InvoiceStatus>()
            .map_err(|e| FetchError::Decode(format!("invoice {}: {e}", record.id)))?;

        let invoice = Self {
            id: record.id,
            counterparty_name: record.counterparty_name,
            invoice_date: record.invoice_date,
            due_date: record.due_date,
            amount: record.amount,
            status,
        };
        invoice
            .validate()
            .map_err(|e| FetchError::Decode(e.to_string()))?;
        Ok(invoice)
    }
}

/// Converts a bound parameter to a `SeaORM` value.
#[must_use]
pub fn to_value(param: &QueryParam) -> Value {
    match param {
        QueryParam::Text(s) => Value::from(s.clone()),
        QueryParam::Date(d) => Value::from(*d),
    }
}

/// Sorts a database error into the fetch failure taxonomy.
#[must_use]
pub fn classify_db_error(err: DbErr) -> FetchError {
    match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => FetchError::Connection(err.to_string()),
        DbErr::Type(_) | DbErr::TryIntoErr { .. } => FetchError::Decode(err.to_string()),
        other => FetchError::Query(other.to_string()),
    }
}

/// Invoice repository backed by the warehouse connection.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    connection: Arc<LazyConnection>,
}

impl InvoiceRepository {
    /// Creates a new invoice repository over a shared lazy connection.
    #[must_use]
    pub const fn new(connection: Arc<LazyConnection>) -> Self {
        Self { connection }
    }

    /// Runs `query` and returns the raw records.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Connection` when the connection cannot be opened and
    /// `FetchError::Query` when the statement fails.
    pub async fn fetch_records(
        &self,
        query: &InvoiceQuery,
    ) -> Result<Vec<InvoiceRecord>, FetchError> {
        let db = self
            .connection
            .get()
            .await
            .map_err(|e| FetchError::Connection(e.to_string()))?;

        let stmt = Statement::from_sql_and_values(
            db.get_database_backend(),
            query.sql.as_str(),
            query.params.iter().map(to_value),
        );

        debug!(
            ledger = %query.ledger,
            params = query.params.len(),
            "Fetching invoices"
        );

        InvoiceRecord::find_by_statement(stmt)
            .all(db)
            .await
            .map_err(classify_db_error)
    }
}

#[async_trait]
impl InvoiceSource for InvoiceRepository {
    async fn fetch(&self, query: &InvoiceQuery) -> Result<Vec<Invoice>, FetchError> {
        let records = self.fetch_records(query).await.inspect_err(|e| {
            error!(ledger = %query.ledger, error = %e, "Invoice fetch failed");
        })?;

        let invoices = records
            .into_iter()
            .map(Invoice::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(ledger = %query.ledger, rows = invoices.len(), "Fetched invoices");
        Ok(invoices)
    }
}
