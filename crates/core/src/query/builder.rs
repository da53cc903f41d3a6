//! Parameterized SQL construction for invoice reads.
//!
//! User input only ever travels as bound parameters; the SQL text contains
//! nothing but fixed identifiers and `$n` placeholders.

use chrono::NaiveDate;
use serde::Serialize;

use super::error::QueryError;
use super::filter::InvoiceFilter;
use crate::invoice::InvoiceLedger;

/// A value bound to a `$n` placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum QueryParam {
    /// Text value.
    Text(String),
    /// Calendar date.
    Date(NaiveDate),
}

/// Collects WHERE conditions and their bindings, numbering placeholders as they are added.
#[derive(Debug, Default)]
pub struct WhereBuilder {
    conditions: Vec<String>,
    bindings: Vec<QueryParam>,
}

impl WhereBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn bind(&mut self, value: QueryParam) -> String {
        self.bindings.push(value);
        format!("${}", self.bindings.len())
    }

    /// Adds `column BETWEEN $a AND $b`.
    pub fn add_between(&mut self, column: &str, start: NaiveDate, end: NaiveDate) -> &mut Self {
        let lo = self.bind(QueryParam::Date(start));
        let hi = self.bind(QueryParam::Date(end));
        self.conditions.push(format!("{column} BETWEEN {lo} AND {hi}"));
        self
    }

    /// Adds a case-insensitive, literal substring match on `column`.
    pub fn add_contains(&mut self, column: &str, needle: &str) -> &mut Self {
        let pattern = format!("%{}%", escape_like(needle));
        let placeholder = self.bind(QueryParam::Text(pattern));
        self.conditions
            .push(format!("{column} ILIKE {placeholder} ESCAPE '\\'"));
        self
    }

    /// Adds `column IN ($a, $b, ...)`. No-op for an empty slice.
    pub fn add_in<S: AsRef<str>>(&mut self, column: &str, values: &[S]) -> &mut Self {
        if values.is_empty() {
            return self;
        }
        let placeholders: Vec<String> = values
            .iter()
            .map(|v| self.bind(QueryParam::Text(v.as_ref().to_string())))
            .collect();
        self.conditions
            .push(format!("{column} IN ({})", placeholders.join(", ")));
        self
    }

    /// Builds the WHERE clause (empty if no conditions).
    #[must_use]
    pub fn build_where_clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.conditions.join(" AND "))
        }
    }

    /// Consumes the builder, returning the clause and its bindings.
    #[must_use]
    pub fn finish(self) -> (String, Vec<QueryParam>) {
        (self.build_where_clause(), self.bindings)
    }
}

/// Escapes `\`, `%` and `_` so they match literally under `ESCAPE '\'`.
#[must_use]
pub fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// A ready-to-execute read against one invoice table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceQuery {
    /// Target ledger.
    pub ledger: InvoiceLedger,
    /// SQL text with `$n` placeholders.
    pub sql: String,
    /// Values for the placeholders, in order.
    pub params: Vec<QueryParam>,
    /// The filter the query was built from.
    pub filter: InvoiceFilter,
}

impl InvoiceQuery {
    /// Builds the read for `ledger` restricted by `filter`.
    ///
    /// Empty filters add no condition, so the default filter selects the whole table.
    pub fn build(ledger: InvoiceLedger, filter: &InvoiceFilter) -> Result<Self, QueryError> {
        let mut builder = WhereBuilder::new();

        if let Some(range) = filter.date_range {
            if range.start > range.end {
                return Err(QueryError::InvalidDateRange {
                    start: range.start,
                    end: range.end,
                });
            }
            builder.add_between("INVOICEDATE", range.start, range.end);
        }
        if let Some(name) = filter.name_filter() {
            builder.add_contains(ledger.counterparty_column(), name);
        }
        if let Some(statuses) = filter.status_filter() {
            let labels: Vec<&str> = statuses.iter().map(|s| s.as_str()).collect();
            builder.add_in("STATUS", &labels);
        }

        let (where_clause, params) = builder.finish();
        let sql = format!(
            "SELECT INVOICEID AS id, {counterparty} AS counterparty_name, \
             INVOICEDATE AS invoice_date, DUEDATE AS due_date, \
             INVOICEAMOUNT AS amount, STATUS AS status \
             FROM {table}{where_clause} ORDER BY INVOICEDATE, INVOICEID",
            counterparty = ledger.counterparty_column(),
            table = ledger.table(),
        );

        Ok(Self {
            ledger,
            sql,
            params,
            filter: filter.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::InvoiceStatus;
    use crate::query::filter::DateRange;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_where_clause() {
        let builder = WhereBuilder::new();
        assert_eq!(builder.build_where_clause(), "");
    }

    #[test]
    fn test_placeholders_are_numbered_in_order() {
        let mut builder = WhereBuilder::new();
        builder
            .add_between("INVOICEDATE", date(2026, 1, 1), date(2026, 1, 31))
            .add_in("STATUS", &["Paid", "Unpaid"]);
        assert_eq!(
            builder.build_where_clause(),
            " WHERE INVOICEDATE BETWEEN $1 AND $2 AND STATUS IN ($3, $4)"
        );
    }

    #[test]
    fn test_add_in_empty_is_noop() {
        let mut builder = WhereBuilder::new();
        builder.add_in::<&str>("STATUS", &[]);
        assert_eq!(builder.build_where_clause(), "");
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("O'Brien"), "O'Brien");
    }

    #[test]
    fn test_unfiltered_query_has_no_where() {
        let query = InvoiceQuery::build(InvoiceLedger::Receivables, &InvoiceFilter::default())
            .unwrap();
        assert!(!query.sql.contains("WHERE"));
        assert!(query.sql.contains("FROM AR_INVOICES"));
        assert!(query.sql.contains("CUSTOMERNAME AS counterparty_name"));
        assert!(query.params.is_empty());
    }

    #[test]
    fn test_all_statuses_is_unconstrained() {
        let filter = InvoiceStatus::ALL
            .into_iter()
            .fold(InvoiceFilter::default(), InvoiceFilter::with_status);
        let query = InvoiceQuery::build(InvoiceLedger::Payables, &filter).unwrap();
        assert!(!query.sql.contains("WHERE"));
    }

    #[test]
    fn test_full_filter() {
        let filter = InvoiceFilter::default()
            .with_date_range(DateRange::new(date(2026, 1, 1), date(2026, 3, 31)).unwrap())
            .with_name("Globex")
            .with_status(InvoiceStatus::Unpaid)
            .with_status(InvoiceStatus::PartiallyPaid);
        let query = InvoiceQuery::build(InvoiceLedger::Payables, &filter).unwrap();

        assert!(query.sql.contains("FROM AP_INVOICES WHERE INVOICEDATE BETWEEN $1 AND $2"));
        assert!(query.sql.contains("VENDORNAME ILIKE $3 ESCAPE '\\'"));
        assert!(query.sql.contains("STATUS IN ($4, $5)"));
        assert_eq!(
            query.params,
            vec![
                QueryParam::Date(date(2026, 1, 1)),
                QueryParam::Date(date(2026, 3, 31)),
                QueryParam::Text("%Globex%".to_string()),
                QueryParam::Text("Unpaid".to_string()),
                QueryParam::Text("Partially Paid".to_string()),
            ]
        );
    }

    #[test]
    fn test_reversed_range_is_rejected() {
        let filter = InvoiceFilter {
            date_range: Some(DateRange {
                start: date(2026, 2, 1),
                end: date(2026, 1, 1),
            }),
            ..InvoiceFilter::default()
        };
        assert!(InvoiceQuery::build(InvoiceLedger::Receivables, &filter).is_err());
    }

    #[test]
    fn test_padded_name_binds_trimmed_pattern() {
        let filter = InvoiceFilter::default().with_name(" acme ");
        let query = InvoiceQuery::build(InvoiceLedger::Receivables, &filter).unwrap();
        assert_eq!(query.params, vec![QueryParam::Text("%acme%".to_string())]);
    }

    #[test]
    fn test_injection_attempt_stays_in_parameter() {
        let hostile = "x'; DROP TABLE AR_INVOICES; --";
        let filter = InvoiceFilter::default().with_name(hostile);
        let query = InvoiceQuery::build(InvoiceLedger::Receivables, &filter).unwrap();

        assert!(!query.sql.contains("DROP"));
        assert_eq!(
            query.params,
            vec![QueryParam::Text(format!("%{hostile}%"))]
        );
    }

    proptest! {
        /// Whatever the user types, the SQL text is the same fixed template.
        #[test]
        fn prop_name_never_reaches_sql_text(name in "\\PC{1,40}") {
            prop_assume!(!name.trim().is_empty());
            let filter = InvoiceFilter::default().with_name(name.clone());
            let query = InvoiceQuery::build(InvoiceLedger::Receivables, &filter).unwrap();
            let template = InvoiceQuery::build(
                InvoiceLedger::Receivables,
                &InvoiceFilter::default().with_name("placeholder"),
            )
            .unwrap();

            prop_assert_eq!(&query.sql, &template.sql);
            prop_assert_eq!(query.params.len(), 1);
        }
    }
}
