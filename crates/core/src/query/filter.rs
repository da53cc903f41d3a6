//! User-supplied invoice filters.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::QueryError;
use crate::invoice::{Invoice, InvoiceStatus};

/// Inclusive invoice date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First invoice date included.
    pub start: NaiveDate,
    /// Last invoice date included.
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, QueryError> {
        if start > end {
            return Err(QueryError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Builds a range from optional bounds.
    ///
    /// A range needs both ends; a lone bound imposes no date constraint.
    pub fn from_bounds(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Option<Self>, QueryError> {
        match (start, end) {
            (Some(start), Some(end)) => Self::new(start, end).map(Some),
            _ => Ok(None),
        }
    }

    /// Whether `date` falls inside the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Filters for one AR or AP submission. The default filter matches every row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceFilter {
    /// Optional invoice date range.
    pub date_range: Option<DateRange>,
    /// Optional case-insensitive counterparty substring.
    pub name: Option<String>,
    /// Allowed statuses; empty means all.
    pub statuses: BTreeSet<InvoiceStatus>,
}

impl InvoiceFilter {
    /// Restricts to an invoice date range.
    #[must_use]
    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    /// Restricts to counterparties containing `name`, trimmed. Blank names are ignored.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        let trimmed = name.trim();
        self.name = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    /// Adds an allowed status.
    #[must_use]
    pub fn with_status(mut self, status: InvoiceStatus) -> Self {
        self.statuses.insert(status);
        self
    }

    /// Returns the name filter if it constrains anything.
    #[must_use]
    pub fn name_filter(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.trim().is_empty())
    }

    /// Returns the statuses to constrain on, or `None` when every status is allowed.
    #[must_use]
    pub fn status_filter(&self) -> Option<Vec<InvoiceStatus>> {
        if self.statuses.is_empty() || self.statuses.len() == InvoiceStatus::ALL.len() {
            None
        } else {
            Some(self.statuses.iter().copied().collect())
        }
    }

    /// In-memory evaluation of the filter, same semantics as the SQL the builder emits.
    #[must_use]
    pub fn matches(&self, invoice: &Invoice) -> bool {
        if let Some(range) = &self.date_range
            && !range.contains(invoice.invoice_date)
        {
            return false;
        }
        if let Some(name) = self.name_filter()
            && !invoice
                .counterparty_name
                .to_lowercase()
                .contains(&name.to_lowercase())
        {
            return false;
        }
        self.status_filter()
            .is_none_or(|statuses| statuses.contains(&invoice.status))
    }
}

/// Parses a comma-separated status list such as `Paid,Partially Paid`.
///
/// Empty entries are skipped, so an empty string yields an empty set.
pub fn parse_status_list(raw: &str) -> Result<BTreeSet<InvoiceStatus>, QueryError> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<InvoiceStatus>().map_err(QueryError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn invoice(name: &str, invoice_date: NaiveDate, status: InvoiceStatus) -> Invoice {
        Invoice {
            id: format!("INV-{name}"),
            counterparty_name: name.to_string(),
            invoice_date,
            due_date: invoice_date,
            amount: dec!(1),
            status,
        }
    }

    #[test]
    fn test_date_range_rejects_reversed() {
        let err = DateRange::new(date(2026, 2, 1), date(2026, 1, 1)).unwrap_err();
        assert!(matches!(err, QueryError::InvalidDateRange { .. }));
    }

    #[test]
    fn test_date_range_from_bounds() {
        assert_eq!(DateRange::from_bounds(None, None).unwrap(), None);
        assert_eq!(DateRange::from_bounds(Some(date(2026, 1, 1)), None), Ok(None));
        assert_eq!(DateRange::from_bounds(None, Some(date(2026, 1, 31))), Ok(None));
        assert!(DateRange::from_bounds(Some(date(2026, 2, 1)), Some(date(2026, 1, 1))).is_err());
        let range = DateRange::from_bounds(Some(date(2026, 1, 1)), Some(date(2026, 1, 31)))
            .unwrap()
            .unwrap();
        assert!(range.contains(date(2026, 1, 1)));
        assert!(range.contains(date(2026, 1, 31)));
        assert!(!range.contains(date(2026, 2, 1)));
    }

    #[test]
    fn test_default_filter_matches_everything() {
        let filter = InvoiceFilter::default();
        for status in InvoiceStatus::ALL {
            assert!(filter.matches(&invoice("Anyone", date(1999, 1, 1), status)));
        }
    }

    #[test]
    fn test_name_match_is_case_insensitive_substring() {
        let filter = InvoiceFilter::default().with_name("acme");
        assert!(filter.matches(&invoice("ACME Corp", date(2026, 1, 1), InvoiceStatus::Paid)));
        assert!(filter.matches(&invoice("Big Acme", date(2026, 1, 1), InvoiceStatus::Paid)));
        assert!(!filter.matches(&invoice("Globex", date(2026, 1, 1), InvoiceStatus::Paid)));
    }

    #[test]
    fn test_name_is_trimmed() {
        let filter = InvoiceFilter::default().with_name("  acme \t");
        assert_eq!(filter.name_filter(), Some("acme"));
        assert!(filter.matches(&invoice("Acme Corp", date(2026, 1, 1), InvoiceStatus::Unpaid)));
    }

    #[test]
    fn test_blank_name_is_ignored() {
        let filter = InvoiceFilter::default().with_name("   ");
        assert_eq!(filter.name, None);
        assert_eq!(filter.name_filter(), None);
    }

    #[test]
    fn test_status_filter() {
        let filter = InvoiceFilter::default().with_status(InvoiceStatus::Unpaid);
        assert!(filter.matches(&invoice("A", date(2026, 1, 1), InvoiceStatus::Unpaid)));
        assert!(!filter.matches(&invoice("A", date(2026, 1, 1), InvoiceStatus::Paid)));

        let all = InvoiceStatus::ALL
            .into_iter()
            .fold(InvoiceFilter::default(), InvoiceFilter::with_status);
        assert_eq!(all.status_filter(), None);
    }

    #[test]
    fn test_parse_status_list() {
        let parsed = parse_status_list("Paid, Partially Paid,,").unwrap();
        assert_eq!(
            parsed.into_iter().collect::<Vec<_>>(),
            vec![InvoiceStatus::Paid, InvoiceStatus::PartiallyPaid]
        );
        assert!(parse_status_list("").unwrap().is_empty());
        assert!(parse_status_list("Paid,Refunded").is_err());
    }
}
