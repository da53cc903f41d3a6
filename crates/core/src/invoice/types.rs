//! Invoice data types.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::InvoiceError;

/// Payment status of an invoice.
///
/// The warehouse stores `PartiallyPaid` as `"Partially Paid"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum InvoiceStatus {
    /// Settled in full.
    Paid,
    /// Nothing settled yet.
    Unpaid,
    /// Settled in part.
    PartiallyPaid,
}

impl InvoiceStatus {
    /// All statuses, in warehouse order.
    pub const ALL: [Self; 3] = [Self::Paid, Self::Unpaid, Self::PartiallyPaid];

    /// Returns the label stored in the warehouse `STATUS` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Paid => "Paid",
            Self::Unpaid => "Unpaid",
            Self::PartiallyPaid => "Partially Paid",
        }
    }

    /// Returns true for fully settled invoices.
    #[must_use]
    pub const fn is_paid(self) -> bool {
        matches!(self, Self::Paid)
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = InvoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "paid" => Ok(Self::Paid),
            "unpaid" => Ok(Self::Unpaid),
            "partiallypaid" => Ok(Self::PartiallyPaid),
            _ => Err(InvoiceError::UnknownStatus(s.to_string())),
        }
    }
}

impl TryFrom<String> for InvoiceStatus {
    type Error = InvoiceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<InvoiceStatus> for String {
    fn from(status: InvoiceStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Which invoice table a report reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceLedger {
    /// Accounts receivable: customers owe us.
    Receivables,
    /// Accounts payable: we owe vendors.
    Payables,
}

impl InvoiceLedger {
    /// Warehouse table holding this ledger's invoices.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::Receivables => "AR_INVOICES",
            Self::Payables => "AP_INVOICES",
        }
    }

    /// Column holding the counterparty name.
    #[must_use]
    pub const fn counterparty_column(self) -> &'static str {
        match self {
            Self::Receivables => "CUSTOMERNAME",
            Self::Payables => "VENDORNAME",
        }
    }

    /// Name of the days-outstanding ratio (DSO or DPO).
    #[must_use]
    pub const fn days_outstanding_label(self) -> &'static str {
        match self {
            Self::Receivables => "DSO",
            Self::Payables => "DPO",
        }
    }

    /// URL/file friendly name.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Receivables => "receivables",
            Self::Payables => "payables",
        }
    }
}

impl fmt::Display for InvoiceLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for InvoiceLedger {
    type Err = InvoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "receivables" | "ar" => Ok(Self::Receivables),
            "payables" | "ap" => Ok(Self::Payables),
            _ => Err(InvoiceError::UnknownLedger(s.to_string())),
        }
    }
}

/// A single AR or AP invoice as stored in the warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// Invoice identifier, unique within its table.
    pub id: String,
    /// Customer (AR) or vendor (AP) name.
    pub counterparty_name: String,
    /// Date the invoice was issued.
    pub invoice_date: NaiveDate,
    /// Date payment is due.
    pub due_date: NaiveDate,
    /// Invoice amount.
    pub amount: Decimal,
    /// Payment status.
    pub status: InvoiceStatus,
}

impl Invoice {
    /// Checks the invariants the aggregator relies on.
    ///
    /// # Errors
    ///
    /// Returns `InvoiceError::NegativeAmount` when the amount is below zero.
    pub fn validate(&self) -> Result<(), InvoiceError> {
        if self.amount.is_sign_negative() && !self.amount.is_zero() {
            return Err(InvoiceError::NegativeAmount {
                id: self.id.clone(),
                amount: self.amount,
            });
        }
        Ok(())
    }

    /// Whole days past the due date as of `as_of`; negative when not yet due.
    #[must_use]
    pub fn days_overdue(&self, as_of: NaiveDate) -> i64 {
        (as_of - self.due_date).num_days()
    }

    /// Unpaid (fully or partially) and past its due date.
    #[must_use]
    pub fn is_overdue(&self, as_of: NaiveDate) -> bool {
        !self.status.is_paid() && self.due_date < as_of
    }

    /// Calendar month the invoice was issued in.
    #[must_use]
    pub fn invoice_month(&self) -> InvoiceMonth {
        InvoiceMonth::of(self.invoice_date)
    }
}

/// Calendar month, rendered as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InvoiceMonth(NaiveDate);

impl InvoiceMonth {
    /// Month containing `date`.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self(date.with_day(1).unwrap_or(date))
    }

    /// First day of the month.
    #[must_use]
    pub const fn first_day(self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for InvoiceMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m"))
    }
}

impl FromStr for InvoiceMonth {
    type Err = InvoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
            .map(Self)
            .map_err(|_| InvoiceError::InvalidMonth(s.to_string()))
    }
}

impl Serialize for InvoiceMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for InvoiceMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn invoice(due: NaiveDate, status: InvoiceStatus) -> Invoice {
        Invoice {
            id: "INV-1".to_string(),
            counterparty_name: "Acme".to_string(),
            invoice_date: date(2026, 1, 5),
            due_date: due,
            amount: dec!(10.00),
            status,
        }
    }

    #[rstest]
    #[case("Paid", InvoiceStatus::Paid)]
    #[case("unpaid", InvoiceStatus::Unpaid)]
    #[case("Partially Paid", InvoiceStatus::PartiallyPaid)]
    #[case("PartiallyPaid", InvoiceStatus::PartiallyPaid)]
    #[case("partially_paid", InvoiceStatus::PartiallyPaid)]
    #[case("  PAID ", InvoiceStatus::Paid)]
    fn test_status_from_str(#[case] raw: &str, #[case] expected: InvoiceStatus) {
        assert_eq!(raw.parse::<InvoiceStatus>().unwrap(), expected);
    }

    #[test]
    fn test_status_unknown() {
        assert_eq!(
            "Void".parse::<InvoiceStatus>(),
            Err(InvoiceError::UnknownStatus("Void".to_string()))
        );
    }

    #[test]
    fn test_status_converts_to_warehouse_label() {
        assert_eq!(String::from(InvoiceStatus::PartiallyPaid), "Partially Paid");
        assert_eq!(InvoiceStatus::Unpaid.to_string(), "Unpaid");
    }

    #[rstest]
    #[case("ar", InvoiceLedger::Receivables)]
    #[case("Receivables", InvoiceLedger::Receivables)]
    #[case("AP", InvoiceLedger::Payables)]
    #[case("payables", InvoiceLedger::Payables)]
    fn test_ledger_from_str(#[case] raw: &str, #[case] expected: InvoiceLedger) {
        assert_eq!(raw.parse::<InvoiceLedger>().unwrap(), expected);
    }

    #[test]
    fn test_ledger_tables() {
        assert_eq!(InvoiceLedger::Receivables.table(), "AR_INVOICES");
        assert_eq!(InvoiceLedger::Payables.counterparty_column(), "VENDORNAME");
        assert!("gl".parse::<InvoiceLedger>().is_err());
    }

    #[test]
    fn test_days_overdue_and_is_overdue() {
        let as_of = date(2026, 3, 10);

        let past_due = invoice(date(2026, 2, 28), InvoiceStatus::Unpaid);
        assert_eq!(past_due.days_overdue(as_of), 10);
        assert!(past_due.is_overdue(as_of));

        let not_due = invoice(date(2026, 3, 15), InvoiceStatus::PartiallyPaid);
        assert_eq!(not_due.days_overdue(as_of), -5);
        assert!(!not_due.is_overdue(as_of));

        let due_today = invoice(as_of, InvoiceStatus::Unpaid);
        assert_eq!(due_today.days_overdue(as_of), 0);
        assert!(!due_today.is_overdue(as_of));

        let paid = invoice(date(2026, 1, 1), InvoiceStatus::Paid);
        assert!(!paid.is_overdue(as_of));
    }

    #[test]
    fn test_validate_rejects_negative_amount() {
        let mut inv = invoice(date(2026, 2, 1), InvoiceStatus::Unpaid);
        assert!(inv.validate().is_ok());

        inv.amount = dec!(-0.01);
        assert!(matches!(
            inv.validate(),
            Err(InvoiceError::NegativeAmount { .. })
        ));
    }

    #[test]
    fn test_invoice_month() {
        let month = InvoiceMonth::of(date(2026, 2, 17));
        assert_eq!(month.first_day(), date(2026, 2, 1));
        assert_eq!(month.to_string(), "2026-02");
        assert_eq!("2026-02".parse::<InvoiceMonth>().unwrap(), month);
        assert!("2026-13".parse::<InvoiceMonth>().is_err());
    }
}
