//! Decimal helpers for monetary aggregation.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Everything here works on `rust_decimal::Decimal`.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept for ratios and means in reports.
pub const REPORT_SCALE: u32 = 2;

/// Divides `numerator` by `denominator`, returning zero when the denominator is zero.
#[must_use]
pub fn safe_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}

/// Arithmetic mean of `values`, zero for an empty input.
#[must_use]
pub fn mean<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    let (sum, count) = values
        .into_iter()
        .fold((Decimal::ZERO, 0u64), |(sum, count), v| (sum + v, count + 1));
    safe_div(sum, Decimal::from(count))
}

/// Rounds a ratio or mean to [`REPORT_SCALE`] places, half away from zero.
#[must_use]
pub fn round_report(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(REPORT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}
