//! Trailing dividend yield and payout.

use chrono::Days;
use savvy_traits::{CashFlowStatement, Date, Dividend, IncomeStatement, Quote};

use crate::math::{non_zero, safe_divide};
use crate::ttm::ttm_of;

/// Length of the trailing window used for dividend yield.
pub const TRAILING_DAYS: u64 = 365;

/// Dividends paid over the trailing 365 days / price.
///
/// Sums the per-share [`Dividend::amount`] of every event dated on or after
/// `as_of - 365 days`. Unavailable without a non-zero price, with no
/// dividend history, or when the trailing sum is zero.
#[must_use]
pub fn dividend_yield(dividends: &[Dividend], quote: Option<&Quote>, as_of: Date) -> Option<f64> {
    let price = non_zero(quote?.price)?;
    if dividends.is_empty() {
        return None;
    }

    let since = as_of.checked_sub_days(Days::new(TRAILING_DAYS))?;
    let trailing: f64 = dividends
        .iter()
        .filter(|d| d.date >= since)
        .map(Dividend::amount)
        .sum();

    safe_divide(non_zero(Some(trailing)), Some(price))
}

/// TTM dividends paid / TTM net income.
///
/// Dividends paid are taken as absolute values with missing quarters counted
/// as zero, so only four cash flow rows are needed. A zero dividend sum is
/// unavailable.
#[must_use]
pub fn dividend_payout(cash_flows: &[CashFlowStatement], income: &[IncomeStatement]) -> Option<f64> {
    let paid = ttm_of(cash_flows, |c| Some(c.dividends_paid.unwrap_or(0.0).abs()));
    safe_divide(non_zero(paid), ttm_of(income, |s| s.net_income))
}
