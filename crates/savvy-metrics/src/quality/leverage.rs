//! Leverage.

use savvy_traits::{BalanceSheet, IncomeStatement};

use crate::math::safe_divide;
use crate::ttm::ttm_of;

/// Latest total debt / TTM EBITDA.
#[must_use]
pub fn debt_ebitda_ratio(
    balance_sheets: &[BalanceSheet],
    income: &[IncomeStatement],
) -> Option<f64> {
    let debt = balance_sheets.first()?.total_debt?;
    safe_divide(Some(debt), ttm_of(income, |s| s.ebitda))
}
