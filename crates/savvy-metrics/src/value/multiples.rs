//! Price multiples.

use savvy_traits::{BalanceSheet, IncomeStatement, Quote};

use crate::math::{non_zero, safe_divide};
use crate::ttm::ttm_of;

/// Price / TTM EPS.
///
/// Unavailable without a non-zero price or four complete EPS quarters.
#[must_use]
pub fn pe_ratio(quote: Option<&Quote>, income: &[IncomeStatement]) -> Option<f64> {
    let price = non_zero(quote?.price)?;
    safe_divide(Some(price), ttm_of(income, |s| s.eps))
}

/// Market cap / book value of the latest balance sheet.
///
/// Book value is `total_assets - intangible_assets - total_liabilities`.
/// The latest sheet must also carry a non-zero stockholders' equity even
/// though equity is not part of the formula.
#[must_use]
pub fn pb_ratio(quote: Option<&Quote>, balance_sheets: &[BalanceSheet]) -> Option<f64> {
    let market_cap = non_zero(quote?.market_cap)?;
    let latest = balance_sheets.first()?;
    non_zero(latest.total_stockholders_equity)?;

    let book_value =
        latest.total_assets? - latest.intangible_assets? - latest.total_liabilities?;
    safe_divide(Some(market_cap), Some(book_value))
}

/// Market cap / TTM revenue.
#[must_use]
pub fn ps_ratio(quote: Option<&Quote>, income: &[IncomeStatement]) -> Option<f64> {
    let market_cap = non_zero(quote?.market_cap)?;
    safe_divide(Some(market_cap), ttm_of(income, |s| s.revenue))
}
