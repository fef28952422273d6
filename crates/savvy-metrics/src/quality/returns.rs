//! Return on invested capital and on tangible assets.

use savvy_traits::{BalanceSheet, IncomeStatement};

use crate::math::{non_zero, safe_divide};
use crate::ttm::ttm_of;

/// Tax rate assumed when the latest quarter does not yield a usable one.
pub const DEFAULT_TAX_RATE: f64 = 0.21;

/// Effective tax rate of a single quarter.
///
/// `income_tax_expense / income_before_tax`, falling back to
/// [`DEFAULT_TAX_RATE`] when pre-tax income is missing or zero, when the tax
/// expense is missing, or when the rate is negative. Rates above 100% are
/// kept as reported.
#[must_use]
pub fn effective_tax_rate(statement: &IncomeStatement) -> f64 {
    non_zero(statement.income_before_tax)
        .and_then(|pre_tax| safe_divide(statement.income_tax_expense, Some(pre_tax)))
        .filter(|rate| *rate >= 0.0)
        .unwrap_or(DEFAULT_TAX_RATE)
}

/// NOPAT / invested capital.
///
/// NOPAT is TTM operating income times one minus the latest quarter's
/// effective tax rate. Invested capital is `total_debt + equity - cash` from
/// the latest balance sheet, with missing components counted as zero, and
/// must be strictly positive.
#[must_use]
pub fn roic(income: &[IncomeStatement], balance_sheets: &[BalanceSheet]) -> Option<f64> {
    let latest_income = income.first()?;
    let latest_sheet = balance_sheets.first()?;
    let operating_income = ttm_of(income, |s| s.operating_income)?;

    let nopat = operating_income * (1.0 - effective_tax_rate(latest_income));

    let invested_capital = latest_sheet.total_debt.unwrap_or(0.0)
        + latest_sheet.total_stockholders_equity.unwrap_or(0.0)
        - latest_sheet.cash_and_cash_equivalents.unwrap_or(0.0);
    if invested_capital <= 0.0 {
        return None;
    }

    safe_divide(Some(nopat), Some(invested_capital))
}

/// TTM net income / tangible assets.
///
/// Tangible assets are `total_assets - goodwill - intangible_assets` from the
/// latest balance sheet, missing components counted as zero, and must be
/// strictly positive.
#[must_use]
pub fn rota(income: &[IncomeStatement], balance_sheets: &[BalanceSheet]) -> Option<f64> {
    let latest_sheet = balance_sheets.first()?;
    let net_income = ttm_of(income, |s| s.net_income)?;

    let tangible_assets = latest_sheet.total_assets.unwrap_or(0.0)
        - latest_sheet.goodwill.unwrap_or(0.0)
        - latest_sheet.intangible_assets.unwrap_or(0.0);
    if tangible_assets <= 0.0 {
        return None;
    }

    safe_divide(Some(net_income), Some(tangible_assets))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{balance_sheet, income};
    use approx::assert_relative_eq;

    fn capital(debt: f64, equity: f64, cash: f64) -> Vec<BalanceSheet> {
        balance_sheet(|b| {
            b.total_debt = Some(debt);
            b.total_stockholders_equity = Some(equity);
            b.cash_and_cash_equivalents = Some(cash);
        })
    }

    fn operating(tax: Option<f64>, pre_tax: Option<f64>) -> Vec<IncomeStatement> {
        income(4, |s| {
            s.operating_income = Some(25.0);
            s.income_tax_expense = tax;
            s.income_before_tax = pre_tax;
        })
    }

    #[test]
    fn test_effective_tax_rate() {
        let rows = operating(Some(20.0), Some(100.0));
        assert_relative_eq!(effective_tax_rate(&rows[0]), 0.20);

        let over = operating(Some(150.0), Some(100.0));
        assert_relative_eq!(effective_tax_rate(&over[0]), 1.5);
    }

    #[test]
    fn test_effective_tax_rate_fallbacks() {
        for (tax, pre_tax) in [
            (Some(-10.0), Some(100.0)),
            (None, Some(100.0)),
            (Some(10.0), None),
            (Some(10.0), Some(0.0)),
        ] {
            let rows = operating(tax, pre_tax);
            assert_relative_eq!(effective_tax_rate(&rows[0]), DEFAULT_TAX_RATE);
        }
    }

    #[test]
    fn test_roic() {
        // NOPAT = 100 * (1 - 0.2) = 80; IC = 300 + 500 - 400 = 400
        let rows = operating(Some(20.0), Some(100.0));
        assert_relative_eq!(
            roic(&rows, &capital(300.0, 500.0, 400.0)).unwrap(),
            0.2,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_roic_negative_tax_uses_default() {
        let rows = operating(Some(-5.0), Some(100.0));
        let expected = 100.0 * (1.0 - DEFAULT_TAX_RATE) / 400.0;
        assert_relative_eq!(roic(&rows, &capital(300.0, 500.0, 400.0)).unwrap(), expected);
    }

    #[test]
    fn test_roic_non_positive_invested_capital() {
        let rows = operating(Some(20.0), Some(100.0));
        assert_eq!(roic(&rows, &capital(100.0, 100.0, 200.0)), None);
        assert_eq!(roic(&rows, &capital(100.0, 100.0, 500.0)), None);
    }

    #[test]
    fn test_roic_three_of_four_quarters() {
        let mut rows = operating(Some(20.0), Some(100.0));
        rows[3].operating_income = None;
        assert_eq!(roic(&rows, &capital(300.0, 500.0, 400.0)), None);
        assert_eq!(roic(&rows[..3], &capital(300.0, 500.0, 400.0)), None);
        assert_eq!(roic(&[], &capital(300.0, 500.0, 400.0)), None);
        assert_eq!(roic(&operating(None, None), &[]), None);
    }

    #[test]
    fn test_rota() {
        let rows = income(4, |s| s.net_income = Some(10.0));
        let sheets = balance_sheet(|b| {
            b.total_assets = Some(500.0);
            b.goodwill = Some(50.0);
            b.intangible_assets = Some(50.0);
        });
        assert_relative_eq!(rota(&rows, &sheets).unwrap(), 0.1);
    }

    #[test]
    fn test_rota_missing_components_default_to_zero() {
        let rows = income(4, |s| s.net_income = Some(10.0));
        let sheets = balance_sheet(|b| b.total_assets = Some(400.0));
        assert_relative_eq!(rota(&rows, &sheets).unwrap(), 0.1);
    }

    #[test]
    fn test_rota_unavailable() {
        let rows = income(4, |s| s.net_income = Some(10.0));
        let no_tangibles = balance_sheet(|b| {
            b.total_assets = Some(100.0);
            b.goodwill = Some(100.0);
        });
        assert_eq!(rota(&rows, &no_tangibles), None);
        assert_eq!(rota(&rows, &[]), None);

        let sheets = balance_sheet(|b| b.total_assets = Some(400.0));
        assert_eq!(rota(&rows[..3], &sheets), None);
    }

    #[test]
    fn test_rota_three_of_four_quarters() {
        let mut rows = income(4, |s| s.net_income = Some(10.0));
        rows[2].net_income = None;
        let sheets = balance_sheet(|b| b.total_assets = Some(400.0));
        assert_eq!(rota(&rows, &sheets), None);
    }
}
