//! Enterprise value and the EV multiples.

use savvy_traits::{BalanceSheet, CashFlowStatement, IncomeStatement, Quote};

use crate::math::{non_zero, safe_divide};
use crate::ttm::ttm_of;

/// Market cap + total debt - cash, from the latest balance sheet.
///
/// Missing debt or cash count as zero. Unavailable without a non-zero market
/// cap or a balance sheet.
#[must_use]
pub fn enterprise_value(quote: Option<&Quote>, balance_sheet: Option<&BalanceSheet>) -> Option<f64> {
    let market_cap = non_zero(quote?.market_cap)?;
    let sheet = balance_sheet?;
    Some(
        market_cap + sheet.total_debt.unwrap_or(0.0)
            - sheet.cash_and_cash_equivalents.unwrap_or(0.0),
    )
}

/// Enterprise value / TTM EBITDA.
#[must_use]
pub fn ev_ebitda_ratio(
    quote: Option<&Quote>,
    balance_sheets: &[BalanceSheet],
    income: &[IncomeStatement],
) -> Option<f64> {
    let ev = enterprise_value(quote, balance_sheets.first())?;
    safe_divide(Some(ev), ttm_of(income, |s| s.ebitda))
}

/// Enterprise value / TTM free cash flow.
#[must_use]
pub fn ev_fcf_ratio(
    quote: Option<&Quote>,
    balance_sheets: &[BalanceSheet],
    cash_flows: &[CashFlowStatement],
) -> Option<f64> {
    let ev = enterprise_value(quote, balance_sheets.first())?;
    safe_divide(Some(ev), ttm_of(cash_flows, |s| s.free_cash_flow))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{balance_sheet, cash_flows, income, quote};
    use approx::assert_relative_eq;

    fn sheets() -> Vec<BalanceSheet> {
        balance_sheet(|b| {
            b.total_debt = Some(300.0);
            b.cash_and_cash_equivalents = Some(100.0);
        })
    }

    #[test]
    fn test_enterprise_value() {
        let q = quote(None, Some(1000.0));
        let ev = enterprise_value(Some(&q), sheets().first()).unwrap();
        assert_relative_eq!(ev, 1200.0);
    }

    #[test]
    fn test_enterprise_value_defaults_debt_and_cash() {
        let q = quote(None, Some(1000.0));
        let bare = balance_sheet(|_| {});
        assert_relative_eq!(enterprise_value(Some(&q), bare.first()).unwrap(), 1000.0);
    }

    #[test]
    fn test_enterprise_value_unavailable() {
        assert_eq!(enterprise_value(Some(&quote(None, Some(1000.0))), None), None);
        assert_eq!(enterprise_value(Some(&quote(None, None)), sheets().first()), None);
        assert_eq!(enterprise_value(Some(&quote(None, Some(0.0))), sheets().first()), None);
        assert_eq!(enterprise_value(None, sheets().first()), None);
    }

    #[test]
    fn test_ev_ebitda_ratio() {
        let q = quote(None, Some(1000.0));
        let rows = income(4, |s| s.ebitda = Some(50.0));
        assert_relative_eq!(ev_ebitda_ratio(Some(&q), &sheets(), &rows).unwrap(), 6.0);

        let mut partial = rows;
        partial[1].ebitda = None;
        assert_eq!(ev_ebitda_ratio(Some(&q), &sheets(), &partial), None);
        assert_eq!(ev_ebitda_ratio(Some(&q), &[], &partial), None);
    }

    #[test]
    fn test_ev_fcf_ratio() {
        let q = quote(None, Some(1000.0));
        let rows = cash_flows(4, |c| c.free_cash_flow = Some(30.0));
        assert_relative_eq!(ev_fcf_ratio(Some(&q), &sheets(), &rows).unwrap(), 10.0);
        assert_eq!(ev_fcf_ratio(Some(&q), &sheets(), &rows[..3]), None);
    }

    #[test]
    fn test_ev_fcf_ratio_three_of_four_quarters() {
        let q = quote(None, Some(1000.0));
        let mut rows = cash_flows(4, |c| c.free_cash_flow = Some(30.0));
        rows[2].free_cash_flow = None;
        assert_eq!(ev_fcf_ratio(Some(&q), &sheets(), &rows), None);
    }
}
