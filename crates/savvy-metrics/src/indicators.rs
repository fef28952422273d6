//! The full indicator set for one symbol.

use chrono::Datelike;
use savvy_traits::Date;
use serde::{Deserialize, Serialize};

use crate::dividend::{
    DIVIDEND_GROWTH_YEARS, dividend_growth, dividend_payout, dividend_yield,
    years_increasing_dividend,
};
use crate::quality::{copm, debt_ebitda_ratio, roic, rota};
use crate::registry::Indicator;
use crate::snapshot::FundamentalSnapshot;
use crate::value::{ev_ebitda_ratio, ev_fcf_ratio, pb_ratio, pe_ratio, ps_ratio};

/// The thirteen computed indicators. `None` means unavailable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Indicators {
    /// Price / TTM EPS.
    pub pe_ratio: Option<f64>,
    /// Market cap / book value.
    pub pb_ratio: Option<f64>,
    /// Market cap / TTM revenue.
    pub ps_ratio: Option<f64>,
    /// Enterprise value / TTM EBITDA.
    pub ev_ebitda_ratio: Option<f64>,
    /// Enterprise value / TTM free cash flow.
    pub ev_fcf_ratio: Option<f64>,
    /// EBITDA margin.
    pub copm: Option<f64>,
    /// Return on invested capital.
    pub roic: Option<f64>,
    /// Return on tangible assets.
    pub rota: Option<f64>,
    /// Total debt / TTM EBITDA.
    pub debt_ebitda_ratio: Option<f64>,
    /// Trailing dividends / price.
    pub dividend_yield: Option<f64>,
    /// TTM dividends paid / TTM net income.
    pub dividend_payout: Option<f64>,
    /// Ten-year dividend CAGR.
    pub dividend_growth_10y: Option<f64>,
    /// Consecutive years of dividend increases.
    pub years_increasing_dividend: Option<i32>,
}

impl Indicators {
    /// Compute every indicator from a snapshot.
    ///
    /// `as_of` anchors the trailing dividend window and determines which
    /// calendar year is treated as in progress.
    #[must_use]
    pub fn compute(snapshot: &FundamentalSnapshot, as_of: Date) -> Self {
        let quote = snapshot.quote.as_ref();
        let income = snapshot.income_statements.as_slice();
        let sheets = snapshot.balance_sheets.as_slice();
        let flows = snapshot.cash_flows.as_slice();
        let dividends = snapshot.dividends.as_slice();
        let current_year = as_of.year();

        Self {
            pe_ratio: pe_ratio(quote, income),
            pb_ratio: pb_ratio(quote, sheets),
            ps_ratio: ps_ratio(quote, income),
            ev_ebitda_ratio: ev_ebitda_ratio(quote, sheets, income),
            ev_fcf_ratio: ev_fcf_ratio(quote, sheets, flows),
            copm: copm(income),
            roic: roic(income, sheets),
            rota: rota(income, sheets),
            debt_ebitda_ratio: debt_ebitda_ratio(sheets, income),
            dividend_yield: dividend_yield(dividends, quote, as_of),
            dividend_payout: dividend_payout(flows, income),
            dividend_growth_10y: dividend_growth(dividends, DIVIDEND_GROWTH_YEARS, current_year),
            years_increasing_dividend: years_increasing_dividend(dividends, current_year),
        }
    }

    /// Value of one indicator as a float.
    #[must_use]
    pub fn get(&self, indicator: Indicator) -> Option<f64> {
        match indicator {
            Indicator::PeRatio => self.pe_ratio,
            Indicator::PbRatio => self.pb_ratio,
            Indicator::PsRatio => self.ps_ratio,
            Indicator::EvEbitdaRatio => self.ev_ebitda_ratio,
            Indicator::EvFcfRatio => self.ev_fcf_ratio,
            Indicator::Copm => self.copm,
            Indicator::Roic => self.roic,
            Indicator::Rota => self.rota,
            Indicator::DebtEbitdaRatio => self.debt_ebitda_ratio,
            Indicator::DividendYield => self.dividend_yield,
            Indicator::DividendPayout => self.dividend_payout,
            Indicator::DividendGrowth10y => self.dividend_growth_10y,
            Indicator::YearsIncreasingDividend => self.years_increasing_dividend.map(f64::from),
        }
    }

    /// Number of indicators that are available.
    #[must_use]
    pub fn available_count(&self) -> usize {
        Indicator::ALL
            .iter()
            .filter(|i| self.get(**i).is_some())
            .count()
    }
}
