//! Entities used throughout the savvy workspace.
//!
//! Every numeric field that the provider may omit is an `Option<f64>`: an
//! absent value is kept distinct from zero all the way through the metrics
//! pipeline. Rows carry an explicit column mapping (`sqlx::FromRow` behind
//! the `sqlx` feature) rather than any reflective field enumeration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A market symbol identifier, e.g. "AAPL".
pub type Symbol = String;

/// Returns whether a reporting period label denotes a fiscal quarter.
///
/// Quarter labels are "Q1".."Q4"; the comparison is case-insensitive and
/// annual labels such as "FY" never match.
///
/// # Example
///
/// ```
/// use savvy_traits::is_quarterly_period;
///
/// assert!(is_quarterly_period("Q3"));
/// assert!(is_quarterly_period("q1"));
/// assert!(!is_quarterly_period("FY"));
/// ```
#[must_use]
pub fn is_quarterly_period(period: &str) -> bool {
    period
        .chars()
        .next()
        .is_some_and(|c| c.eq_ignore_ascii_case(&'q'))
}

/// Common accessors for periodic financial statements.
pub trait Statement {
    /// Ticker symbol of the reporting company.
    fn symbol(&self) -> &str;

    /// Period end date.
    fn date(&self) -> Date;

    /// Reporting period label ("Q1".."Q4", "FY", ...).
    fn period(&self) -> &str;

    /// Whether this row reports a single fiscal quarter.
    fn is_quarterly(&self) -> bool {
        is_quarterly_period(self.period())
    }
}

macro_rules! impl_statement {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Statement for $ty {
                fn symbol(&self) -> &str {
                    &self.symbol
                }

                fn date(&self) -> Date {
                    self.date
                }

                fn period(&self) -> &str {
                    &self.period
                }
            }
        )+
    };
}

impl_statement!(IncomeStatement, BalanceSheet, CashFlowStatement);

/// A price quote snapshot. Several rows exist per symbol over time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Quote {
    /// Ticker symbol.
    pub symbol: Symbol,
    /// Last traded price.
    pub price: Option<f64>,
    /// Market capitalization.
    pub market_cap: Option<f64>,
    /// Quote time as Unix seconds. The latest quote has the largest value.
    pub timestamp: i64,
}

/// Company reference data. At most one row per symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CompanyProfile {
    /// Ticker symbol.
    pub symbol: Symbol,
    /// Company name.
    pub company_name: String,
    /// Sector classification.
    pub sector: Option<String>,
    /// Industry classification.
    pub industry: Option<String>,
    /// Short exchange name, e.g. "NASDAQ".
    pub exchange: Option<String>,
}

/// Income statement for one reporting period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct IncomeStatement {
    /// Ticker symbol.
    pub symbol: Symbol,
    /// Period end date.
    pub date: Date,
    /// Reporting period label.
    pub period: String,
    /// Total revenue.
    pub revenue: Option<f64>,
    /// Earnings per share (basic).
    pub eps: Option<f64>,
    /// EBITDA.
    pub ebitda: Option<f64>,
    /// Operating income.
    pub operating_income: Option<f64>,
    /// Income before tax.
    pub income_before_tax: Option<f64>,
    /// Income tax expense.
    pub income_tax_expense: Option<f64>,
    /// Net income.
    pub net_income: Option<f64>,
}

/// Balance sheet for one reporting period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct BalanceSheet {
    /// Ticker symbol.
    pub symbol: Symbol,
    /// Period end date.
    pub date: Date,
    /// Reporting period label.
    pub period: String,
    /// Total assets.
    pub total_assets: Option<f64>,
    /// Total liabilities.
    pub total_liabilities: Option<f64>,
    /// Total stockholders' equity.
    pub total_stockholders_equity: Option<f64>,
    /// Intangible assets (excluding goodwill).
    pub intangible_assets: Option<f64>,
    /// Goodwill.
    pub goodwill: Option<f64>,
    /// Total debt.
    pub total_debt: Option<f64>,
    /// Cash and cash equivalents.
    pub cash_and_cash_equivalents: Option<f64>,
}

/// Cash flow statement for one reporting period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CashFlowStatement {
    /// Ticker symbol.
    pub symbol: Symbol,
    /// Period end date.
    pub date: Date,
    /// Reporting period label.
    pub period: String,
    /// Operating cash flow.
    pub operating_cash_flow: Option<f64>,
    /// Capital expenditure.
    pub capital_expenditure: Option<f64>,
    /// Free cash flow.
    pub free_cash_flow: Option<f64>,
    /// Dividends paid, usually reported as a negative outflow.
    pub dividends_paid: Option<f64>,
}

/// A single ex-dividend event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Dividend {
    /// Ticker symbol.
    pub symbol: Symbol,
    /// Ex-dividend date.
    pub date: Date,
    /// Declared amount per share.
    pub dividend: Option<f64>,
    /// Split-adjusted amount per share.
    pub adj_dividend: Option<f64>,
}

impl Dividend {
    /// Amount paid per share, preferring the adjusted figure.
    ///
    /// A missing or zero adjusted amount falls back to the declared amount,
    /// and a missing declared amount counts as zero.
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.adj_dividend
            .filter(|v| *v != 0.0)
            .or(self.dividend)
            .unwrap_or(0.0)
    }
}

/// Pre-computed metrics for a company. Exactly one row per symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CompanyMetrics {
    /// Ticker symbol (unique key).
    pub symbol: Symbol,
    /// Company name from the profile.
    pub company_name: Option<String>,
    /// Sector from the profile.
    pub sector: Option<String>,
    /// Market capitalization from the latest quote.
    pub market_cap: Option<f64>,

    // Valuation
    /// Price / TTM EPS.
    pub pe_ratio: Option<f64>,
    /// Market cap / book value.
    pub pb_ratio: Option<f64>,
    /// Market cap / TTM revenue.
    pub ps_ratio: Option<f64>,

    // Enterprise value
    /// Enterprise value / TTM EBITDA.
    pub ev_ebitda_ratio: Option<f64>,
    /// Enterprise value / TTM free cash flow.
    pub ev_fcf_ratio: Option<f64>,

    // Profitability
    /// Cash operating profit margin (EBITDA margin).
    pub copm: Option<f64>,
    /// Return on invested capital.
    pub roic: Option<f64>,
    /// Return on tangible assets.
    pub rota: Option<f64>,

    // Leverage
    /// Total debt / TTM EBITDA.
    pub debt_ebitda_ratio: Option<f64>,

    // Dividends
    /// Trailing 365-day dividends / price.
    pub dividend_yield: Option<f64>,
    /// TTM dividends paid / TTM net income.
    pub dividend_payout: Option<f64>,
    /// Ten-year dividend CAGR.
    pub dividend_growth_10y: Option<f64>,
    /// Consecutive years of dividend increases.
    pub years_increasing_dividend: Option<i32>,

    /// Composite quality score.
    pub score: Option<f64>,

    /// First time the row was written. Maintained by the store.
    pub created_at: Option<DateTime<Utc>>,
    /// Last time the row was replaced. Maintained by the store.
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_quarterly_period() {
        for label in ["Q1", "Q2", "Q3", "Q4", "q4"] {
            assert!(is_quarterly_period(label), "{label}");
        }
        assert!(!is_quarterly_period("FY"));
        assert!(!is_quarterly_period("annual"));
        assert!(!is_quarterly_period(""));
    }

    #[test]
    fn test_statement_accessors() {
        let stmt = IncomeStatement {
            symbol: "AAPL".to_string(),
            date: date(2024, 3, 30),
            period: "Q2".to_string(),
            ..Default::default()
        };
        assert_eq!(stmt.symbol(), "AAPL");
        assert_eq!(stmt.date(), date(2024, 3, 30));
        assert!(stmt.is_quarterly());

        let annual = BalanceSheet {
            period: "FY".to_string(),
            ..Default::default()
        };
        assert!(!annual.is_quarterly());
    }

    #[test]
    fn test_dividend_amount_prefers_adjusted() {
        let div = Dividend {
            dividend: Some(0.50),
            adj_dividend: Some(0.25),
            ..Default::default()
        };
        assert_eq!(div.amount(), 0.25);
    }

    #[test]
    fn test_dividend_amount_fallbacks() {
        let only_declared = Dividend {
            dividend: Some(0.40),
            ..Default::default()
        };
        assert_eq!(only_declared.amount(), 0.40);

        let zero_adjusted = Dividend {
            dividend: Some(0.40),
            adj_dividend: Some(0.0),
            ..Default::default()
        };
        assert_eq!(zero_adjusted.amount(), 0.40);

        assert_eq!(Dividend::default().amount(), 0.0);
    }
}
