//! Indicator registry for discovering and categorizing the computed ratios.
//!
//! Every indicator stored on a metrics record is listed here with its
//! category and a short description.

use std::fmt;
use std::str::FromStr;

use savvy_traits::SavvyError;
use serde::{Deserialize, Serialize};

/// One of the thirteen indicators computed per symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    /// Price / TTM EPS
    PeRatio,
    /// Market cap / book value
    PbRatio,
    /// Market cap / TTM revenue
    PsRatio,
    /// Enterprise value / TTM EBITDA
    EvEbitdaRatio,
    /// Enterprise value / TTM free cash flow
    EvFcfRatio,
    /// EBITDA margin
    Copm,
    /// Return on invested capital
    Roic,
    /// Return on tangible assets
    Rota,
    /// Total debt / TTM EBITDA
    DebtEbitdaRatio,
    /// Trailing dividends / price
    DividendYield,
    /// TTM dividends paid / TTM net income
    DividendPayout,
    /// Ten-year dividend CAGR
    DividendGrowth10y,
    /// Consecutive years of dividend increases
    YearsIncreasingDividend,
}

impl Indicator {
    /// All indicators in record order.
    pub const ALL: [Self; 13] = [
        Self::PeRatio,
        Self::PbRatio,
        Self::PsRatio,
        Self::EvEbitdaRatio,
        Self::EvFcfRatio,
        Self::Copm,
        Self::Roic,
        Self::Rota,
        Self::DebtEbitdaRatio,
        Self::DividendYield,
        Self::DividendPayout,
        Self::DividendGrowth10y,
        Self::YearsIncreasingDividend,
    ];

    /// Column name used on metrics records.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PeRatio => "pe_ratio",
            Self::PbRatio => "pb_ratio",
            Self::PsRatio => "ps_ratio",
            Self::EvEbitdaRatio => "ev_ebitda_ratio",
            Self::EvFcfRatio => "ev_fcf_ratio",
            Self::Copm => "copm",
            Self::Roic => "roic",
            Self::Rota => "rota",
            Self::DebtEbitdaRatio => "debt_ebitda_ratio",
            Self::DividendYield => "dividend_yield",
            Self::DividendPayout => "dividend_payout",
            Self::DividendGrowth10y => "dividend_growth_10y",
            Self::YearsIncreasingDividend => "years_increasing_dividend",
        }
    }

    /// Short display label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::PeRatio => "P/E",
            Self::PbRatio => "P/B",
            Self::PsRatio => "P/S",
            Self::EvEbitdaRatio => "EV/EBITDA",
            Self::EvFcfRatio => "EV/FCF",
            Self::Copm => "COPM",
            Self::Roic => "ROIC",
            Self::Rota => "ROTA",
            Self::DebtEbitdaRatio => "Debt/EBITDA",
            Self::DividendYield => "Dividend Yield",
            Self::DividendPayout => "Dividend Payout",
            Self::DividendGrowth10y => "10Y Dividend Growth",
            Self::YearsIncreasingDividend => "Years Increasing",
        }
    }

    /// Registry metadata for this indicator.
    #[must_use]
    pub fn info(&self) -> IndicatorInfo {
        let (category, description, requires_ttm) = match self {
            Self::PeRatio => (
                IndicatorCategory::Valuation,
                "Share price relative to trailing twelve month earnings per share",
                true,
            ),
            Self::PbRatio => (
                IndicatorCategory::Valuation,
                "Market cap relative to book value net of intangibles",
                false,
            ),
            Self::PsRatio => (
                IndicatorCategory::Valuation,
                "Market cap relative to trailing twelve month revenue",
                true,
            ),
            Self::EvEbitdaRatio => (
                IndicatorCategory::EnterpriseValue,
                "Enterprise value relative to trailing twelve month EBITDA",
                true,
            ),
            Self::EvFcfRatio => (
                IndicatorCategory::EnterpriseValue,
                "Enterprise value relative to trailing twelve month free cash flow",
                true,
            ),
            Self::Copm => (
                IndicatorCategory::Profitability,
                "Cash operating profit margin (EBITDA over revenue)",
                true,
            ),
            Self::Roic => (
                IndicatorCategory::Profitability,
                "After-tax operating income relative to invested capital",
                true,
            ),
            Self::Rota => (
                IndicatorCategory::Profitability,
                "Net income relative to tangible assets",
                true,
            ),
            Self::DebtEbitdaRatio => (
                IndicatorCategory::Leverage,
                "Total debt relative to trailing twelve month EBITDA",
                true,
            ),
            Self::DividendYield => (
                IndicatorCategory::Dividend,
                "Dividends paid over the last 365 days relative to price",
                false,
            ),
            Self::DividendPayout => (
                IndicatorCategory::Dividend,
                "Dividends paid relative to net income, trailing twelve months",
                true,
            ),
            Self::DividendGrowth10y => (
                IndicatorCategory::Dividend,
                "Compound annual growth of yearly dividends over ten years",
                false,
            ),
            Self::YearsIncreasingDividend => (
                IndicatorCategory::Dividend,
                "Consecutive completed years with a higher dividend total",
                false,
            ),
        };

        IndicatorInfo {
            indicator: *self,
            name: self.name(),
            category,
            description,
            requires_ttm,
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Indicator {
    type Err = SavvyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|i| i.name() == s)
            .ok_or_else(|| SavvyError::InvalidData(format!("Unknown indicator: {s}")))
    }
}

/// Indicator category classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorCategory {
    /// Price multiples
    Valuation,
    /// Enterprise value multiples
    EnterpriseValue,
    /// Margins and returns on capital
    Profitability,
    /// Debt load
    Leverage,
    /// Dividend income and history
    Dividend,
}

impl IndicatorCategory {
    /// All categories.
    pub const ALL: [Self; 5] = [
        Self::Valuation,
        Self::EnterpriseValue,
        Self::Profitability,
        Self::Leverage,
        Self::Dividend,
    ];

    /// Get a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &str {
        match self {
            Self::Valuation => "Price multiples comparing market value to fundamentals",
            Self::EnterpriseValue => "Enterprise value multiples that account for debt and cash",
            Self::Profitability => "Operating margins and returns on capital",
            Self::Leverage => "Debt relative to cash earnings",
            Self::Dividend => "Dividend income, payout, growth and consistency",
        }
    }

    /// Lowercase identifier, as accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Valuation => "valuation",
            Self::EnterpriseValue => "enterprise_value",
            Self::Profitability => "profitability",
            Self::Leverage => "leverage",
            Self::Dividend => "dividend",
        }
    }
}

impl FromStr for IndicatorCategory {
    type Err = SavvyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| SavvyError::InvalidData(format!("Unknown indicator category: {s}")))
    }
}

/// Metadata about an indicator.
#[derive(Debug, Clone, Serialize)]
pub struct IndicatorInfo {
    /// The indicator
    pub indicator: Indicator,

    /// Column name on metrics records
    pub name: &'static str,

    /// Category classification
    pub category: IndicatorCategory,

    /// Human-readable description
    pub description: &'static str,

    /// Whether the indicator needs four complete quarters
    pub requires_ttm: bool,
}

/// Get information about all indicators.
#[must_use]
pub fn available_indicators() -> Vec<IndicatorInfo> {
    Indicator::ALL.iter().map(Indicator::info).collect()
}

/// Get all indicators in a specific category.
#[must_use]
pub fn indicators_by_category(category: IndicatorCategory) -> Vec<IndicatorInfo> {
    available_indicators()
        .into_iter()
        .filter(|info| info.category == category)
        .collect()
}

/// Get information about a specific indicator by column name.
#[must_use]
pub fn get_indicator_info(name: &str) -> Option<IndicatorInfo> {
    name.parse::<Indicator>().ok().map(|i| i.info())
}
