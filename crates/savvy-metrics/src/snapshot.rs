//! Immutable per-symbol view of every series the calculators read.

use savvy_traits::{
    BalanceSheet, CashFlowStatement, CompanyProfile, Dividend, FundamentalsStore, IncomeStatement,
    Quote, Result, Symbol,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ttm::TTM_QUARTERS;

/// All rows needed to compute one symbol's metrics.
///
/// The snapshot is fetched once and never refreshed, so every calculator
/// sees the same data. Statement vectors hold at most four quarterly rows,
/// most recent first; dividends hold the full history, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FundamentalSnapshot {
    /// Ticker symbol.
    pub symbol: Symbol,
    /// Latest quote.
    pub quote: Option<Quote>,
    /// Company profile.
    pub profile: Option<CompanyProfile>,
    /// Up to four most recent quarterly income statements.
    pub income_statements: Vec<IncomeStatement>,
    /// Up to four most recent quarterly balance sheets.
    pub balance_sheets: Vec<BalanceSheet>,
    /// Up to four most recent quarterly cash flow statements.
    pub cash_flows: Vec<CashFlowStatement>,
    /// Complete dividend history.
    pub dividends: Vec<Dividend>,
}

impl FundamentalSnapshot {
    /// Empty snapshot for a symbol.
    #[must_use]
    pub fn new(symbol: impl Into<Symbol>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Default::default()
        }
    }

    /// Read every series for `symbol` from the store.
    ///
    /// # Errors
    ///
    /// Propagates any storage error. Missing rows are not errors.
    pub async fn load(store: &dyn FundamentalsStore, symbol: &str) -> Result<Self> {
        let quote = store.latest_quote(symbol).await?;
        let profile = store.company_profile(symbol).await?;
        let income_statements = store
            .quarterly_income_statements(symbol, TTM_QUARTERS)
            .await?;
        let balance_sheets = store.quarterly_balance_sheets(symbol, TTM_QUARTERS).await?;
        let cash_flows = store.quarterly_cash_flows(symbol, TTM_QUARTERS).await?;
        let dividends = store.dividend_history(symbol).await?;

        debug!(
            symbol,
            income = income_statements.len(),
            balance = balance_sheets.len(),
            cash_flow = cash_flows.len(),
            dividends = dividends.len(),
            has_quote = quote.is_some(),
            "Loaded fundamentals"
        );

        Ok(Self {
            symbol: symbol.to_string(),
            quote,
            profile,
            income_statements,
            balance_sheets,
            cash_flows,
            dividends,
        })
    }

    /// Whether there is anything to compute from.
    ///
    /// False when both the income statement and the balance sheet series
    /// are empty.
    #[must_use]
    pub fn has_financials(&self) -> bool {
        !self.income_statements.is_empty() || !self.balance_sheets.is_empty()
    }

    /// The most recent balance sheet.
    #[must_use]
    pub fn latest_balance_sheet(&self) -> Option<&BalanceSheet> {
        self.balance_sheets.first()
    }

    /// Market cap from the latest quote.
    #[must_use]
    pub fn market_cap(&self) -> Option<f64> {
        self.quote.as_ref().and_then(|q| q.market_cap)
    }
}
