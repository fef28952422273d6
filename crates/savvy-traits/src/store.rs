//! Storage traits for persisted fundamentals and computed metrics.
//!
//! The metrics engine only ever reads through [`FundamentalsStore`] and
//! writes through [`MetricsRepository`]. [`FundamentalsWriter`] is the
//! ingestion side used when syncing data from the provider.
//!
//! Implementations must be thread-safe (`Send + Sync`); every upsert is an
//! atomic insert-or-replace keyed by the entity's natural key.

use async_trait::async_trait;

use crate::{
    BalanceSheet, CashFlowStatement, CompanyMetrics, CompanyProfile, Dividend, IncomeStatement,
    MetricsFilter, MetricsPage, PageRequest, Quote, Result, Symbol,
};

/// Read access to the persisted market-data series.
///
/// Quarterly accessors return at most `limit` rows whose period is a fiscal
/// quarter, most recent first.
///
/// # Example
///
/// ```no_run
/// use savvy_traits::{FundamentalsStore, Result};
///
/// async fn latest_price(store: &dyn FundamentalsStore, symbol: &str) -> Result<Option<f64>> {
///     Ok(store.latest_quote(symbol).await?.and_then(|q| q.price))
/// }
/// ```
#[async_trait]
pub trait FundamentalsStore: Send + Sync {
    /// The quote with the greatest timestamp, if any.
    async fn latest_quote(&self, symbol: &str) -> Result<Option<Quote>>;

    /// The company profile, if any.
    async fn company_profile(&self, symbol: &str) -> Result<Option<CompanyProfile>>;

    /// The most recent quarterly income statements, descending by date.
    async fn quarterly_income_statements(
        &self,
        symbol: &str,
        limit: usize,
    ) -> Result<Vec<IncomeStatement>>;

    /// The most recent quarterly balance sheets, descending by date.
    async fn quarterly_balance_sheets(
        &self,
        symbol: &str,
        limit: usize,
    ) -> Result<Vec<BalanceSheet>>;

    /// The most recent quarterly cash flow statements, descending by date.
    async fn quarterly_cash_flows(
        &self,
        symbol: &str,
        limit: usize,
    ) -> Result<Vec<CashFlowStatement>>;

    /// The complete dividend history, descending by date.
    async fn dividend_history(&self, symbol: &str) -> Result<Vec<Dividend>>;

    /// Every symbol that has at least one income statement or balance sheet,
    /// sorted ascending.
    async fn symbols_with_financials(&self) -> Result<Vec<Symbol>>;
}

/// Write access used to ingest provider data.
///
/// Each method returns the number of rows written.
#[async_trait]
pub trait FundamentalsWriter: Send + Sync {
    /// Upsert quotes keyed by (symbol, timestamp).
    async fn upsert_quotes(&self, quotes: &[Quote]) -> Result<usize>;

    /// Upsert profiles keyed by symbol.
    async fn upsert_profiles(&self, profiles: &[CompanyProfile]) -> Result<usize>;

    /// Upsert income statements keyed by (symbol, date, period).
    async fn upsert_income_statements(&self, rows: &[IncomeStatement]) -> Result<usize>;

    /// Upsert balance sheets keyed by (symbol, date, period).
    async fn upsert_balance_sheets(&self, rows: &[BalanceSheet]) -> Result<usize>;

    /// Upsert cash flow statements keyed by (symbol, date, period).
    async fn upsert_cash_flows(&self, rows: &[CashFlowStatement]) -> Result<usize>;

    /// Upsert dividends keyed by (symbol, date).
    async fn upsert_dividends(&self, rows: &[Dividend]) -> Result<usize>;
}

/// Persistence and lookup of computed [`CompanyMetrics`].
#[async_trait]
pub trait MetricsRepository: Send + Sync {
    /// Insert or fully replace rows keyed by symbol.
    ///
    /// `created_at` of an existing row is preserved and `updated_at` is set
    /// to the write time; every other column is replaced.
    async fn upsert_metrics(&self, records: &[CompanyMetrics]) -> Result<usize>;

    /// Metrics for one symbol. Lookup is case-insensitive.
    async fn get_metrics(&self, symbol: &str) -> Result<Option<CompanyMetrics>>;

    /// A filtered page of metrics ordered by symbol.
    async fn list_metrics(&self, filter: &MetricsFilter, page: PageRequest)
    -> Result<MetricsPage>;

    /// Distinct non-null sectors, sorted.
    async fn sectors(&self) -> Result<Vec<String>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_traits_are_object_safe() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn FundamentalsStore>();
        assert_send_sync::<dyn FundamentalsWriter>();
        assert_send_sync::<dyn MetricsRepository>();
    }
}
