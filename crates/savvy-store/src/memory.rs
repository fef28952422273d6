//! In-process backend with the same keying rules as [`PgStore`](crate::PgStore).

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use savvy_traits::{
    BalanceSheet, CashFlowStatement, CompanyMetrics, CompanyProfile, Date, Dividend,
    FundamentalsStore, FundamentalsWriter, IncomeStatement, MetricsFilter, MetricsPage,
    MetricsRepository, PageRequest, Quote, Result, Statement, Symbol,
};
use tokio::sync::RwLock;

type StatementKey = (Symbol, Date, String);

#[derive(Debug, Default)]
struct Tables {
    quotes: BTreeMap<(Symbol, i64), Quote>,
    profiles: BTreeMap<Symbol, CompanyProfile>,
    income: BTreeMap<StatementKey, IncomeStatement>,
    balance: BTreeMap<StatementKey, BalanceSheet>,
    cash_flows: BTreeMap<StatementKey, CashFlowStatement>,
    dividends: BTreeMap<(Symbol, Date), Dividend>,
    metrics: BTreeMap<Symbol, CompanyMetrics>,
}

/// Store that keeps every table in memory.
///
/// Rows are keyed exactly like the PostgreSQL tables, so upserting the same
/// natural key twice replaces the earlier row.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn statement_key<S: Statement>(row: &S) -> StatementKey {
    (row.symbol().to_string(), row.date(), row.period().to_string())
}

fn latest_quarters<S: Statement + Clone>(
    rows: &BTreeMap<StatementKey, S>,
    symbol: &str,
    limit: usize,
) -> Vec<S> {
    let mut matching: Vec<S> = rows
        .values()
        .filter(|r| r.symbol() == symbol && r.is_quarterly())
        .cloned()
        .collect();
    matching.sort_by(|a, b| b.date().cmp(&a.date()));
    matching.truncate(limit);
    matching
}

#[async_trait]
impl FundamentalsStore for MemoryStore {
    async fn latest_quote(&self, symbol: &str) -> Result<Option<Quote>> {
        let tables = self.tables.read().await;
        Ok(tables
            .quotes
            .values()
            .filter(|q| q.symbol == symbol)
            .max_by_key(|q| q.timestamp)
            .cloned())
    }

    async fn company_profile(&self, symbol: &str) -> Result<Option<CompanyProfile>> {
        Ok(self.tables.read().await.profiles.get(symbol).cloned())
    }

    async fn quarterly_income_statements(
        &self,
        symbol: &str,
        limit: usize,
    ) -> Result<Vec<IncomeStatement>> {
        Ok(latest_quarters(&self.tables.read().await.income, symbol, limit))
    }

    async fn quarterly_balance_sheets(
        &self,
        symbol: &str,
        limit: usize,
    ) -> Result<Vec<BalanceSheet>> {
        Ok(latest_quarters(&self.tables.read().await.balance, symbol, limit))
    }

    async fn quarterly_cash_flows(
        &self,
        symbol: &str,
        limit: usize,
    ) -> Result<Vec<CashFlowStatement>> {
        Ok(latest_quarters(&self.tables.read().await.cash_flows, symbol, limit))
    }

    async fn dividend_history(&self, symbol: &str) -> Result<Vec<Dividend>> {
        let tables = self.tables.read().await;
        // Keys sort by (symbol, date) ascending.
        Ok(tables
            .dividends
            .values()
            .filter(|d| d.symbol == symbol)
            .rev()
            .cloned()
            .collect())
    }

    async fn symbols_with_financials(&self) -> Result<Vec<Symbol>> {
        let tables = self.tables.read().await;
        let mut symbols: Vec<Symbol> = tables
            .income
            .keys()
            .chain(tables.balance.keys())
            .map(|(symbol, _, _)| symbol.clone())
            .collect();
        symbols.sort();
        symbols.dedup();
        Ok(symbols)
    }
}

#[async_trait]
impl FundamentalsWriter for MemoryStore {
    async fn upsert_quotes(&self, quotes: &[Quote]) -> Result<usize> {
        let mut tables = self.tables.write().await;
        for q in quotes {
            tables.quotes.insert((q.symbol.clone(), q.timestamp), q.clone());
        }
        Ok(quotes.len())
    }

    async fn upsert_profiles(&self, profiles: &[CompanyProfile]) -> Result<usize> {
        let mut tables = self.tables.write().await;
        for p in profiles {
            tables.profiles.insert(p.symbol.clone(), p.clone());
        }
        Ok(profiles.len())
    }

    async fn upsert_income_statements(&self, rows: &[IncomeStatement]) -> Result<usize> {
        let mut tables = self.tables.write().await;
        for r in rows {
            tables.income.insert(statement_key(r), r.clone());
        }
        Ok(rows.len())
    }

    async fn upsert_balance_sheets(&self, rows: &[BalanceSheet]) -> Result<usize> {
        let mut tables = self.tables.write().await;
        for r in rows {
            tables.balance.insert(statement_key(r), r.clone());
        }
        Ok(rows.len())
    }

    async fn upsert_cash_flows(&self, rows: &[CashFlowStatement]) -> Result<usize> {
        let mut tables = self.tables.write().await;
        for r in rows {
            tables.cash_flows.insert(statement_key(r), r.clone());
        }
        Ok(rows.len())
    }

    async fn upsert_dividends(&self, rows: &[Dividend]) -> Result<usize> {
        let mut tables = self.tables.write().await;
        for d in rows {
            tables.dividends.insert((d.symbol.clone(), d.date), d.clone());
        }
        Ok(rows.len())
    }
}

#[async_trait]
impl MetricsRepository for MemoryStore {
    async fn upsert_metrics(&self, records: &[CompanyMetrics]) -> Result<usize> {
        let now = Utc::now();
        let mut tables = self.tables.write().await;
        for record in records {
            let created_at = tables
                .metrics
                .get(&record.symbol)
                .and_then(|existing| existing.created_at)
                .unwrap_or(now);
            let row = CompanyMetrics {
                created_at: Some(created_at),
                updated_at: Some(now),
                ..record.clone()
            };
            tables.metrics.insert(record.symbol.clone(), row);
        }
        Ok(records.len())
    }

    async fn get_metrics(&self, symbol: &str) -> Result<Option<CompanyMetrics>> {
        let tables = self.tables.read().await;
        Ok(tables.metrics.get(&symbol.to_uppercase()).cloned())
    }

    async fn list_metrics(&self, filter: &MetricsFilter, page: PageRequest) -> Result<MetricsPage> {
        let tables = self.tables.read().await;
        let matching: Vec<&CompanyMetrics> =
            tables.metrics.values().filter(|m| filter.matches(m)).collect();

        let items = matching
            .iter()
            .skip(page.offset() as usize)
            .take(page.page_size() as usize)
            .map(|m| (*m).clone())
            .collect();

        Ok(MetricsPage::new(items, matching.len() as u64, page))
    }

    async fn sectors(&self) -> Result<Vec<String>> {
        let tables = self.tables.read().await;
        let mut sectors: Vec<String> = tables
            .metrics
            .values()
            .filter_map(|m| m.sector.clone())
            .collect();
        sectors.sort();
        sectors.dedup();
        Ok(sectors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).unwrap()
    }

    fn income(symbol: &str, day: Date, period: &str, revenue: f64) -> IncomeStatement {
        IncomeStatement {
            symbol: symbol.to_string(),
            date: day,
            period: period.to_string(),
            revenue: Some(revenue),
            ..Default::default()
        }
    }

    fn metrics(symbol: &str, sector: Option<&str>, pe: Option<f64>) -> CompanyMetrics {
        CompanyMetrics {
            symbol: symbol.to_string(),
            sector: sector.map(str::to_string),
            pe_ratio: pe,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_latest_quote_by_timestamp() {
        let store = MemoryStore::new();
        let quote = |ts: i64, price: f64| Quote {
            symbol: "AAPL".to_string(),
            price: Some(price),
            market_cap: None,
            timestamp: ts,
        };
        store
            .upsert_quotes(&[quote(200, 2.0), quote(300, 3.0), quote(100, 1.0)])
            .await
            .unwrap();

        let latest = store.latest_quote("AAPL").await.unwrap().unwrap();
        assert_eq!(latest.price, Some(3.0));
        assert!(store.latest_quote("MSFT").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_quarterly_rows_newest_first_and_limited() {
        let store = MemoryStore::new();
        store
            .upsert_income_statements(&[
                income("AAPL", date(2024, 3, 31), "Q1", 1.0),
                income("AAPL", date(2024, 9, 30), "Q3", 3.0),
                income("AAPL", date(2024, 12, 31), "FY", 99.0),
                income("AAPL", date(2024, 6, 30), "Q2", 2.0),
                income("AAPL", date(2023, 12, 31), "Q4", 0.5),
                income("MSFT", date(2024, 12, 31), "Q4", 7.0),
            ])
            .await
            .unwrap();

        let rows = store.quarterly_income_statements("AAPL", 3).await.unwrap();
        let revenue: Vec<_> = rows.iter().map(|r| r.revenue).collect();
        assert_eq!(revenue, vec![Some(3.0), Some(2.0), Some(1.0)]);
    }

    #[tokio::test]
    async fn test_upsert_replaces_on_natural_key() {
        let store = MemoryStore::new();
        let day = date(2024, 3, 31);
        store
            .upsert_income_statements(&[income("AAPL", day, "Q1", 1.0)])
            .await
            .unwrap();
        store
            .upsert_income_statements(&[income("AAPL", day, "Q1", 5.0)])
            .await
            .unwrap();

        let rows = store.quarterly_income_statements("AAPL", 4).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].revenue, Some(5.0));
    }

    #[tokio::test]
    async fn test_dividend_history_descending() {
        let store = MemoryStore::new();
        let div = |day: Date| Dividend {
            symbol: "KO".to_string(),
            date: day,
            dividend: Some(0.5),
            adj_dividend: None,
        };
        store
            .upsert_dividends(&[div(date(2022, 6, 1)), div(date(2024, 6, 1)), div(date(2023, 6, 1))])
            .await
            .unwrap();

        let dates: Vec<_> = store
            .dividend_history("KO")
            .await
            .unwrap()
            .iter()
            .map(|d| d.date)
            .collect();
        assert_eq!(dates, vec![date(2024, 6, 1), date(2023, 6, 1), date(2022, 6, 1)]);
    }

    #[tokio::test]
    async fn test_symbols_with_financials() {
        let store = MemoryStore::new();
        store
            .upsert_income_statements(&[income("MSFT", date(2024, 3, 31), "Q1", 1.0)])
            .await
            .unwrap();
        store
            .upsert_balance_sheets(&[BalanceSheet {
                symbol: "AAPL".to_string(),
                date: date(2024, 3, 31),
                period: "Q1".to_string(),
                ..Default::default()
            }])
            .await
            .unwrap();
        store
            .upsert_dividends(&[Dividend {
                symbol: "KO".to_string(),
                date: date(2024, 3, 31),
                ..Default::default()
            }])
            .await
            .unwrap();

        let symbols = store.symbols_with_financials().await.unwrap();
        assert_eq!(symbols, vec!["AAPL".to_string(), "MSFT".to_string()]);
    }

    #[tokio::test]
    async fn test_metrics_upsert_keeps_created_at() {
        let store = MemoryStore::new();
        store
            .upsert_metrics(&[metrics("AAPL", None, Some(10.0))])
            .await
            .unwrap();
        let first = store.get_metrics("aapl").await.unwrap().unwrap();

        store
            .upsert_metrics(&[metrics("AAPL", None, Some(20.0))])
            .await
            .unwrap();
        let second = store.get_metrics("AAPL").await.unwrap().unwrap();

        assert_eq!(second.pe_ratio, Some(20.0));
        assert_eq!(second.created_at, first.created_at);
        assert!(second.updated_at >= first.updated_at);
    }

    #[tokio::test]
    async fn test_list_metrics_filters_and_pages() {
        let store = MemoryStore::new();
        store
            .upsert_metrics(&[
                metrics("MSFT", Some("Technology"), Some(30.0)),
                metrics("AAPL", Some("Technology"), Some(25.0)),
                metrics("XOM", Some("Energy"), Some(9.0)),
                metrics("NVDA", Some("Technology"), None),
            ])
            .await
            .unwrap();

        let tech = MetricsFilter {
            sector: Some("Technology".to_string()),
            ..Default::default()
        };
        let page = store
            .list_metrics(&tech, PageRequest::new(1, 2).unwrap())
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.pages, 2);
        let symbols: Vec<_> = page.items.iter().map(|m| m.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AAPL", "MSFT"]);

        let page = store
            .list_metrics(&tech, PageRequest::new(2, 2).unwrap())
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].symbol, "NVDA");

        let cheap = MetricsFilter {
            max_pe_ratio: Some(26.0),
            ..Default::default()
        };
        let page = store
            .list_metrics(&cheap, PageRequest::default())
            .await
            .unwrap();
        let symbols: Vec<_> = page.items.iter().map(|m| m.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AAPL", "XOM"]);
    }

    #[tokio::test]
    async fn test_sectors_distinct_sorted() {
        let store = MemoryStore::new();
        store
            .upsert_metrics(&[
                metrics("MSFT", Some("Technology"), None),
                metrics("XOM", Some("Energy"), None),
                metrics("AAPL", Some("Technology"), None),
                metrics("ZZZ", None, None),
            ])
            .await
            .unwrap();

        assert_eq!(
            store.sectors().await.unwrap(),
            vec!["Energy".to_string(), "Technology".to_string()]
        );
    }
}
