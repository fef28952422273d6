//! PostgreSQL backend.

use async_trait::async_trait;
use savvy_traits::{
    BalanceSheet, CashFlowStatement, CompanyMetrics, CompanyProfile, Dividend, FundamentalsStore,
    FundamentalsWriter, IncomeStatement, MetricsFilter, MetricsPage, MetricsRepository,
    PageRequest, Quote, Result, Symbol,
};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{Postgres, QueryBuilder};
use tracing::{debug, info};

use crate::schema::SCHEMA;

/// Rows written per transaction.
const WRITE_CHUNK: usize = 500;

/// Store backed by a PostgreSQL connection pool.
///
/// Every batch write runs inside one transaction per chunk, so a failed
/// batch leaves no partial chunk behind.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wrap an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `database_url`.
    ///
    /// # Errors
    ///
    /// Returns [`SavvyError::Database`](savvy_traits::SavvyError) when the
    /// connection cannot be established.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        info!(max_connections, "Connected to PostgreSQL");
        Ok(Self::new(pool))
    }

    /// The underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create any missing tables and indexes.
    ///
    /// # Errors
    ///
    /// Propagates the first failing DDL statement.
    pub async fn init_schema(&self) -> Result<()> {
        for stmt in SCHEMA {
            sqlx::query(stmt).execute(&self.pool).await?;
        }
        info!(statements = SCHEMA.len(), "Schema initialized");
        Ok(())
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &MetricsFilter) {
    if let Some(sector) = &filter.sector {
        qb.push(" AND sector = ").push_bind(sector.clone());
    }

    let bounds = [
        ("pe_ratio", filter.min_pe_ratio, filter.max_pe_ratio),
        ("dividend_yield", filter.min_dividend_yield, filter.max_dividend_yield),
        ("roic", filter.min_roic, filter.max_roic),
        ("market_cap", filter.min_market_cap, filter.max_market_cap),
    ];
    for (column, min, max) in bounds {
        if let Some(min) = min {
            qb.push(format!(" AND {column} >= ")).push_bind(min);
        }
        if let Some(max) = max {
            qb.push(format!(" AND {column} <= ")).push_bind(max);
        }
    }

    if let Some(years) = filter.min_years_increasing_dividend {
        qb.push(" AND years_increasing_dividend >= ").push_bind(years);
    }
}

#[async_trait]
impl FundamentalsStore for PgStore {
    async fn latest_quote(&self, symbol: &str) -> Result<Option<Quote>> {
        let quote = sqlx::query_as::<_, Quote>(
            r#"
            SELECT symbol, price, market_cap, "timestamp"
            FROM quotes
            WHERE symbol = $1
            ORDER BY "timestamp" DESC
            LIMIT 1
            "#,
        )
        .bind(symbol)
        .fetch_optional(&self.pool)
        .await?;
        Ok(quote)
    }

    async fn company_profile(&self, symbol: &str) -> Result<Option<CompanyProfile>> {
        let profile = sqlx::query_as::<_, CompanyProfile>(
            r#"
            SELECT symbol, company_name, sector, industry, exchange
            FROM company_profiles
            WHERE symbol = $1
            "#,
        )
        .bind(symbol)
        .fetch_optional(&self.pool)
        .await?;
        Ok(profile)
    }

    async fn quarterly_income_statements(
        &self,
        symbol: &str,
        limit: usize,
    ) -> Result<Vec<IncomeStatement>> {
        let rows = sqlx::query_as::<_, IncomeStatement>(
            r#"
            SELECT symbol, date, period, revenue, eps, ebitda, operating_income,
                   income_before_tax, income_tax_expense, net_income
            FROM income_statements
            WHERE symbol = $1 AND period ILIKE 'Q%'
            ORDER BY date DESC
            LIMIT $2
            "#,
        )
        .bind(symbol)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn quarterly_balance_sheets(
        &self,
        symbol: &str,
        limit: usize,
    ) -> Result<Vec<BalanceSheet>> {
        let rows = sqlx::query_as::<_, BalanceSheet>(
            r#"
            SELECT symbol, date, period, total_assets, total_liabilities,
                   total_stockholders_equity, intangible_assets, goodwill,
                   total_debt, cash_and_cash_equivalents
            FROM balance_sheets
            WHERE symbol = $1 AND period ILIKE 'Q%'
            ORDER BY date DESC
            LIMIT $2
            "#,
        )
        .bind(symbol)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn quarterly_cash_flows(
        &self,
        symbol: &str,
        limit: usize,
    ) -> Result<Vec<CashFlowStatement>> {
        let rows = sqlx::query_as::<_, CashFlowStatement>(
            r#"
            SELECT symbol, date, period, operating_cash_flow, capital_expenditure,
                   free_cash_flow, dividends_paid
            FROM cash_flow_statements
            WHERE symbol = $1 AND period ILIKE 'Q%'
            ORDER BY date DESC
            LIMIT $2
            "#,
        )
        .bind(symbol)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn dividend_history(&self, symbol: &str) -> Result<Vec<Dividend>> {
        let rows = sqlx::query_as::<_, Dividend>(
            r#"
            SELECT symbol, date, dividend, adj_dividend
            FROM dividends
            WHERE symbol = $1
            ORDER BY date DESC
            "#,
        )
        .bind(symbol)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn symbols_with_financials(&self) -> Result<Vec<Symbol>> {
        let symbols = sqlx::query_scalar::<_, String>(
            r#"
            SELECT symbol FROM income_statements
            UNION
            SELECT symbol FROM balance_sheets
            ORDER BY symbol
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(symbols)
    }
}

#[async_trait]
impl FundamentalsWriter for PgStore {
    async fn upsert_quotes(&self, quotes: &[Quote]) -> Result<usize> {
        let mut written = 0;
        for chunk in quotes.chunks(WRITE_CHUNK) {
            let mut tx = self.pool.begin().await?;
            for q in chunk {
                let result = sqlx::query(
                    r#"
                    INSERT INTO quotes (symbol, price, market_cap, "timestamp")
                    VALUES ($1, $2, $3, $4)
                    ON CONFLICT (symbol, "timestamp") DO UPDATE SET
                        price = EXCLUDED.price,
                        market_cap = EXCLUDED.market_cap
                    "#,
                )
                .bind(&q.symbol)
                .bind(q.price)
                .bind(q.market_cap)
                .bind(q.timestamp)
                .execute(&mut *tx)
                .await?;
                written += result.rows_affected() as usize;
            }
            tx.commit().await?;
        }
        debug!(rows = written, "Upserted quotes");
        Ok(written)
    }

    async fn upsert_profiles(&self, profiles: &[CompanyProfile]) -> Result<usize> {
        let mut written = 0;
        for chunk in profiles.chunks(WRITE_CHUNK) {
            let mut tx = self.pool.begin().await?;
            for p in chunk {
                let result = sqlx::query(
                    r#"
                    INSERT INTO company_profiles (symbol, company_name, sector, industry, exchange)
                    VALUES ($1, $2, $3, $4, $5)
                    ON CONFLICT (symbol) DO UPDATE SET
                        company_name = EXCLUDED.company_name,
                        sector = EXCLUDED.sector,
                        industry = EXCLUDED.industry,
                        exchange = EXCLUDED.exchange
                    "#,
                )
                .bind(&p.symbol)
                .bind(&p.company_name)
                .bind(&p.sector)
                .bind(&p.industry)
                .bind(&p.exchange)
                .execute(&mut *tx)
                .await?;
                written += result.rows_affected() as usize;
            }
            tx.commit().await?;
        }
        debug!(rows = written, "Upserted company profiles");
        Ok(written)
    }

    async fn upsert_income_statements(&self, rows: &[IncomeStatement]) -> Result<usize> {
        let mut written = 0;
        for chunk in rows.chunks(WRITE_CHUNK) {
            let mut tx = self.pool.begin().await?;
            for s in chunk {
                let result = sqlx::query(
                    r#"
                    INSERT INTO income_statements (
                        symbol, date, period, revenue, eps, ebitda, operating_income,
                        income_before_tax, income_tax_expense, net_income
                    )
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                    ON CONFLICT (symbol, date, period) DO UPDATE SET
                        revenue = EXCLUDED.revenue,
                        eps = EXCLUDED.eps,
                        ebitda = EXCLUDED.ebitda,
                        operating_income = EXCLUDED.operating_income,
                        income_before_tax = EXCLUDED.income_before_tax,
                        income_tax_expense = EXCLUDED.income_tax_expense,
                        net_income = EXCLUDED.net_income
                    "#,
                )
                .bind(&s.symbol)
                .bind(s.date)
                .bind(&s.period)
                .bind(s.revenue)
                .bind(s.eps)
                .bind(s.ebitda)
                .bind(s.operating_income)
                .bind(s.income_before_tax)
                .bind(s.income_tax_expense)
                .bind(s.net_income)
                .execute(&mut *tx)
                .await?;
                written += result.rows_affected() as usize;
            }
            tx.commit().await?;
        }
        debug!(rows = written, "Upserted income statements");
        Ok(written)
    }

    async fn upsert_balance_sheets(&self, rows: &[BalanceSheet]) -> Result<usize> {
        let mut written = 0;
        for chunk in rows.chunks(WRITE_CHUNK) {
            let mut tx = self.pool.begin().await?;
            for s in chunk {
                let result = sqlx::query(
                    r#"
                    INSERT INTO balance_sheets (
                        symbol, date, period, total_assets, total_liabilities,
                        total_stockholders_equity, intangible_assets, goodwill,
                        total_debt, cash_and_cash_equivalents
                    )
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                    ON CONFLICT (symbol, date, period) DO UPDATE SET
                        total_assets = EXCLUDED.total_assets,
                        total_liabilities = EXCLUDED.total_liabilities,
                        total_stockholders_equity = EXCLUDED.total_stockholders_equity,
                        intangible_assets = EXCLUDED.intangible_assets,
                        goodwill = EXCLUDED.goodwill,
                        total_debt = EXCLUDED.total_debt,
                        cash_and_cash_equivalents = EXCLUDED.cash_and_cash_equivalents
                    "#,
                )
                .bind(&s.symbol)
                .bind(s.date)
                .bind(&s.period)
                .bind(s.total_assets)
                .bind(s.total_liabilities)
                .bind(s.total_stockholders_equity)
                .bind(s.intangible_assets)
                .bind(s.goodwill)
                .bind(s.total_debt)
                .bind(s.cash_and_cash_equivalents)
                .execute(&mut *tx)
                .await?;
                written += result.rows_affected() as usize;
            }
            tx.commit().await?;
        }
        debug!(rows = written, "Upserted balance sheets");
        Ok(written)
    }

    async fn upsert_cash_flows(&self, rows: &[CashFlowStatement]) -> Result<usize> {
        let mut written = 0;
        for chunk in rows.chunks(WRITE_CHUNK) {
            let mut tx = self.pool.begin().await?;
            for s in chunk {
                let result = sqlx::query(
                    r#"
                    INSERT INTO cash_flow_statements (
                        symbol, date, period, operating_cash_flow, capital_expenditure,
                        free_cash_flow, dividends_paid
                    )
                    VALUES ($1, $2, $3, $4, $5, $6, $7)
                    ON CONFLICT (symbol, date, period) DO UPDATE SET
                        operating_cash_flow = EXCLUDED.operating_cash_flow,
                        capital_expenditure = EXCLUDED.capital_expenditure,
                        free_cash_flow = EXCLUDED.free_cash_flow,
                        dividends_paid = EXCLUDED.dividends_paid
                    "#,
                )
                .bind(&s.symbol)
                .bind(s.date)
                .bind(&s.period)
                .bind(s.operating_cash_flow)
                .bind(s.capital_expenditure)
                .bind(s.free_cash_flow)
                .bind(s.dividends_paid)
                .execute(&mut *tx)
                .await?;
                written += result.rows_affected() as usize;
            }
            tx.commit().await?;
        }
        debug!(rows = written, "Upserted cash flow statements");
        Ok(written)
    }

    async fn upsert_dividends(&self, rows: &[Dividend]) -> Result<usize> {
        let mut written = 0;
        for chunk in rows.chunks(WRITE_CHUNK) {
            let mut tx = self.pool.begin().await?;
            for d in chunk {
                let result = sqlx::query(
                    r#"
                    INSERT INTO dividends (symbol, date, dividend, adj_dividend)
                    VALUES ($1, $2, $3, $4)
                    ON CONFLICT (symbol, date) DO UPDATE SET
                        dividend = EXCLUDED.dividend,
                        adj_dividend = EXCLUDED.adj_dividend
                    "#,
                )
                .bind(&d.symbol)
                .bind(d.date)
                .bind(d.dividend)
                .bind(d.adj_dividend)
                .execute(&mut *tx)
                .await?;
                written += result.rows_affected() as usize;
            }
            tx.commit().await?;
        }
        debug!(rows = written, "Upserted dividends");
        Ok(written)
    }
}

#[async_trait]
impl MetricsRepository for PgStore {
    async fn upsert_metrics(&self, records: &[CompanyMetrics]) -> Result<usize> {
        let mut written = 0;
        for chunk in records.chunks(WRITE_CHUNK) {
            let mut tx = self.pool.begin().await?;
            for m in chunk {
                let result = sqlx::query(
                    r#"
                    INSERT INTO company_metrics (
                        symbol, company_name, sector, market_cap,
                        pe_ratio, pb_ratio, ps_ratio, ev_ebitda_ratio, ev_fcf_ratio,
                        copm, roic, rota, debt_ebitda_ratio,
                        dividend_yield, dividend_payout, dividend_growth_10y,
                        years_increasing_dividend, score, created_at, updated_at
                    )
                    VALUES (
                        $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                        $11, $12, $13, $14, $15, $16, $17, $18, NOW(), NOW()
                    )
                    ON CONFLICT (symbol) DO UPDATE SET
                        company_name = EXCLUDED.company_name,
                        sector = EXCLUDED.sector,
                        market_cap = EXCLUDED.market_cap,
                        pe_ratio = EXCLUDED.pe_ratio,
                        pb_ratio = EXCLUDED.pb_ratio,
                        ps_ratio = EXCLUDED.ps_ratio,
                        ev_ebitda_ratio = EXCLUDED.ev_ebitda_ratio,
                        ev_fcf_ratio = EXCLUDED.ev_fcf_ratio,
                        copm = EXCLUDED.copm,
                        roic = EXCLUDED.roic,
                        rota = EXCLUDED.rota,
                        debt_ebitda_ratio = EXCLUDED.debt_ebitda_ratio,
                        dividend_yield = EXCLUDED.dividend_yield,
                        dividend_payout = EXCLUDED.dividend_payout,
                        dividend_growth_10y = EXCLUDED.dividend_growth_10y,
                        years_increasing_dividend = EXCLUDED.years_increasing_dividend,
                        score = EXCLUDED.score,
                        updated_at = NOW()
                    "#,
                )
                .bind(&m.symbol)
                .bind(&m.company_name)
                .bind(&m.sector)
                .bind(m.market_cap)
                .bind(m.pe_ratio)
                .bind(m.pb_ratio)
                .bind(m.ps_ratio)
                .bind(m.ev_ebitda_ratio)
                .bind(m.ev_fcf_ratio)
                .bind(m.copm)
                .bind(m.roic)
                .bind(m.rota)
                .bind(m.debt_ebitda_ratio)
                .bind(m.dividend_yield)
                .bind(m.dividend_payout)
                .bind(m.dividend_growth_10y)
                .bind(m.years_increasing_dividend)
                .bind(m.score)
                .execute(&mut *tx)
                .await?;
                written += result.rows_affected() as usize;
            }
            tx.commit().await?;
        }
        debug!(rows = written, "Upserted company metrics");
        Ok(written)
    }

    async fn get_metrics(&self, symbol: &str) -> Result<Option<CompanyMetrics>> {
        let metrics = sqlx::query_as::<_, CompanyMetrics>(
            "SELECT * FROM company_metrics WHERE symbol = $1",
        )
        .bind(symbol.to_uppercase())
        .fetch_optional(&self.pool)
        .await?;
        Ok(metrics)
    }

    async fn list_metrics(&self, filter: &MetricsFilter, page: PageRequest) -> Result<MetricsPage> {
        let mut count =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM company_metrics WHERE 1=1");
        push_filters(&mut count, filter);
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM company_metrics WHERE 1=1");
        push_filters(&mut query, filter);
        query
            .push(" ORDER BY symbol LIMIT ")
            .push_bind(i64::from(page.page_size()))
            .push(" OFFSET ")
            .push_bind(page.offset() as i64);

        let items = query
            .build_query_as::<CompanyMetrics>()
            .fetch_all(&self.pool)
            .await?;

        Ok(MetricsPage::new(items, total.max(0) as u64, page))
    }

    async fn sectors(&self) -> Result<Vec<String>> {
        let sectors = sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT sector
            FROM company_metrics
            WHERE sector IS NOT NULL
            ORDER BY sector
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(sectors)
    }
}
