//! DDL for the savvy tables.
//!
//! Each statement is idempotent so [`PgStore::init_schema`](crate::PgStore::init_schema)
//! can run on every start.

/// `CREATE ... IF NOT EXISTS` statements, in dependency order.
pub const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS quotes (
        symbol          VARCHAR(20) NOT NULL,
        price           DOUBLE PRECISION,
        market_cap      DOUBLE PRECISION,
        "timestamp"     BIGINT NOT NULL,
        PRIMARY KEY (symbol, "timestamp")
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS company_profiles (
        symbol          VARCHAR(20) PRIMARY KEY,
        company_name    TEXT NOT NULL,
        sector          TEXT,
        industry        TEXT,
        exchange        TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS income_statements (
        symbol              VARCHAR(20) NOT NULL,
        date                DATE NOT NULL,
        period              VARCHAR(8) NOT NULL,
        revenue             DOUBLE PRECISION,
        eps                 DOUBLE PRECISION,
        ebitda              DOUBLE PRECISION,
        operating_income    DOUBLE PRECISION,
        income_before_tax   DOUBLE PRECISION,
        income_tax_expense  DOUBLE PRECISION,
        net_income          DOUBLE PRECISION,
        PRIMARY KEY (symbol, date, period)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS balance_sheets (
        symbol                      VARCHAR(20) NOT NULL,
        date                        DATE NOT NULL,
        period                      VARCHAR(8) NOT NULL,
        total_assets                DOUBLE PRECISION,
        total_liabilities           DOUBLE PRECISION,
        total_stockholders_equity   DOUBLE PRECISION,
        intangible_assets           DOUBLE PRECISION,
        goodwill                    DOUBLE PRECISION,
        total_debt                  DOUBLE PRECISION,
        cash_and_cash_equivalents   DOUBLE PRECISION,
        PRIMARY KEY (symbol, date, period)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS cash_flow_statements (
        symbol                  VARCHAR(20) NOT NULL,
        date                    DATE NOT NULL,
        period                  VARCHAR(8) NOT NULL,
        operating_cash_flow     DOUBLE PRECISION,
        capital_expenditure     DOUBLE PRECISION,
        free_cash_flow          DOUBLE PRECISION,
        dividends_paid          DOUBLE PRECISION,
        PRIMARY KEY (symbol, date, period)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS dividends (
        symbol          VARCHAR(20) NOT NULL,
        date            DATE NOT NULL,
        dividend        DOUBLE PRECISION,
        adj_dividend    DOUBLE PRECISION,
        PRIMARY KEY (symbol, date)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS company_metrics (
        symbol                      VARCHAR(20) PRIMARY KEY,
        company_name                TEXT,
        sector                      TEXT,
        market_cap                  DOUBLE PRECISION,
        pe_ratio                    DOUBLE PRECISION,
        pb_ratio                    DOUBLE PRECISION,
        ps_ratio                    DOUBLE PRECISION,
        ev_ebitda_ratio             DOUBLE PRECISION,
        ev_fcf_ratio                DOUBLE PRECISION,
        copm                        DOUBLE PRECISION,
        roic                        DOUBLE PRECISION,
        rota                        DOUBLE PRECISION,
        debt_ebitda_ratio           DOUBLE PRECISION,
        dividend_yield              DOUBLE PRECISION,
        dividend_payout             DOUBLE PRECISION,
        dividend_growth_10y         DOUBLE PRECISION,
        years_increasing_dividend   INTEGER,
        score                       DOUBLE PRECISION,
        created_at                  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at                  TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_company_metrics_sector ON company_metrics (sector)",
    "CREATE INDEX IF NOT EXISTS idx_quotes_symbol_ts ON quotes (symbol, \"timestamp\" DESC)",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_is_idempotent() {
        for stmt in SCHEMA {
            assert!(stmt.contains("IF NOT EXISTS"), "{stmt}");
        }
    }

    #[test]
    fn test_every_table_has_a_natural_key() {
        let tables = SCHEMA.iter().filter(|s| s.contains("CREATE TABLE"));
        for stmt in tables {
            assert!(stmt.contains("PRIMARY KEY"), "{stmt}");
        }
    }
}
