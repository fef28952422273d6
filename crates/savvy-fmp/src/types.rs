//! Data types for FMP API responses and their conversion into savvy entities.
//!
//! Every numeric field is optional: FMP omits or nulls values it does not
//! have, and those gaps must survive as `None` rather than zero.

use chrono::NaiveDate;
use savvy_traits as entity;
use serde::{Deserialize, Serialize};

use crate::error::FmpError;

/// Reporting period for financial statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    /// Annual reports (10-K filings).
    Annual,
    /// Quarterly reports (10-Q filings).
    #[default]
    Quarter,
}

impl Period {
    /// Get the API parameter value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Quarter => "quarter",
        }
    }
}

fn parse_date(symbol: &str, date: &str) -> Result<NaiveDate, FmpError> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| FmpError::InvalidDate {
        symbol: symbol.to_string(),
        date: date.to_string(),
    })
}

/// Company profile from FMP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    /// Ticker symbol.
    pub symbol: String,
    /// Company name.
    #[serde(default)]
    pub company_name: Option<String>,
    /// Sector.
    #[serde(default)]
    pub sector: Option<String>,
    /// Industry.
    #[serde(default)]
    pub industry: Option<String>,
    /// Exchange short name.
    #[serde(default, alias = "exchangeShortName")]
    pub exchange: Option<String>,
}

impl From<CompanyProfile> for entity::CompanyProfile {
    fn from(dto: CompanyProfile) -> Self {
        Self {
            company_name: dto
                .company_name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| dto.symbol.clone()),
            symbol: dto.symbol,
            sector: dto.sector.filter(|s| !s.is_empty()),
            industry: dto.industry.filter(|s| !s.is_empty()),
            exchange: dto.exchange.filter(|s| !s.is_empty()),
        }
    }
}

/// Real-time quote data from FMP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Ticker symbol.
    pub symbol: String,
    /// Company name.
    #[serde(default)]
    pub name: Option<String>,
    /// Current price.
    #[serde(default)]
    pub price: Option<f64>,
    /// Market cap.
    #[serde(default)]
    pub market_cap: Option<f64>,
    /// Quote time as Unix seconds.
    #[serde(default)]
    pub timestamp: i64,
}

impl From<Quote> for entity::Quote {
    fn from(dto: Quote) -> Self {
        Self {
            symbol: dto.symbol,
            price: dto.price,
            market_cap: dto.market_cap,
            timestamp: dto.timestamp,
        }
    }
}

/// Income statement data from FMP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStatement {
    /// Period end date.
    pub date: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Reporting period ("Q1".."Q4", "FY").
    pub period: String,
    /// Total revenue.
    #[serde(default)]
    pub revenue: Option<f64>,
    /// Earnings per share (basic).
    #[serde(default)]
    pub eps: Option<f64>,
    /// EBITDA.
    #[serde(default)]
    pub ebitda: Option<f64>,
    /// Operating income.
    #[serde(default)]
    pub operating_income: Option<f64>,
    /// Income before tax.
    #[serde(default)]
    pub income_before_tax: Option<f64>,
    /// Income tax expense.
    #[serde(default)]
    pub income_tax_expense: Option<f64>,
    /// Net income.
    #[serde(default)]
    pub net_income: Option<f64>,
}

impl TryFrom<IncomeStatement> for entity::IncomeStatement {
    type Error = FmpError;

    fn try_from(dto: IncomeStatement) -> Result<Self, Self::Error> {
        Ok(Self {
            date: parse_date(&dto.symbol, &dto.date)?,
            symbol: dto.symbol,
            period: dto.period,
            revenue: dto.revenue,
            eps: dto.eps,
            ebitda: dto.ebitda,
            operating_income: dto.operating_income,
            income_before_tax: dto.income_before_tax,
            income_tax_expense: dto.income_tax_expense,
            net_income: dto.net_income,
        })
    }
}

/// Balance sheet data from FMP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheet {
    /// Period end date.
    pub date: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Reporting period.
    pub period: String,
    /// Total assets.
    #[serde(default)]
    pub total_assets: Option<f64>,
    /// Total liabilities.
    #[serde(default)]
    pub total_liabilities: Option<f64>,
    /// Total stockholders' equity.
    #[serde(default)]
    pub total_stockholders_equity: Option<f64>,
    /// Intangible assets.
    #[serde(default)]
    pub intangible_assets: Option<f64>,
    /// Goodwill.
    #[serde(default)]
    pub goodwill: Option<f64>,
    /// Total debt.
    #[serde(default)]
    pub total_debt: Option<f64>,
    /// Cash and cash equivalents.
    #[serde(default)]
    pub cash_and_cash_equivalents: Option<f64>,
}

impl TryFrom<BalanceSheet> for entity::BalanceSheet {
    type Error = FmpError;

    fn try_from(dto: BalanceSheet) -> Result<Self, Self::Error> {
        Ok(Self {
            date: parse_date(&dto.symbol, &dto.date)?,
            symbol: dto.symbol,
            period: dto.period,
            total_assets: dto.total_assets,
            total_liabilities: dto.total_liabilities,
            total_stockholders_equity: dto.total_stockholders_equity,
            intangible_assets: dto.intangible_assets,
            goodwill: dto.goodwill,
            total_debt: dto.total_debt,
            cash_and_cash_equivalents: dto.cash_and_cash_equivalents,
        })
    }
}

/// Cash flow statement data from FMP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowStatement {
    /// Period end date.
    pub date: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Reporting period.
    pub period: String,
    /// Operating cash flow.
    #[serde(default)]
    pub operating_cash_flow: Option<f64>,
    /// Capital expenditure.
    #[serde(default)]
    pub capital_expenditure: Option<f64>,
    /// Free cash flow.
    #[serde(default)]
    pub free_cash_flow: Option<f64>,
    /// Dividends paid (legacy field name).
    #[serde(default)]
    pub dividends_paid: Option<f64>,
    /// Net dividends paid (common and preferred).
    #[serde(default)]
    pub net_dividends_paid: Option<f64>,
}

impl TryFrom<CashFlowStatement> for entity::CashFlowStatement {
    type Error = FmpError;

    fn try_from(dto: CashFlowStatement) -> Result<Self, Self::Error> {
        Ok(Self {
            date: parse_date(&dto.symbol, &dto.date)?,
            symbol: dto.symbol,
            period: dto.period,
            operating_cash_flow: dto.operating_cash_flow,
            capital_expenditure: dto.capital_expenditure,
            free_cash_flow: dto.free_cash_flow,
            dividends_paid: dto.net_dividends_paid.or(dto.dividends_paid),
        })
    }
}

/// Historical dividend event from FMP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dividend {
    /// Ticker symbol.
    pub symbol: String,
    /// Ex-dividend date.
    pub date: String,
    /// Split-adjusted amount.
    #[serde(default)]
    pub adj_dividend: Option<f64>,
    /// Declared amount.
    #[serde(default)]
    pub dividend: Option<f64>,
    /// Payment date.
    #[serde(default)]
    pub payment_date: Option<String>,
}

impl TryFrom<Dividend> for entity::Dividend {
    type Error = FmpError;

    fn try_from(dto: Dividend) -> Result<Self, Self::Error> {
        Ok(Self {
            date: parse_date(&dto.symbol, &dto.date)?,
            symbol: dto.symbol,
            dividend: dto.dividend,
            adj_dividend: dto.adj_dividend,
        })
    }
}

/// Everything fetched for one symbol, already converted to savvy entities.
#[derive(Debug, Clone, Default)]
pub struct FundamentalData {
    /// Ticker symbol.
    pub symbol: String,
    /// Company profile.
    pub profile: Option<entity::CompanyProfile>,
    /// Current quote.
    pub quote: Option<entity::Quote>,
    /// Quarterly income statements (most recent first).
    pub income_statements: Vec<entity::IncomeStatement>,
    /// Quarterly balance sheets (most recent first).
    pub balance_sheets: Vec<entity::BalanceSheet>,
    /// Quarterly cash flow statements (most recent first).
    pub cash_flows: Vec<entity::CashFlowStatement>,
    /// Full dividend history (most recent first).
    pub dividends: Vec<entity::Dividend>,
}

impl FundamentalData {
    /// Whether any statement was fetched.
    #[must_use]
    pub fn has_financials(&self) -> bool {
        !self.income_statements.is_empty() || !self.balance_sheets.is_empty()
    }

    /// Total number of rows held.
    #[must_use]
    pub fn row_count(&self) -> usize {
        usize::from(self.profile.is_some())
            + usize::from(self.quote.is_some())
            + self.income_statements.len()
            + self.balance_sheets.len()
            + self.cash_flows.len()
            + self.dividends.len()
    }
}
