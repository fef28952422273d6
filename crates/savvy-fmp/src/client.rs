//! FMP API client implementation.

use crate::{
    Result,
    error::FmpError,
    types::{
        BalanceSheet, CashFlowStatement, CompanyProfile, Dividend, FundamentalData,
        IncomeStatement, Period, Quote,
    },
};
use reqwest::Client;
use std::env;
use tracing::{debug, warn};

/// Base URL for the FMP stable API.
const FMP_BASE_URL: &str = "https://financialmodelingprep.com/stable";

/// Financial Modeling Prep API client.
#[derive(Debug, Clone)]
pub struct FmpClient {
    client: Client,
    api_key: String,
}

impl FmpClient {
    /// Create a new FMP client with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Create a new FMP client from the `FMP_API_KEY` environment variable.
    ///
    /// This will also load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set or empty.
    pub fn from_env() -> Result<Self> {
        // Try to load .env file (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_key = env::var("FMP_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(FmpError::MissingApiKey)?;

        Ok(Self::new(api_key))
    }

    /// Build a URL with the API key.
    fn url(&self, endpoint: &str) -> String {
        if endpoint.contains('?') {
            format!("{FMP_BASE_URL}/{endpoint}&apikey={}", self.api_key)
        } else {
            format!("{FMP_BASE_URL}/{endpoint}?apikey={}", self.api_key)
        }
    }

    /// Make a GET request and parse the JSON response.
    async fn get<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        debug!(endpoint, "FMP request");
        let url = self.url(endpoint);
        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FmpError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(FmpError::Api(format!("HTTP {status}: {text}")));
        }

        let text = response.text().await?;

        // Error payloads arrive with a 200 status
        if text.contains("\"Error Message\"") || text.contains("\"error\"") {
            return Err(FmpError::Api(text));
        }

        Ok(serde_json::from_str(&text)?)
    }

    fn statement_endpoint(kind: &str, symbol: &str, period: Period, limit: Option<u32>) -> String {
        let limit_param = limit.map(|l| format!("&limit={l}")).unwrap_or_default();
        format!(
            "{kind}?symbol={}&period={}{limit_param}",
            symbol.to_uppercase(),
            period.as_str(),
        )
    }

    /// Get the company profile for a symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the symbol is unknown.
    pub async fn profile(&self, symbol: &str) -> Result<CompanyProfile> {
        let endpoint = format!("profile?symbol={}", symbol.to_uppercase());
        let profiles: Vec<CompanyProfile> = self.get(&endpoint).await?;
        profiles
            .into_iter()
            .next()
            .ok_or_else(|| FmpError::SymbolNotFound(symbol.to_string()))
    }

    /// Get real-time quote for a symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn quote(&self, symbol: &str) -> Result<Quote> {
        let endpoint = format!("quote?symbol={}", symbol.to_uppercase());
        let quotes: Vec<Quote> = self.get(&endpoint).await?;
        quotes
            .into_iter()
            .next()
            .ok_or_else(|| FmpError::SymbolNotFound(symbol.to_string()))
    }

    /// Get income statements for a symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Stock ticker symbol (e.g., "AAPL")
    /// * `period` - Annual or quarterly
    /// * `limit` - Number of periods to return (most recent first)
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn income_statement(
        &self,
        symbol: &str,
        period: Period,
        limit: Option<u32>,
    ) -> Result<Vec<IncomeStatement>> {
        self.get(&Self::statement_endpoint("income-statement", symbol, period, limit))
            .await
    }

    /// Get balance sheets for a symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn balance_sheet(
        &self,
        symbol: &str,
        period: Period,
        limit: Option<u32>,
    ) -> Result<Vec<BalanceSheet>> {
        self.get(&Self::statement_endpoint(
            "balance-sheet-statement",
            symbol,
            period,
            limit,
        ))
        .await
    }

    /// Get cash flow statements for a symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn cash_flow(
        &self,
        symbol: &str,
        period: Period,
        limit: Option<u32>,
    ) -> Result<Vec<CashFlowStatement>> {
        self.get(&Self::statement_endpoint(
            "cash-flow-statement",
            symbol,
            period,
            limit,
        ))
        .await
    }

    /// Get the complete dividend history for a symbol, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn dividends(&self, symbol: &str) -> Result<Vec<Dividend>> {
        let endpoint = format!("dividends?symbol={}", symbol.to_uppercase());
        self.get(&endpoint).await
    }

    /// Get everything needed to compute metrics for a symbol.
    ///
    /// Fetches the profile, quote, `quarters` quarterly statements of each
    /// kind and the full dividend history in parallel. A failed request
    /// leaves its part empty and is logged; rows with malformed dates are
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns [`FmpError::SymbolNotFound`] when every request came back
    /// empty or failed.
    pub async fn fundamental_data(&self, symbol: &str, quarters: u32) -> Result<FundamentalData> {
        let limit = Some(quarters);
        let (profile, quote, income, balance, cash, dividends) = tokio::join!(
            self.profile(symbol),
            self.quote(symbol),
            self.income_statement(symbol, Period::Quarter, limit),
            self.balance_sheet(symbol, Period::Quarter, limit),
            self.cash_flow(symbol, Period::Quarter, limit),
            self.dividends(symbol),
        );

        let data = FundamentalData {
            symbol: symbol.to_uppercase(),
            profile: ok_or_warn(symbol, "profile", profile).map(Into::into),
            quote: ok_or_warn(symbol, "quote", quote).map(Into::into),
            income_statements: convert_rows(symbol, "income statements", income),
            balance_sheets: convert_rows(symbol, "balance sheets", balance),
            cash_flows: convert_rows(symbol, "cash flows", cash),
            dividends: convert_rows(symbol, "dividends", dividends),
        };

        if data.row_count() == 0 {
            return Err(FmpError::SymbolNotFound(symbol.to_string()));
        }

        Ok(data)
    }
}

fn ok_or_warn<T>(symbol: &str, what: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(symbol, "Failed to fetch {what}: {e}");
            None
        }
    }
}

fn convert_rows<D, E>(symbol: &str, what: &str, result: Result<Vec<D>>) -> Vec<E>
where
    E: TryFrom<D, Error = FmpError>,
{
    ok_or_warn(symbol, what, result)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|dto| match E::try_from(dto) {
            Ok(row) => Some(row),
            Err(e) => {
                warn!(symbol, "Skipping {what} row: {e}");
                None
            }
        })
        .collect()
}
