//! Provider ingestion: fetch fundamentals from FMP and persist them.

use std::time::Instant;

use savvy_fmp::{FmpClient, FmpError, FundamentalData};
use savvy_traits::{FundamentalsWriter, Result, Symbol};
use tracing::{info, warn};

use crate::stats::SyncStats;

/// Write every part of one symbol's fetched data.
///
/// Returns the number of rows written. Each table is upserted on its
/// natural key, so re-running with the same data is a no-op in effect.
///
/// # Errors
///
/// Propagates the first failing write.
pub async fn store_fundamentals(
    writer: &dyn FundamentalsWriter,
    data: &FundamentalData,
) -> Result<usize> {
    let mut rows = 0;

    if let Some(profile) = &data.profile {
        rows += writer.upsert_profiles(std::slice::from_ref(profile)).await?;
    }
    if let Some(quote) = &data.quote {
        rows += writer.upsert_quotes(std::slice::from_ref(quote)).await?;
    }
    rows += writer
        .upsert_income_statements(&data.income_statements)
        .await?;
    rows += writer.upsert_balance_sheets(&data.balance_sheets).await?;
    rows += writer.upsert_cash_flows(&data.cash_flows).await?;
    rows += writer.upsert_dividends(&data.dividends).await?;

    Ok(rows)
}

/// Fetch and persist fundamentals for each symbol.
///
/// Symbols the provider knows nothing about are skipped; any other fetch or
/// write failure is logged and counted. Neither aborts the run.
pub async fn sync_fundamentals(
    client: &FmpClient,
    writer: &dyn FundamentalsWriter,
    symbols: &[Symbol],
    quarters: u32,
) -> SyncStats {
    let start = Instant::now();
    let mut stats = SyncStats::new();

    info!(symbols = symbols.len(), quarters, "Starting fundamentals sync");

    for symbol in symbols {
        stats.total += 1;

        let data = match client.fundamental_data(symbol, quarters).await {
            Ok(data) => data,
            Err(FmpError::SymbolNotFound(_)) => {
                warn!(symbol = %symbol, "No data returned by provider");
                stats.skipped += 1;
                continue;
            }
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "Failed to fetch fundamentals");
                stats.errors += 1;
                continue;
            }
        };

        match store_fundamentals(writer, &data).await {
            Ok(rows) => {
                info!(symbol = %data.symbol, rows, "Stored fundamentals");
                stats.saved += 1;
                stats.rows += rows;
            }
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "Failed to store fundamentals");
                stats.errors += 1;
            }
        }
    }

    stats.elapsed = start.elapsed();
    stats.log_summary("fundamentals_sync");
    stats
}
