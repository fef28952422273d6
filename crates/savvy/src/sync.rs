//! Batch job that recomputes and persists metrics for many symbols.

use std::time::Instant;

use savvy_traits::{Date, FundamentalsStore, MetricsRepository, Result, Symbol};
use tracing::{info, warn};

use crate::engine::compute_company_metrics;
use crate::stats::SyncStats;

/// Symbols per batch when none is configured.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Recompute metrics for `symbols` and upsert them batch by batch.
///
/// With no explicit list, every symbol that has at least one income
/// statement or balance sheet is processed. A symbol whose computation fails
/// is logged, counted and left out of its batch; the run continues. Symbols
/// without quarterly statements are counted as skipped.
///
/// # Errors
///
/// Fails when the symbol list cannot be read or a batch cannot be written.
pub async fn sync_company_metrics(
    source: &dyn FundamentalsStore,
    sink: &dyn MetricsRepository,
    symbols: Option<Vec<Symbol>>,
    batch_size: usize,
    as_of: Date,
) -> Result<SyncStats> {
    let start = Instant::now();
    let symbols = match symbols {
        Some(symbols) => symbols,
        None => source.symbols_with_financials().await?,
    };
    let batch_size = batch_size.max(1);
    let batches = symbols.len().div_ceil(batch_size);

    info!(
        symbols = symbols.len(),
        batch_size,
        batches,
        %as_of,
        "Starting metrics sync"
    );

    let mut stats = SyncStats::new();

    for (index, batch) in symbols.chunks(batch_size).enumerate() {
        let mut records = Vec::with_capacity(batch.len());

        for symbol in batch {
            stats.total += 1;
            match compute_company_metrics(source, symbol, as_of).await {
                Ok(Some(record)) => records.push(record),
                Ok(None) => stats.skipped += 1,
                Err(e) => {
                    warn!(symbol = %symbol, error = %e, "Failed to compute metrics");
                    stats.errors += 1;
                }
            }
        }

        if !records.is_empty() {
            stats.rows += sink.upsert_metrics(&records).await?;
            stats.saved += records.len();
        }

        info!(
            batch = index + 1,
            batches,
            saved = records.len(),
            processed = stats.total,
            "Batch committed"
        );
    }

    stats.elapsed = start.elapsed();
    stats.log_summary("metrics_sync");
    Ok(stats)
}
