//! Metrics batch sync command implementation.

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use savvy::sync_company_metrics;

use crate::cmd::{banner, connect, normalize_symbols};
use crate::config::AppConfig;

/// Recompute and store metrics, batch by batch.
pub(crate) async fn run(
    config: &AppConfig,
    symbols: Option<Vec<String>>,
    batch_size: Option<usize>,
    as_of: Option<NaiveDate>,
) -> Result<()> {
    let store = connect(config).await?;
    let batch_size = batch_size.unwrap_or(config.batch_size);
    let as_of = as_of.unwrap_or_else(|| Utc::now().date_naive());
    let symbols = symbols.map(|s| normalize_symbols(&s));

    let stats = sync_company_metrics(&store, &store, symbols, batch_size, as_of).await?;

    banner("Metrics Sync");
    println!("As of:      {as_of}");
    println!("Batch size: {batch_size}");
    println!("Processed:  {}", stats.total);
    println!("Saved:      {}", stats.saved);
    println!("Skipped:    {}", stats.skipped);
    println!("Errors:     {}", stats.errors);
    println!("Elapsed:    {:.1}s\n", stats.elapsed.as_secs_f64());

    Ok(())
}
