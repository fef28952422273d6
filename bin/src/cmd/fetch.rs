//! Fundamentals ingestion command implementation.

use anyhow::Result;
use savvy::sync_fundamentals;

use crate::cmd::{banner, connect, normalize_symbols};
use crate::config::AppConfig;

/// Fetch fundamentals from FMP and upsert them into the database.
pub(crate) async fn run(config: &AppConfig, symbols: &[String], quarters: u32) -> Result<()> {
    let client = config.fmp_client()?;
    let store = connect(config).await?;
    let symbols = normalize_symbols(symbols);

    let stats = sync_fundamentals(&client, &store, &symbols, quarters).await;

    banner("Fundamentals Fetch");
    println!("Symbols:  {}", symbols.join(", "));
    println!("Quarters: {quarters}");
    println!("Saved:    {}", stats.saved);
    println!("Skipped:  {}", stats.skipped);
    println!("Errors:   {}", stats.errors);
    println!("Rows:     {}\n", stats.rows);

    if stats.saved == 0 && stats.total > 0 {
        anyhow::bail!("no fundamentals were stored");
    }

    Ok(())
}
