//! Sector listing command implementation.

use anyhow::Result;
use savvy::traits::MetricsRepository;

use crate::cmd::{banner, connect};
use crate::config::AppConfig;

/// List the distinct sectors of stored metrics.
pub(crate) async fn run(config: &AppConfig) -> Result<()> {
    let store = connect(config).await?;
    let sectors = store.sectors().await?;

    banner("Sectors");

    if sectors.is_empty() {
        println!("No metrics stored yet. Run `savvy sync-metrics` first.\n");
        return Ok(());
    }

    for sector in &sectors {
        println!("  {sector}");
    }
    println!("\n{} sector(s)\n", sectors.len());

    Ok(())
}
