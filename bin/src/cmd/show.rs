//! Metrics display command implementation.

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use savvy::store::MemoryStore;
use savvy::traits::FundamentalsStore;
use savvy::{MetricsReport, evaluate_company, store_fundamentals};
use tracing::warn;

use crate::cmd::{OutputFormat, banner, connect, fmt_amount, fmt_opt, normalize_symbols};
use crate::config::AppConfig;

/// Quarters fetched per statement kind in live mode.
const LIVE_QUARTERS: u32 = 4;

/// Compute metrics for `symbols` and print them. Nothing is written.
pub(crate) async fn run(
    config: &AppConfig,
    symbols: &[String],
    live: bool,
    as_of: Option<NaiveDate>,
    format: OutputFormat,
) -> Result<()> {
    let symbols = normalize_symbols(symbols);
    let as_of = as_of.unwrap_or_else(|| Utc::now().date_naive());

    let reports = if live {
        let client = config.fmp_client()?;
        let store = MemoryStore::new();
        for symbol in &symbols {
            match client.fundamental_data(symbol, LIVE_QUARTERS).await {
                Ok(data) => {
                    store_fundamentals(&store, &data).await?;
                }
                Err(e) => warn!(symbol = %symbol, error = %e, "Failed to fetch fundamentals"),
            }
        }
        evaluate_all(&store, &symbols, as_of).await?
    } else {
        let store = connect(config).await?;
        evaluate_all(&store, &symbols, as_of).await?
    };

    if format == OutputFormat::Json {
        let computed: Vec<&MetricsReport> =
            reports.iter().filter_map(|(_, r)| r.as_ref()).collect();
        println!("{}", serde_json::to_string_pretty(&computed)?);
        return Ok(());
    }

    for (symbol, report) in &reports {
        match report {
            Some(report) => print_report(report, as_of),
            None => {
                banner(symbol);
                println!("No quarterly statements available.\n");
            }
        }
    }

    Ok(())
}

async fn evaluate_all(
    store: &dyn FundamentalsStore,
    symbols: &[String],
    as_of: NaiveDate,
) -> Result<Vec<(String, Option<MetricsReport>)>> {
    let mut reports = Vec::with_capacity(symbols.len());
    for symbol in symbols {
        let report = evaluate_company(store, symbol, as_of).await?;
        reports.push((symbol.clone(), report));
    }
    Ok(reports)
}

fn print_report(report: &MetricsReport, as_of: NaiveDate) {
    let m = &report.metrics;

    banner(&m.symbol);
    println!("Company:    {}", m.company_name.as_deref().unwrap_or("-"));
    println!("Sector:     {}", m.sector.as_deref().unwrap_or("-"));
    println!("Market cap: {}", fmt_amount(m.market_cap));
    println!("As of:      {as_of}");
    println!();

    println!("{:<22} {:>14} {:>8}", "Indicator", "Value", "Points");
    println!("{}", "-".repeat(46));
    for partial in &report.breakdown.partials {
        println!(
            "{:<22} {:>14} {:>8.2}",
            partial.indicator.label(),
            fmt_opt(partial.value, 4),
            partial.points
        );
    }
    println!("{}", "-".repeat(46));
    println!("{:<22} {:>14} {:>8.2}\n", "Score", "", report.breakdown.total);
}
