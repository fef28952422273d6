//! Metrics screening command implementation.

use anyhow::Result;
use savvy::traits::{MetricsFilter, MetricsRepository, PageRequest};

use crate::cmd::{OutputFormat, banner, connect, fmt_amount, fmt_opt, fmt_pct};
use crate::config::AppConfig;

/// List stored metrics that pass `filter`, one page at a time.
pub(crate) async fn run(
    config: &AppConfig,
    filter: &MetricsFilter,
    page: u32,
    page_size: u32,
    format: OutputFormat,
) -> Result<()> {
    let request = PageRequest::new(page, page_size)?;
    let store = connect(config).await?;
    let result = store.list_metrics(filter, request).await?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    banner("Metrics Screen");

    if result.items.is_empty() {
        println!("No companies match the filter.\n");
        return Ok(());
    }

    println!(
        "{:<8} {:<28} {:<22} {:>10} {:>8} {:>8} {:>8} {:>5} {:>6}",
        "Symbol", "Company", "Sector", "Mkt Cap", "P/E", "Yield", "ROIC", "Yrs", "Score"
    );
    println!("{}", "-".repeat(112));

    for m in &result.items {
        println!(
            "{:<8} {:<28} {:<22} {:>10} {:>8} {:>8} {:>8} {:>5} {:>6}",
            m.symbol,
            truncate(m.company_name.as_deref().unwrap_or("-"), 28),
            truncate(m.sector.as_deref().unwrap_or("-"), 22),
            fmt_amount(m.market_cap),
            fmt_opt(m.pe_ratio, 1),
            fmt_pct(m.dividend_yield),
            fmt_pct(m.roic),
            m.years_increasing_dividend
                .map_or_else(|| "-".to_string(), |y| y.to_string()),
            fmt_opt(m.score, 2),
        );
    }

    println!(
        "\nPage {} of {} ({} matching)\n",
        result.page, result.pages, result.total
    );

    Ok(())
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width - 1).collect();
        cut.push('…');
        cut
    }
}
