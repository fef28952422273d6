//! CLI subcommand modules.
//!
//! This module contains the implementations for all savvy CLI subcommands
//! and the table helpers they share.

pub(crate) mod fetch;
pub(crate) mod indicators;
pub(crate) mod init_db;
pub(crate) mod screen;
pub(crate) mod sectors;
pub(crate) mod show;
pub(crate) mod sync_metrics;

use anyhow::Result;
use clap::ValueEnum;
use savvy::store::PgStore;

use crate::config::AppConfig;

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Aligned tables.
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Open the configured database.
pub(crate) async fn connect(config: &AppConfig) -> Result<PgStore> {
    let store = PgStore::connect(config.database_url()?, config.max_connections).await?;
    Ok(store)
}

/// Print a boxed section title.
pub(crate) fn banner(title: &str) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║{title:^62}║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
}

/// Format an optional float, "-" when unavailable.
pub(crate) fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.decimals$}"))
}

/// Format an optional ratio as a percentage.
pub(crate) fn fmt_pct(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.2}%", v * 100.0))
}

/// Format a large amount with a magnitude suffix.
pub(crate) fn fmt_amount(value: Option<f64>) -> String {
    let Some(v) = value else {
        return "-".to_string();
    };
    let abs = v.abs();
    if abs >= 1e12 {
        format!("{:.2}T", v / 1e12)
    } else if abs >= 1e9 {
        format!("{:.2}B", v / 1e9)
    } else if abs >= 1e6 {
        format!("{:.2}M", v / 1e6)
    } else {
        format!("{v:.0}")
    }
}

/// Upper-case and de-duplicate user supplied symbols, keeping order.
pub(crate) fn normalize_symbols(symbols: &[String]) -> Vec<String> {
    let mut seen = Vec::with_capacity(symbols.len());
    for symbol in symbols {
        let symbol = symbol.trim().to_uppercase();
        if !symbol.is_empty() && !seen.contains(&symbol) {
            seen.push(symbol);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatting() {
        assert_eq!(fmt_opt(None, 2), "-");
        assert_eq!(fmt_opt(Some(3.14159), 2), "3.14");
        assert_eq!(fmt_pct(Some(0.0325)), "3.25%");
        assert_eq!(fmt_amount(Some(2.5e12)), "2.50T");
        assert_eq!(fmt_amount(Some(-3.0e9)), "-3.00B");
        assert_eq!(fmt_amount(Some(1234.0)), "1234");
        assert_eq!(fmt_amount(None), "-");
    }

    #[test]
    fn test_normalize_symbols() {
        let input = vec![" aapl".to_string(), "MSFT".to_string(), "AAPL".to_string(), String::new()];
        assert_eq!(normalize_symbols(&input), vec!["AAPL", "MSFT"]);
    }
}
