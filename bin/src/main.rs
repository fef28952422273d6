//! Savvy CLI binary.
//!
//! Provides command-line access to the savvy metrics engine: ingest
//! fundamentals, recompute metrics in batch, and query the results.

mod cmd;
mod config;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cmd::OutputFormat;
use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "savvy")]
#[command(about = "Fundamental metrics engine for listed companies", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Recompute metrics for every symbol with statements and store them
    SyncMetrics {
        /// Only these symbols (comma separated)
        #[arg(short, long, value_delimiter = ',')]
        symbols: Option<Vec<String>>,

        /// Symbols per batch (defaults to METRICS_BATCH_SIZE or 100)
        #[arg(short, long)]
        batch_size: Option<usize>,

        /// Evaluation date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },

    /// Fetch fundamentals from FMP into the database
    Fetch {
        /// Ticker symbols
        #[arg(required = true, value_delimiter = ',')]
        symbols: Vec<String>,

        /// Quarterly statements to fetch per kind
        #[arg(short, long, default_value = "8")]
        quarters: u32,
    },

    /// Compute and print metrics with the score breakdown
    Show {
        /// Ticker symbols
        #[arg(required = true, value_delimiter = ',')]
        symbols: Vec<String>,

        /// Fetch from FMP instead of reading the database
        #[arg(long)]
        live: bool,

        /// Evaluation date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        as_of: Option<NaiveDate>,

        /// Output format (text or json)
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List stored metrics matching a filter
    Screen {
        /// Exact sector
        #[arg(long)]
        sector: Option<String>,

        /// Minimum P/E ratio
        #[arg(long)]
        min_pe: Option<f64>,

        /// Maximum P/E ratio
        #[arg(long)]
        max_pe: Option<f64>,

        /// Minimum dividend yield (0.03 = 3%)
        #[arg(long)]
        min_yield: Option<f64>,

        /// Maximum dividend yield
        #[arg(long)]
        max_yield: Option<f64>,

        /// Minimum ROIC
        #[arg(long)]
        min_roic: Option<f64>,

        /// Maximum ROIC
        #[arg(long)]
        max_roic: Option<f64>,

        /// Minimum market cap
        #[arg(long)]
        min_market_cap: Option<f64>,

        /// Maximum market cap
        #[arg(long)]
        max_market_cap: Option<f64>,

        /// Minimum consecutive years of dividend increases
        #[arg(long)]
        min_years: Option<i32>,

        /// Page number (1-based)
        #[arg(long, default_value = "1")]
        page: u32,

        /// Rows per page (1-500)
        #[arg(long, default_value = "50")]
        page_size: u32,

        /// Output format (text or json)
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List the sectors present in stored metrics
    Sectors,

    /// List available indicators
    Indicators {
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,

        /// Describe a single indicator by column name (e.g. pe_ratio)
        #[arg(short, long, conflicts_with = "category")]
        name: Option<String>,

        /// Show detailed information
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create the database tables if they do not exist
    InitDb,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::from_env()?;

    match cli.command {
        Commands::SyncMetrics {
            symbols,
            batch_size,
            as_of,
        } => {
            cmd::sync_metrics::run(&config, symbols, batch_size, as_of).await?;
        }
        Commands::Fetch { symbols, quarters } => {
            cmd::fetch::run(&config, &symbols, quarters).await?;
        }
        Commands::Show {
            symbols,
            live,
            as_of,
            format,
        } => {
            cmd::show::run(&config, &symbols, live, as_of, format).await?;
        }
        Commands::Screen {
            sector,
            min_pe,
            max_pe,
            min_yield,
            max_yield,
            min_roic,
            max_roic,
            min_market_cap,
            max_market_cap,
            min_years,
            page,
            page_size,
            format,
        } => {
            let filter = savvy::traits::MetricsFilter {
                sector,
                min_pe_ratio: min_pe,
                max_pe_ratio: max_pe,
                min_dividend_yield: min_yield,
                max_dividend_yield: max_yield,
                min_roic,
                max_roic,
                min_market_cap,
                max_market_cap,
                min_years_increasing_dividend: min_years,
            };
            cmd::screen::run(&config, &filter, page, page_size, format).await?;
        }
        Commands::Sectors => {
            cmd::sectors::run(&config).await?;
        }
        Commands::Indicators {
            category,
            name,
            verbose,
        } => {
            cmd::indicators::run(category.as_deref(), name.as_deref(), verbose)?;
        }
        Commands::InitDb => {
            cmd::init_db::run(&config).await?;
        }
    }

    Ok(())
}
