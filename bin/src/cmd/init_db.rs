//! Schema creation command implementation.

use anyhow::Result;

use crate::cmd::connect;
use crate::config::AppConfig;

/// Create any missing tables and indexes.
pub(crate) async fn run(config: &AppConfig) -> Result<()> {
    let store = connect(config).await?;
    store.init_schema().await?;
    println!("Database schema is up to date.");
    Ok(())
}
