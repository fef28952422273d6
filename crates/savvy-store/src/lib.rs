//! Storage backends for the savvy fundamentals engine.
//!
//! Two implementations of the `savvy_traits` storage seams:
//! - [`PgStore`]: PostgreSQL via `sqlx`, with atomic batch upserts
//!   (`INSERT ... ON CONFLICT DO UPDATE`) keyed by each entity's natural key
//! - [`MemoryStore`]: an in-process store with the same semantics, used for
//!   tests and for computing metrics straight from the provider
//!
//! # Example
//!
//! ```rust,no_run
//! use savvy_store::PgStore;
//! use savvy_traits::MetricsRepository;
//!
//! # async fn run() -> savvy_traits::Result<()> {
//! let store = PgStore::connect("postgres://localhost/savvy", 5).await?;
//! store.init_schema().await?;
//!
//! let sectors = store.sectors().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

mod memory;
mod postgres;
mod schema;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use schema::SCHEMA;
