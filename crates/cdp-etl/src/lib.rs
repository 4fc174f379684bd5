//! CDP ETL - customer warehouse loading pipeline
//!
//! Reads enriched customer CSV batches, reconciles each record against the
//! `customer_enriched` table (insert when new, full-row update when known),
//! and writes one `enrichment_audit` row per batch. Each batch runs in a
//! single transaction; per-record failures are isolated with savepoints
//! and reported in the [`models::BatchResult`] without aborting the batch.
//!
//! # Example
//!
//! ```no_run
//! use cdp_etl::config::{create_pool, EtlConfig};
//! use cdp_etl::pipeline::CustomerPipeline;
//! use std::path::Path;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = EtlConfig::load()?;
//! let pool = create_pool(&config.database).await?;
//!
//! let pipeline = CustomerPipeline::new(pool);
//! let result = pipeline.run_file(Path::new("new_user.csv")).await?;
//! println!("{} inserted, {} updated", result.successful_inserts, result.successful_updates);
//! # Ok(())
//! # }
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod audit;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod source;
pub mod storage;

pub use error::{EtlError, EtlResult};
pub use models::{BatchResult, CustomerRecord};
pub use pipeline::CustomerPipeline;
