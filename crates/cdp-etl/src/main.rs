//! CDP ETL command-line tool
//!
//! `cdp-etl load` runs one CSV batch through the upsert pipeline;
//! `cdp-etl audit` looks up the audit row for a previous batch.

use std::path::PathBuf;

use anyhow::Result;
use cdp_common::logging::{init_logging, LogConfig, LogLevel};
use cdp_etl::audit::get_batch_audit;
use cdp_etl::config::{create_pool, EtlConfig};
use cdp_etl::pipeline::CustomerPipeline;
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "cdp-etl")]
#[command(about = "Load enriched customer batches into the warehouse")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Load a customer CSV file as one batch
    Load {
        /// Path to the CSV file
        file: PathBuf,

        /// Override the configured database URL
        #[arg(long, env = "DATABASE_URL")]
        database_url: Option<String>,
    },
    /// Show the audit entry for a batch
    Audit {
        /// Batch identifier (UUID)
        batch_id: Uuid,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut log_config = LogConfig::from_env()?;
    log_config.log_file_prefix = "cdp-etl".to_string();
    if cli.verbose {
        log_config.level = LogLevel::Debug;
    }
    init_logging(&log_config)?;

    let mut config = EtlConfig::load()?;

    match cli.command {
        Command::Load { file, database_url } => {
            if let Some(url) = database_url {
                config.database.url = url;
            }

            let pool = create_pool(&config.database).await?;
            let pipeline = CustomerPipeline::new(pool);
            let result = pipeline.run_file(&file).await?;

            for failure in &result.errors {
                warn!(%failure, "record failed");
            }
            info!(
                batch_id = %result.batch_id,
                total = result.total_records,
                inserts = result.successful_inserts,
                updates = result.successful_updates,
                failed = result.failed_records,
                duration_seconds = result.duration_seconds,
                "Load complete"
            );

            if !result.success {
                error!(
                    failed = result.failed_records,
                    "Batch committed with record failures"
                );
                std::process::exit(1);
            }
        },
        Command::Audit { batch_id } => {
            let pool = create_pool(&config.database).await?;
            match get_batch_audit(&pool, batch_id).await? {
                Some(entry) => println!("{}", serde_json::to_string_pretty(&entry)?),
                None => {
                    error!(%batch_id, "No audit entry found for batch");
                    std::process::exit(1);
                },
            }
        },
    }

    Ok(())
}
