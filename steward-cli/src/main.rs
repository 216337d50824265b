//! Steward CLI tool

use clap::{Parser, Subcommand};
use steward_core::StewardConfig;

mod commands;

#[derive(Parser)]
#[command(name = "steward")]
#[command(author, version, about = "Warehouse data-governance CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the configuration file
    #[arg(long, env = "STEWARD_CONFIG", default_value = "steward.yaml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract and persist the metadata catalog
    Catalog,

    /// Extract lineage, optionally looking up one table's neighbors
    Lineage {
        /// Fully qualified table to look up after extraction
        #[arg(long)]
        table: Option<String>,

        /// Show upstream (source) tables only
        #[arg(long)]
        upstream: bool,

        /// Show downstream (consumer) tables only
        #[arg(long)]
        downstream: bool,

        /// Override the query history window in days
        #[arg(long)]
        days: Option<i64>,

        /// Override the query history row limit
        #[arg(long)]
        limit: Option<i64>,
    },

    /// Run quality validations over the configured tables
    Quality,

    /// Run the full governance pipeline
    Run,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    let mut config = StewardConfig::load(&cli.config)?;
    tracing::debug!(path = %cli.config, "configuration loaded");

    match cli.command {
        Commands::Catalog => {
            commands::catalog::execute(config).await?;
        }
        Commands::Lineage {
            table,
            upstream,
            downstream,
            days,
            limit,
        } => {
            if let Some(days) = days {
                config.lineage.query_history_days = days;
            }
            if let Some(limit) = limit {
                config.lineage.query_history_limit = limit;
            }
            commands::lineage::execute(config, table.as_deref(), upstream, downstream).await?;
        }
        Commands::Quality => {
            commands::quality::execute(config).await?;
        }
        Commands::Run => {
            commands::run::execute(config).await?;
        }
    }

    Ok(())
}
