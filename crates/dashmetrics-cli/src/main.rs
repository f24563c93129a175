mod extract;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::extract::ExtractOptions;

#[derive(Debug, Parser)]
#[command(name = "dashmetrics")]
#[command(about = "Extract insights metrics from dashboard screenshot OCR text")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Combine OCR text files (one per screenshot) and extract one metrics record
    Extract {
        /// OCR text files in screenshot order; `-` reads standard input
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Date that relative periods ("Last 7 days") end on, as YYYY-MM-DD
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,

        /// Print only the metrics record, without the per-page texts
        #[arg(long)]
        metrics_only: bool,

        /// Maximum number of files read at once
        #[arg(long, default_value_t = 4)]
        concurrency: usize,
    },
    /// Print the effective extraction limits after environment overrides
    Limits,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = dashmetrics_core::load_cli_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Extract {
            files,
            today,
            pretty,
            metrics_only,
            concurrency,
        } => {
            let options = ExtractOptions {
                files,
                today: today.unwrap_or_else(|| chrono::Local::now().date_naive()),
                pretty,
                metrics_only,
                concurrency,
            };
            extract::run_extract(config.limits, options).await?;
        }
        Commands::Limits => {
            println!("{}", extract::render(&config.limits, true)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
