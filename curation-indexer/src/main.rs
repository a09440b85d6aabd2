use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tokio::io::AsyncReadExt;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use curation_indexer::{process_batch_json, Dependencies, IndexerSettings, IndexingError};

#[derive(Parser)]
#[command(name = "curation-indexer")]
#[command(about = "Index a batch of curation events into the search backend", long_about = None)]
struct Cli {
    /// Queue batch JSON file; reads stdin when omitted
    input: Option<PathBuf>,

    /// Skip the search backend health check at startup
    #[arg(long)]
    skip_health_check: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    // Logs go to stderr; stdout carries the batch response.
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

async fn read_input(path: Option<&Path>) -> Result<String, IndexingError> {
    match path {
        Some(path) => Ok(tokio::fs::read_to_string(path).await?),
        None => {
            let mut input = String::new();
            tokio::io::stdin().read_to_string(&mut input).await?;
            Ok(input)
        }
    }
}

async fn run(cli: Cli) -> Result<(), IndexingError> {
    let settings = IndexerSettings::from_env()?;
    let dependencies = Dependencies::new(&settings, !cli.skip_health_check).await?;

    let input = read_input(cli.input.as_deref()).await?;
    let response = process_batch_json(&dependencies.processor, &input).await?;

    info!(
        failed = response.batch_item_failures.len(),
        "Batch complete"
    );
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Batch processing failed");
            ExitCode::FAILURE
        }
    }
}
