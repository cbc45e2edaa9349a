use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use solrpatch::config::{Config, Overrides};
use solrpatch::driver::{self, RunSummary};
use solrpatch::logging;

#[derive(Parser)]
#[command(
    name = "solrpatch",
    about = "Apply partial `set` updates to Solr documents from a CSV of id/value pairs"
)]
struct Cli {
    /// CSV file with a header row followed by identifier,value pairs.
    csv: PathBuf,
    /// Solr base URL, e.g. http://localhost:8983/solr/ (falls back to SOLR_URL).
    #[arg(long)]
    solr_url: Option<String>,
    /// Target collection name (falls back to SOLR_COLLECTION).
    #[arg(long)]
    collection: Option<String>,
    /// Basic-auth username (falls back to SOLR_USERNAME).
    #[arg(long)]
    username: Option<String>,
    /// Basic-auth password (falls back to SOLR_PASSWORD).
    #[arg(long)]
    password: Option<String>,
    /// Identifier field name (falls back to SOLR_ID_FIELD, default "id").
    #[arg(long)]
    id_field: Option<String>,
    /// Field receiving the update (falls back to SOLR_UPDATE_FIELD, default "url").
    #[arg(long)]
    update_field: Option<String>,
    /// Per-request timeout in seconds (falls back to SOLR_HTTP_TIMEOUT_SECS, default 30).
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    logging::init_tracing();

    match run().await {
        Ok(summary) if summary.clean() => ExitCode::SUCCESS,
        Ok(summary) => {
            tracing::warn!(
                failed = summary.failed,
                skipped = summary.skipped,
                "batch completed with failures"
            );
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<RunSummary> {
    let cli = Cli::parse();
    let config = Config::resolve(
        cli.csv,
        Overrides {
            solr_url: cli.solr_url,
            collection: cli.collection,
            username: cli.username,
            password: cli.password,
            id_field: cli.id_field,
            update_field: cli.update_field,
            http_timeout_secs: cli.timeout_secs,
        },
    )
    .context("failed to resolve configuration")?;

    driver::run(&config).await.context("batch setup failed")
}
