//! Batch orchestration: pull rows, sanitize, submit, commit.
//!
//! Rows are processed strictly sequentially. Per-row failures are reported
//! and counted but never stop the batch; the commit is attempted once after
//! the row loop regardless of how many rows failed.

use thiserror::Error;

use crate::config::Config;
use crate::csv_source::{CsvSourceError, RowSource};
use crate::sanitize::sanitize;
use crate::solr::{SolrClient, SolrError};

/// Aggregate result of one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Rows accepted by Solr (header status zero).
    pub processed: usize,
    /// Rows rejected by Solr or lost to transport failures.
    pub failed: usize,
    /// Rows skipped before submission (short or unreadable records).
    pub skipped: usize,
}

impl RunSummary {
    /// Whether every data row was submitted and accepted.
    pub fn clean(&self) -> bool {
        self.failed == 0 && self.skipped == 0
    }
}

/// Errors that abort the run before any row is processed.
#[derive(Debug, Error)]
pub enum SetupError {
    /// The Solr client could not be constructed.
    #[error(transparent)]
    Solr(#[from] SolrError),
    /// The input file could not be opened.
    #[error(transparent)]
    Csv(#[from] CsvSourceError),
}

/// Run the batch end to end: connect, stream rows, commit.
///
/// Setup failures abort distinctly; everything after setup runs to
/// completion and is reflected in the returned [`RunSummary`].
pub async fn run(config: &Config) -> Result<RunSummary, SetupError> {
    let client = SolrClient::new(config)?;
    let source = RowSource::open(&config.csv_path)?;

    let summary = process_rows(&client, source, config).await;

    // Attempted even when every row failed; earlier updates may still be
    // pending on the server side.
    if let Err(error) = client.commit().await {
        tracing::warn!(error = %error, "commit failed");
    }

    tracing::info!(
        processed = summary.processed,
        failed = summary.failed,
        skipped = summary.skipped,
        "batch finished"
    );

    Ok(summary)
}

async fn process_rows(client: &SolrClient, source: RowSource, config: &Config) -> RunSummary {
    let mut summary = RunSummary::default();

    for row in source {
        let row = match row {
            Ok(row) => row,
            Err(error) => {
                tracing::warn!(error = %error, "skipping row");
                summary.skipped += 1;
                continue;
            }
        };

        let value = sanitize(&config.update_field, &row.value);
        match client
            .add_partial_update(&config.id_field, &row.id, &config.update_field, &value)
            .await
        {
            Ok(outcome) if outcome.accepted() => {
                println!("Processed: ({}) {}", row.ordinal, row.id);
                summary.processed += 1;
            }
            Ok(outcome) => {
                println!("PROBLEM: Status Code {} - {}", outcome.status, row.id);
                summary.failed += 1;
            }
            Err(error) => {
                tracing::error!(row = row.ordinal, id = %row.id, error = %error, "update failed");
                summary.failed += 1;
            }
        }
    }

    summary
}
