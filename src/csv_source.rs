//! CSV row source for the update batch.
//!
//! The input file carries a header row followed by `identifier,value` pairs.
//! Rows are surfaced lazily and in file order; the header never reaches the
//! driver.

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use thiserror::Error;

/// One data row of the input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// 1-based position among data rows, header excluded. Used only for
    /// operator-facing progress messages.
    pub ordinal: usize,
    /// Identifier of the target document.
    pub id: String,
    /// Raw value destined for the update field, prior to sanitization.
    pub value: String,
}

/// Failure to open the input file for reading.
#[derive(Debug, Error)]
#[error("failed to open {}: {source}", path.display())]
pub struct CsvSourceError {
    /// Path that could not be opened.
    pub path: PathBuf,
    /// Underlying CSV/IO error.
    #[source]
    pub source: csv::Error,
}

/// Per-row failure that does not terminate the sequence.
#[derive(Debug, Error)]
pub enum RowError {
    /// Row carried fewer than the two required columns.
    #[error("row {ordinal} has {found} column(s), expected at least 2")]
    TooFewColumns {
        /// 1-based ordinal of the offending data row.
        ordinal: usize,
        /// Number of columns actually present.
        found: usize,
    },
    /// Row could not be decoded at all.
    #[error("row {ordinal} could not be read: {source}")]
    Read {
        /// 1-based ordinal of the offending data row.
        ordinal: usize,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },
}

/// Lazy, forward-only iterator over the data rows of a CSV file.
pub struct RowSource {
    records: csv::StringRecordsIntoIter<File>,
    ordinal: usize,
}

impl RowSource {
    /// Open the file and position the reader past the header row.
    pub fn open(path: &Path) -> Result<Self, CsvSourceError> {
        // `flexible` lets short rows through so they surface as per-row
        // errors instead of ending the sequence.
        let reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .map_err(|source| CsvSourceError {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            records: reader.into_records(),
            ordinal: 0,
        })
    }
}

impl Iterator for RowSource {
    type Item = Result<Row, RowError>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        self.ordinal += 1;
        let ordinal = self.ordinal;

        Some(match record {
            Ok(record) => match (record.get(0), record.get(1)) {
                (Some(id), Some(value)) => Ok(Row {
                    ordinal,
                    id: id.to_string(),
                    value: value.to_string(),
                }),
                _ => Err(RowError::TooFewColumns {
                    ordinal,
                    found: record.len(),
                }),
            },
            Err(source) => Err(RowError::Read { ordinal, source }),
        })
    }
}
