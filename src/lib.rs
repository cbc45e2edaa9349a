#![deny(missing_docs)]

//! Core library for the solrpatch batch updater.

/// Environment- and CLI-driven configuration management.
pub mod config;
/// CSV row source feeding the update batch.
pub mod csv_source;
/// Batch orchestration over rows, updates, and the final commit.
pub mod driver;
/// Structured logging and tracing setup.
pub mod logging;
/// URL value cleanup applied before submission.
pub mod sanitize;
/// Solr update-API integration.
pub mod solr;
