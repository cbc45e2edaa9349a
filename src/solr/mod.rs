//! Solr update-API integration.

pub mod client;
pub mod types;

pub use client::SolrClient;
pub use types::{SolrError, UpdateOutcome};
