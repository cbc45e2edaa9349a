//! Shared types used by the Solr client.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Errors returned while interacting with Solr.
#[derive(Debug, Error)]
pub enum SolrError {
    /// Base URL failed to parse or normalize.
    #[error("invalid Solr URL: {0}")]
    InvalidUrl(String),
    /// No credentials were configured for preemptive authentication.
    #[error("no credentials configured for preemptive authentication")]
    MissingCredentials,
    /// HTTP layer failed before receiving a response.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Solr responded with an unexpected HTTP status code.
    #[error("unexpected Solr response ({status}): {body}")]
    UnexpectedStatus {
        /// HTTP status returned from Solr.
        status: StatusCode,
        /// Body payload associated with the failing response.
        body: String,
    },
}

/// Result of one update request as reported by Solr's response header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Application-level status code; zero means the update was accepted.
    pub status: i64,
}

impl UpdateOutcome {
    /// Whether Solr accepted the request.
    pub fn accepted(&self) -> bool {
        self.status == 0
    }
}

#[derive(Deserialize)]
pub(crate) struct UpdateResponse {
    #[serde(rename = "responseHeader")]
    pub(crate) response_header: ResponseHeader,
}

#[derive(Deserialize)]
pub(crate) struct ResponseHeader {
    pub(crate) status: i64,
}
