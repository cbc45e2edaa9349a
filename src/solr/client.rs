//! HTTP client wrapper for the Solr update API.

use std::time::Duration;

use reqwest::{Client, Method};
use serde_json::json;

use crate::config::Config;
use crate::solr::types::{SolrError, UpdateOutcome, UpdateResponse};

/// Lightweight HTTP client for partial updates against one Solr collection.
///
/// Basic credentials are stored at construction time and attached to every
/// outgoing request, so Solr never gets the chance to answer with a 401
/// challenge. Dropping the client releases the underlying connection pool.
pub struct SolrClient {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    pub(crate) collection: String,
    pub(crate) username: String,
    pub(crate) password: String,
}

impl SolrClient {
    /// Construct a new client from the resolved configuration.
    pub fn new(config: &Config) -> Result<Self, SolrError> {
        if config.username.is_empty() || config.password.is_empty() {
            return Err(SolrError::MissingCredentials);
        }

        let client = Client::builder()
            .user_agent("solrpatch/0.1")
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;

        let base_url = normalize_base_url(&config.solr_url).map_err(SolrError::InvalidUrl)?;
        tracing::debug!(
            url = %base_url,
            collection = %config.collection,
            timeout_secs = config.http_timeout_secs,
            "Initialized Solr HTTP client"
        );

        Ok(Self {
            client,
            base_url,
            collection: config.collection.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    /// Submit a partial update setting `field` to `value` on the document
    /// identified by `id_field` = `id`. Other fields of the document are left
    /// untouched.
    pub async fn add_partial_update(
        &self,
        id_field: &str,
        id: &str,
        field: &str,
        value: &str,
    ) -> Result<UpdateOutcome, SolrError> {
        let doc = json!({
            id_field: id,
            field: { "set": value },
        });

        let response = self
            .request(Method::POST, "update")
            .json(&json!([doc]))
            .send()
            .await?;

        self.parse_outcome(response).await
    }

    /// Flush pending updates so they become visible to searchers.
    pub async fn commit(&self) -> Result<UpdateOutcome, SolrError> {
        let response = self
            .request(Method::POST, "update")
            .query(&[("commit", "true")])
            .json(&json!({}))
            .send()
            .await?;

        self.parse_outcome(response).await
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}/{}", self.base_url, self.collection, path);
        self.client
            .request(method, url)
            .basic_auth(&self.username, Some(&self.password))
    }

    async fn parse_outcome(&self, response: reqwest::Response) -> Result<UpdateOutcome, SolrError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let error = SolrError::UnexpectedStatus { status, body };
            tracing::error!(collection = %self.collection, error = %error, "Solr request failed");
            return Err(error);
        }

        let payload: UpdateResponse = response.json().await?;
        Ok(UpdateOutcome {
            status: payload.response_header.status,
        })
    }
}

fn normalize_base_url(url: &str) -> Result<String, String> {
    let mut parsed = reqwest::Url::parse(url).map_err(|err| err.to_string())?;
    let path = parsed.path().trim_end_matches('/').to_string();
    parsed.set_path(&path);
    Ok(parsed.to_string().trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method::POST, MockServer};

    fn test_client(base_url: &str) -> SolrClient {
        SolrClient {
            client: Client::builder()
                .user_agent("solrpatch-test")
                .build()
                .expect("client"),
            base_url: base_url.trim_end_matches('/').to_string(),
            collection: "docs".to_string(),
            username: "admin".to_string(),
            password: "secret".to_string(),
        }
    }

    #[tokio::test]
    async fn partial_update_sends_set_document_with_basic_auth() {
        let server = MockServer::start_async().await;

        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/docs/update")
                    // "admin:secret" encoded per RFC 7617.
                    .header("authorization", "Basic YWRtaW46c2VjcmV0")
                    .json_body(serde_json::json!([
                        { "id": "1001", "url": { "set": "http://example.org/a" } }
                    ]));
                then.status(200).json_body(serde_json::json!({
                    "responseHeader": { "status": 0, "QTime": 4 }
                }));
            })
            .await;

        let client = test_client(&server.base_url());
        let outcome = client
            .add_partial_update("id", "1001", "url", "http://example.org/a")
            .await
            .expect("update request");

        mock.assert_async().await;
        assert!(outcome.accepted());
    }

    #[tokio::test]
    async fn nonzero_header_status_is_surfaced_not_an_error() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(POST).path("/docs/update");
                then.status(200).json_body(serde_json::json!({
                    "responseHeader": { "status": 400, "QTime": 1 }
                }));
            })
            .await;

        let client = test_client(&server.base_url());
        let outcome = client
            .add_partial_update("id", "1001", "url", "http://example.org/a")
            .await
            .expect("update request");

        assert!(!outcome.accepted());
        assert_eq!(outcome.status, 400);
    }

    #[tokio::test]
    async fn commit_posts_with_commit_flag() {
        let server = MockServer::start_async().await;

        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/docs/update")
                    .query_param("commit", "true")
                    .header("authorization", "Basic YWRtaW46c2VjcmV0");
                then.status(200).json_body(serde_json::json!({
                    "responseHeader": { "status": 0, "QTime": 11 }
                }));
            })
            .await;

        let client = test_client(&server.base_url());
        let outcome = client.commit().await.expect("commit request");

        mock.assert_async().await;
        assert!(outcome.accepted());
    }

    #[tokio::test]
    async fn http_failure_becomes_unexpected_status() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(POST).path("/docs/update");
                then.status(503).body("service unavailable");
            })
            .await;

        let client = test_client(&server.base_url());
        let error = client
            .add_partial_update("id", "1001", "url", "http://example.org/a")
            .await
            .expect_err("should fail");

        assert!(matches!(
            error,
            SolrError::UnexpectedStatus { status, .. } if status.as_u16() == 503
        ));
    }

    #[test]
    fn empty_credentials_are_rejected_at_construction() {
        let config = Config {
            csv_path: "urls.csv".into(),
            solr_url: "http://localhost:8983/solr/".into(),
            collection: "docs".into(),
            username: String::new(),
            password: String::new(),
            id_field: "id".into(),
            update_field: "url".into(),
            http_timeout_secs: 30,
        };

        assert!(matches!(
            SolrClient::new(&config),
            Err(SolrError::MissingCredentials)
        ));
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        assert_eq!(
            normalize_base_url("http://localhost:8983/solr/").expect("url"),
            "http://localhost:8983/solr"
        );
        assert_eq!(
            normalize_base_url("http://localhost:8983/solr").expect("url"),
            "http://localhost:8983/solr"
        );
    }
}
