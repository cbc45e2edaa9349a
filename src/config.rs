use std::env;
use std::path::PathBuf;
use thiserror::Error;

/// Errors encountered while resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required value was supplied neither on the command line nor in the environment.
    #[error("missing configuration value: {0} (set the environment variable or pass the flag)")]
    Missing(&'static str),
    /// Value was present but could not be parsed.
    #[error("invalid value for {0}")]
    Invalid(&'static str),
}

/// Identifier field used when no override is configured.
pub const DEFAULT_ID_FIELD: &str = "id";
/// Update target field used when no override is configured.
pub const DEFAULT_UPDATE_FIELD: &str = "url";
/// Request timeout applied when no override is configured.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration for one batch run.
///
/// Resolved once at startup and passed by reference into the driver; there is
/// no global configuration state.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the CSV file driving the update.
    pub csv_path: PathBuf,
    /// Base URL of the Solr instance, e.g. `http://localhost:8983/solr/`.
    pub solr_url: String,
    /// Name of the Solr collection holding the target documents.
    pub collection: String,
    /// Username sent with preemptive Basic authentication.
    pub username: String,
    /// Password sent with preemptive Basic authentication.
    pub password: String,
    /// Field name used to identify the target document.
    pub id_field: String,
    /// Field name receiving the partial-update value.
    pub update_field: String,
    /// Timeout applied to every Solr request, in seconds.
    pub http_timeout_secs: u64,
}

/// Command-line overrides applied on top of the environment.
#[derive(Debug, Default)]
pub struct Overrides {
    /// Override for `SOLR_URL`.
    pub solr_url: Option<String>,
    /// Override for `SOLR_COLLECTION`.
    pub collection: Option<String>,
    /// Override for `SOLR_USERNAME`.
    pub username: Option<String>,
    /// Override for `SOLR_PASSWORD`.
    pub password: Option<String>,
    /// Override for `SOLR_ID_FIELD`.
    pub id_field: Option<String>,
    /// Override for `SOLR_UPDATE_FIELD`.
    pub update_field: Option<String>,
    /// Override for `SOLR_HTTP_TIMEOUT_SECS`.
    pub http_timeout_secs: Option<u64>,
}

impl Config {
    /// Resolve configuration from command-line overrides and environment
    /// variables, performing validation along the way.
    pub fn resolve(csv_path: PathBuf, overrides: Overrides) -> Result<Self, ConfigError> {
        let http_timeout_secs = match overrides.http_timeout_secs {
            Some(secs) => secs,
            None => match load_env("SOLR_HTTP_TIMEOUT_SECS") {
                Some(raw) => raw
                    .parse()
                    .map_err(|_| ConfigError::Invalid("SOLR_HTTP_TIMEOUT_SECS"))?,
                None => DEFAULT_HTTP_TIMEOUT_SECS,
            },
        };

        Ok(Self {
            csv_path,
            solr_url: require("SOLR_URL", overrides.solr_url)?,
            collection: require("SOLR_COLLECTION", overrides.collection)?,
            username: require("SOLR_USERNAME", overrides.username)?,
            password: require("SOLR_PASSWORD", overrides.password)?,
            id_field: resolve_value("SOLR_ID_FIELD", overrides.id_field)
                .unwrap_or_else(|| DEFAULT_ID_FIELD.to_string()),
            update_field: resolve_value("SOLR_UPDATE_FIELD", overrides.update_field)
                .unwrap_or_else(|| DEFAULT_UPDATE_FIELD.to_string()),
            http_timeout_secs,
        })
    }
}

fn require(key: &'static str, override_value: Option<String>) -> Result<String, ConfigError> {
    resolve_value(key, override_value).ok_or(ConfigError::Missing(key))
}

fn resolve_value(key: &'static str, override_value: Option<String>) -> Option<String> {
    override_value
        .or_else(|| load_env(key))
        .filter(|value| !value.trim().is_empty())
}

fn load_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
