//! Melo property-listing API client.
//!
//! One GET per search, no retries. The API key is passed in on every call
//! and only ever placed in the outgoing request header.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use serde_json::Value;
use tracing::{debug, error, info, instrument};

use crate::core::config::MeloConfig;

use super::common::{PREVIEW_LIMIT, redact, truncate};
use super::credential::ApiKey;
use super::error::SearchError;
use super::query::UpstreamQuery;

/// Path of the property search endpoint under the base URL.
pub const PROPERTIES_PATH: &str = "/documents/properties";

/// Header name the upstream expects the API key under.
const UPSTREAM_API_KEY_HEADER: &str = "X-API-KEY";

/// A source of property listings.
///
/// `MeloClient` is the production implementation; tests substitute doubles.
#[async_trait]
pub trait PropertySource: Send + Sync {
    /// Run one search and return the decoded payload verbatim.
    async fn fetch(&self, credential: &ApiKey, query: &UpstreamQuery)
    -> Result<Value, SearchError>;
}

/// HTTP client for the Melo API.
///
/// Holds a pooled `reqwest::Client` and the endpoint URL. No credential is
/// stored here.
#[derive(Debug, Clone)]
pub struct MeloClient {
    http: reqwest::Client,
    endpoint: String,
}

impl MeloClient {
    /// Create a client for the configured base URL and timeout.
    pub fn new(config: &MeloConfig) -> Result<Self, SearchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SearchError::transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint: format!("{}{}", config.base_url.trim_end_matches('/'), PROPERTIES_PATH),
        })
    }

    /// Full URL of the search endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn log_request(&self, query: &UpstreamQuery) {
        info!("Melo API request");
        info!("URL: {}", self.endpoint);
        info!("Parameters:");
        for (key, value) in query.pairs() {
            info!("  {}: {}", key, value);
        }
        debug!("Encoded query: {}", query.encoded());
    }

    fn log_response(status: StatusCode, payload: &Value) {
        let total_items = payload
            .get("hydra:totalItems")
            .map(|v| v.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        let returned = payload
            .get("hydra:member")
            .and_then(Value::as_array)
            .map_or(0, Vec::len);
        let preview = serde_json::to_string_pretty(payload).unwrap_or_default();

        info!("Melo API response");
        info!("Status Code: {}", status.as_u16());
        info!("Total Items: {}", total_items);
        info!("Properties Returned: {}", returned);
        info!("Response Preview: {}...", truncate(&preview, PREVIEW_LIMIT));
    }
}

#[async_trait]
impl PropertySource for MeloClient {
    #[instrument(skip_all, fields(endpoint = %self.endpoint, pairs = query.len()))]
    async fn fetch(
        &self,
        credential: &ApiKey,
        query: &UpstreamQuery,
    ) -> Result<Value, SearchError> {
        self.log_request(query);

        let mut api_key =
            HeaderValue::from_str(credential.expose()).map_err(|_| SearchError::InvalidCredential)?;
        api_key.set_sensitive(true);

        let response = self
            .http
            .get(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(UPSTREAM_API_KEY_HEADER, api_key)
            .query(query)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            error!("Invalid Melo API key (HTTP {})", status.as_u16());
            return Err(SearchError::InvalidCredential);
        }

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<unreadable body: {}>", e));
            let body = truncate(&redact(&body, credential.expose()), PREVIEW_LIMIT);
            error!("Melo API returned HTTP {}: {}", status.as_u16(), body);
            return Err(SearchError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let payload: Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                map_transport_error(e)
            } else {
                error!("Failed to decode Melo API response: {}", e);
                SearchError::InvalidResponse(e.to_string())
            }
        })?;

        Self::log_response(status, &payload);

        Ok(payload)
    }
}

fn map_transport_error(e: reqwest::Error) -> SearchError {
    let err = if e.is_timeout() {
        SearchError::transport("Request timed out")
    } else if e.is_connect() {
        SearchError::transport("Connection failed")
    } else {
        SearchError::transport(e.to_string())
    };
    error!("{}", err);
    err
}
