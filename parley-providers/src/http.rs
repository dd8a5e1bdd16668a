//! HTTP client abstraction and utilities

use crate::error;
use parley_core::Error;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, trace};

/// HTTP transport used by the adapters
///
/// Failures are already classified into the core error taxonomy, tagged
/// with the `provider` name.
#[async_trait::async_trait]
pub trait HttpClient: Send + Sync {
    /// POST a JSON body and decode the JSON reply
    async fn post(
        &self,
        provider: &str,
        url: &str,
        headers: HeaderMap,
        body: Value,
    ) -> Result<Value, Error>;
}

/// Default HTTP client implementation using reqwest
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Create a new HTTP client with a request timeout
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl HttpClient for ReqwestClient {
    async fn post(
        &self,
        provider: &str,
        url: &str,
        headers: HeaderMap,
        body: Value,
    ) -> Result<Value, Error> {
        debug!(provider, url, "Sending request");
        trace!(provider, body = %body, "Request body");

        let response = self
            .client
            .post(url)
            .headers(headers)
            .json(&body)
            .send()
            .await
            .map_err(|e| error::network_error(provider, e))?;

        let status = response.status();
        let response_headers = response.headers().clone();
        let text = response
            .text()
            .await
            .map_err(|e| error::network_error(provider, e))?;

        if !status.is_success() {
            debug!(provider, status = status.as_u16(), "Provider returned error status");
            return Err(error::status_error(provider, status, &response_headers, &text));
        }

        serde_json::from_str(&text).map_err(|e| error::parse_error(provider, e))
    }
}

/// Headers for bearer-token APIs
pub fn create_headers(api_key: &str, extra: &BTreeMap<String, String>) -> Result<HeaderMap, Error> {
    let mut headers = json_headers(extra)?;
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| Error::configuration(format!("Invalid API key: {e}")))?,
    );
    Ok(headers)
}

/// Content-type header plus the configured extra headers
pub fn json_headers(extra: &BTreeMap<String, String>) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    for (name, value) in extra {
        insert_header(&mut headers, name, value)?;
    }
    Ok(headers)
}

/// Insert one header, validating name and value
pub fn insert_header(headers: &mut HeaderMap, name: &str, value: &str) -> Result<(), Error> {
    let name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| Error::configuration(format!("Invalid header name '{name}': {e}")))?;
    let value = HeaderValue::from_str(value)
        .map_err(|e| Error::configuration(format!("Invalid value for header '{name}': {e}")))?;
    headers.insert(name, value);
    Ok(())
}
