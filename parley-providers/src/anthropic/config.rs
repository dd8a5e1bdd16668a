//! Anthropic provider configuration

use crate::constants::{ANTHROPIC_DEFAULT_API_VERSION, ANTHROPIC_DEFAULT_BASE_URL};
use crate::http::{insert_header, json_headers};
use crate::utils::join_url;
use parley_core::{ClientConfig, Error};
use reqwest::header::HeaderMap;
use std::collections::BTreeMap;

/// Configuration for the Anthropic provider
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    /// API key for authentication
    pub api_key: String,
    /// Base URL for the Anthropic API
    pub base_url: String,
    /// Value of the `anthropic-version` header
    pub api_version: String,
    /// Headers added to every request
    pub extra_headers: BTreeMap<String, String>,
}

impl AnthropicConfig {
    /// Create a new configuration with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: ANTHROPIC_DEFAULT_BASE_URL.to_string(),
            api_version: ANTHROPIC_DEFAULT_API_VERSION.to_string(),
            extra_headers: BTreeMap::new(),
        }
    }

    /// Derive the configuration from a client configuration
    pub fn from_client_config(config: &ClientConfig) -> Result<Self, Error> {
        let api_key = config
            .api_key()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::configuration("anthropic API key not provided"))?;

        let mut result = Self::new(api_key);
        if let Some(url) = config.base_url() {
            result = result.with_base_url(url);
        }
        if let Some(version) = config.api_version() {
            result = result.with_api_version(version);
        }
        result.extra_headers = config.extra_headers().clone();
        Ok(result)
    }

    /// Set the base URL
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the API version
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// URL of the messages endpoint
    pub fn messages_url(&self) -> String {
        join_url(&self.base_url, "v1/messages")
    }

    /// Request headers: `x-api-key`, `anthropic-version` and extra headers
    pub fn headers(&self) -> Result<HeaderMap, Error> {
        let mut headers = json_headers(&self.extra_headers)?;
        insert_header(&mut headers, "x-api-key", &self.api_key)?;
        insert_header(&mut headers, "anthropic-version", &self.api_version)?;
        Ok(headers)
    }
}
