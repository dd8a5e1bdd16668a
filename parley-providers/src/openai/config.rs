//! OpenAI provider configuration

use crate::constants::{OPENAI_DEFAULT_API_VERSION, OPENAI_DEFAULT_BASE_URL};
use crate::http::{create_headers, insert_header};
use crate::utils::join_url;
use parley_core::{ClientConfig, Error};
use reqwest::header::HeaderMap;
use std::collections::BTreeMap;

/// Configuration for OpenAI-compatible providers
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key for authentication
    pub api_key: String,
    /// Base URL, without the version segment
    pub base_url: String,
    /// Version path segment (`v1`)
    pub api_version: String,
    /// Optional organization ID
    pub organization_id: Option<String>,
    /// Headers added to every request
    pub extra_headers: BTreeMap<String, String>,
}

impl OpenAIConfig {
    /// Create a new configuration with an API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: OPENAI_DEFAULT_BASE_URL.to_string(),
            api_version: OPENAI_DEFAULT_API_VERSION.to_string(),
            organization_id: None,
            extra_headers: BTreeMap::new(),
        }
    }

    /// Derive the configuration from a client configuration
    ///
    /// `default_base_url` applies when the client configuration has none.
    pub fn from_client_config(config: &ClientConfig, default_base_url: &str) -> Result<Self, Error> {
        let api_key = config
            .api_key()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                Error::configuration(format!("{} API key not provided", config.provider()))
            })?;

        let mut result = Self::new(api_key)
            .with_base_url(config.base_url().unwrap_or(default_base_url));
        if let Some(version) = config.api_version() {
            result = result.with_api_version(version);
        }
        if let Some(org) = config.organization() {
            result = result.with_organization(org);
        }
        result.extra_headers = config.extra_headers().clone();
        Ok(result)
    }

    /// Set a custom base URL
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the version path segment
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Set the organization ID
    pub fn with_organization(mut self, org: impl Into<String>) -> Self {
        self.organization_id = Some(org.into());
        self
    }

    /// Add a header sent with every request
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(name.into(), value.into());
        self
    }

    /// Get the URL for chat completions
    pub fn chat_url(&self) -> String {
        let versioned = join_url(&self.base_url, self.api_version.trim_matches('/'));
        join_url(&versioned, "chat/completions")
    }

    /// Request headers: bearer auth, organization and extra headers
    pub fn headers(&self) -> Result<HeaderMap, Error> {
        let mut headers = create_headers(&self.api_key, &self.extra_headers)?;
        if let Some(org) = &self.organization_id {
            insert_header(&mut headers, "OpenAI-Organization", org)?;
        }
        Ok(headers)
    }
}
