//! Ollama provider configuration

use crate::constants::OLLAMA_DEFAULT_BASE_URL;
use crate::http::json_headers;
use crate::utils::join_url;
use parley_core::{ClientConfig, Error};
use reqwest::header::HeaderMap;
use std::collections::BTreeMap;

/// Configuration for the Ollama provider
///
/// Ollama runs locally and takes no credential.
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Base URL for the Ollama API
    pub base_url: String,
    /// Headers added to every request (e.g. for an authenticating proxy)
    pub extra_headers: BTreeMap<String, String>,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: OLLAMA_DEFAULT_BASE_URL.to_string(),
            extra_headers: BTreeMap::new(),
        }
    }
}

impl OllamaConfig {
    /// Derive the configuration from a client configuration
    pub fn from_client_config(config: &ClientConfig) -> Self {
        Self {
            base_url: config
                .base_url()
                .unwrap_or(OLLAMA_DEFAULT_BASE_URL)
                .to_string(),
            extra_headers: config.extra_headers().clone(),
        }
    }

    /// Set the base URL
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// URL of the chat endpoint
    pub fn chat_url(&self) -> String {
        join_url(&self.base_url, "api/chat")
    }

    /// Request headers
    pub fn headers(&self) -> Result<HeaderMap, Error> {
        json_headers(&self.extra_headers)
    }
}
