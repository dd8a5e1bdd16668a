//! Core provider trait for LLM interactions

use crate::error::Result;
use crate::types::request::{Model, ProviderRequest};
use crate::types::response::Response;
use async_trait::async_trait;

/// A provider adapter
///
/// An adapter translates the canonical [`ProviderRequest`] into one
/// backend's wire format, dispatches it and translates the reply back into
/// a [`Response`]. Adapters are stateless; conversation state lives in the
/// client that drives them.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Lowercase provider name, used in errors and trajectory records
    fn name(&self) -> &str;

    /// Send a request and get a complete response
    async fn request(&self, request: &ProviderRequest) -> Result<Response>;

    /// Whether the model accepts tool definitions
    ///
    /// A pure lookup against the adapter's capability table.
    fn supports_tool_calling(&self, model: &Model) -> bool;
}
