//! Core traits and types for the Parley LLM client library
//!
//! This crate defines the provider-agnostic vocabulary shared by the rest of
//! the workspace: canonical messages and responses, tool descriptors, the
//! [`LlmClient`] contract, the [`Provider`] adapter seam and the trajectory
//! recorder interface. It performs no I/O.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod error;
pub mod provider;
pub mod trajectory;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use client::LlmClient;
pub use config::{ClientConfig, ClientConfigBuilder, ProviderKind};
pub use error::{Error, ProviderErrorKind, Result};
pub use provider::Provider;
pub use trajectory::{
    RequestRecord, ResponseRecord, TrajectoryError, TrajectoryEvent, TrajectoryRecorder,
};
pub use types::{
    message::{Message, Metadata, Role},
    request::{ChatOptions, Model, ModelParameters, ModelParametersBuilder, ProviderRequest},
    response::{FinishReason, Response, ResponseMetadata, Usage},
    tool::{ToolCall, ToolDescriptor, ToolParameter, ToolResult, ToolSet},
    History,
};
