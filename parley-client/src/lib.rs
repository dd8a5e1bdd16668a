//! Stateful chat client for LLM interactions
//!
//! [`ChatClient`] is the implementation of the [`LlmClient`] contract. It
//! owns the conversation history and the optional trajectory recorder, and
//! drives any [`Provider`](parley_core::Provider) adapter.

mod client;

pub use client::ChatClient;
pub use parley_core::LlmClient;

/// Prelude module for convenient imports
pub mod prelude {
    pub use super::ChatClient;
    pub use parley_core::{
        ChatOptions, ClientConfig, LlmClient, Message, ModelParameters, ProviderKind, Response,
        Role, ToolDescriptor, ToolSet,
    };
}
