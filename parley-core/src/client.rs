//! The provider-agnostic client contract

use crate::error::Result;
use crate::trajectory::TrajectoryRecorder;
use crate::types::message::Message;
use crate::types::request::{ChatOptions, ModelParameters};
use crate::types::response::Response;
use async_trait::async_trait;
use std::sync::Arc;

/// A stateful chat client
///
/// Implementations own a conversation history and an optional trajectory
/// recorder. A failed call leaves both exactly as they were.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Name of the provider behind this client
    fn provider_name(&self) -> &str;

    /// Attach or detach a trajectory recorder
    async fn set_trajectory_recorder(&self, recorder: Option<Arc<dyn TrajectoryRecorder>>);

    /// Replace the stored history
    ///
    /// The sequence is validated first; on failure the stored history is
    /// kept and [`Error::InvalidHistory`](crate::Error::InvalidHistory) is
    /// returned.
    async fn set_chat_history(&self, messages: Vec<Message>) -> Result<()>;

    /// A snapshot of the stored history
    async fn chat_history(&self) -> Vec<Message>;

    /// Send new messages and get the model's reply
    ///
    /// With `options.reuse_history` the stored history is prepended to the
    /// request and, on success, extended with `messages` and the messages
    /// of the response. Without it the stored history is neither sent nor
    /// changed.
    async fn chat(
        &self,
        messages: Vec<Message>,
        parameters: &ModelParameters,
        options: ChatOptions,
    ) -> Result<Response>;

    /// Whether the configured model accepts tool definitions
    fn supports_tool_calling(&self, parameters: &ModelParameters) -> bool;
}
