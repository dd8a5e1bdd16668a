//! Trajectory recording interface
//!
//! A recorder receives one [`TrajectoryEvent::Request`] and one
//! [`TrajectoryEvent::Response`] for every successful chat call, in that
//! order.

use crate::types::message::Message;
use crate::types::request::ModelParameters;
use crate::types::response::Response;
use crate::types::tool::ToolSet;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by trajectory recorders
#[derive(Debug, Error)]
pub enum TrajectoryError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend-specific error
    #[error("Recorder backend error: {0}")]
    Backend(String),
}

/// The outbound side of a call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestRecord {
    /// Provider name
    pub provider: String,
    /// Full message sequence sent to the provider
    pub messages: Vec<Message>,
    /// Tools offered, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolSet>,
    /// Model configuration
    pub parameters: ModelParameters,
    /// When the request was sent
    pub timestamp: DateTime<Utc>,
}

/// The inbound side of a call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseRecord {
    /// Provider name
    pub provider: String,
    /// Model that was called
    pub model: String,
    /// The parsed reply
    pub response: Response,
    /// When the reply was parsed
    pub timestamp: DateTime<Utc>,
}

/// One entry in a trajectory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TrajectoryEvent {
    /// A request was sent
    Request(RequestRecord),
    /// A response was received
    Response(ResponseRecord),
}

impl TrajectoryEvent {
    /// Provider name carried by the event
    pub fn provider(&self) -> &str {
        match self {
            Self::Request(r) => &r.provider,
            Self::Response(r) => &r.provider,
        }
    }

    /// When the event happened
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::Request(r) => r.timestamp,
            Self::Response(r) => r.timestamp,
        }
    }
}

/// Consumer of trajectory events
#[async_trait]
pub trait TrajectoryRecorder: Send + Sync {
    /// Record one event
    async fn record(&self, event: &TrajectoryEvent) -> Result<(), TrajectoryError>;
}
