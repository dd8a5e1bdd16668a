//! Core types used throughout the Parley library

pub mod message;
pub mod request;
pub mod response;
pub mod tool;

/// A conversation history, oldest message first
pub type History = Vec<crate::types::message::Message>;
