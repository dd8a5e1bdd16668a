//! Parley - a provider-agnostic LLM chat client
//!
//! One [`LlmClient`] contract in front of OpenAI, Anthropic, GROQ,
//! OpenRouter and Ollama. The client keeps the conversation history,
//! validates every turn before it leaves the process and can report each
//! exchange to a trajectory recorder.
//!
//! # Quick Start
//!
//! ```no_run
//! # use parley::prelude::*;
//! #
//! # #[tokio::main]
//! # async fn main() -> Result<(), parley::Error> {
//! #     #[cfg(feature = "client")]
//! #     {
//!     let config = ClientConfig::builder(ProviderKind::OpenAI)
//!         .api_key("your-api-key")
//!         .build()?;
//!     let client = ChatClient::from_config(config)?;
//!
//!     let params = ModelParameters::new("gpt-4o-mini");
//!     let response = client
//!         .chat(vec![Message::user("Hello, world!")], &params, ChatOptions::default())
//!         .await?;
//!     println!("{}", response.content);
//! #     }
//! #     Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Re-export core types
pub use parley_core::*;

#[cfg(feature = "providers")]
#[cfg_attr(docsrs, doc(cfg(feature = "providers")))]
pub mod providers {
    //! Provider adapters
    pub use parley_providers::*;
}

#[cfg(feature = "client")]
#[cfg_attr(docsrs, doc(cfg(feature = "client")))]
pub mod client {
    //! The stateful chat client
    pub use parley_client::*;
}

#[cfg(feature = "trajectory")]
#[cfg_attr(docsrs, doc(cfg(feature = "trajectory")))]
pub mod recorders {
    //! Reference trajectory recorders
    pub use parley_trajectory::*;
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use parley_core::{
        ChatOptions, ClientConfig, Error, LlmClient, Message, ModelParameters, ProviderKind,
        Response, Role, ToolCall, ToolDescriptor, ToolParameter, ToolResult, ToolSet,
    };

    #[cfg(feature = "client")]
    pub use parley_client::ChatClient;

    #[cfg(feature = "trajectory")]
    pub use parley_trajectory::{FileRecorder, MemoryRecorder};
}
