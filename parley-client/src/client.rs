//! The stateful chat client

use async_trait::async_trait;
use chrono::Utc;
use parley_core::validation::{validate_chat_input, validate_message, validate_sequence};
use parley_core::{
    ChatOptions, ClientConfig, Error, LlmClient, Message, ModelParameters, Provider,
    ProviderRequest, RequestRecord, Response, ResponseRecord, TrajectoryEvent,
    TrajectoryRecorder,
};
use parley_providers::{HttpClient, ProviderBuilder};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, trace, warn};

/// Everything a chat call reads and mutates
#[derive(Default)]
struct ClientState {
    history: Vec<Message>,
    recorder: Option<Arc<dyn TrajectoryRecorder>>,
}

/// A provider-agnostic chat client that keeps the conversation history
///
/// All methods take `&self`. Calls on one instance are serialized: `chat`
/// holds the state lock from validation until the history is updated, so
/// a failed or dropped call leaves the state as it was.
///
/// # Example
///
/// ```no_run
/// use parley_client::prelude::*;
///
/// # async fn run() -> parley_core::Result<()> {
/// let config = ClientConfig::from_env(ProviderKind::Groq)?;
/// let client = ChatClient::from_config(config)?;
///
/// let params = ModelParameters::builder("llama-3.3-70b-versatile")
///     .max_tokens(512)
///     .build();
/// let response = client
///     .chat(vec![Message::user("hi")], &params, ChatOptions::default())
///     .await?;
/// println!("{}", response.content);
/// # Ok(())
/// # }
/// ```
pub struct ChatClient {
    provider: Arc<dyn Provider>,
    state: Mutex<ClientState>,
}

impl ChatClient {
    /// Wrap an already constructed provider adapter
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self {
            provider,
            state: Mutex::new(ClientState::default()),
        }
    }

    /// Build the adapter selected by `config.provider()` and wrap it
    pub fn from_config(config: ClientConfig) -> Result<Self, Error> {
        let provider = ProviderBuilder::new(config).build()?;
        info!(provider = provider.name(), "Chat client ready");
        Ok(Self::new(provider))
    }

    /// Like [`from_config`](Self::from_config), with a custom transport
    pub fn from_config_with_client(
        config: ClientConfig,
        client: Arc<dyn HttpClient>,
    ) -> Result<Self, Error> {
        let provider = ProviderBuilder::new(config).with_client(client).build()?;
        Ok(Self::new(provider))
    }

    /// The underlying provider adapter
    pub fn provider(&self) -> &Arc<dyn Provider> {
        &self.provider
    }

    async fn record(
        &self,
        recorder: &dyn TrajectoryRecorder,
        request: ProviderRequest,
        sent_at: chrono::DateTime<Utc>,
        response: &Response,
    ) {
        let provider = self.provider.name().to_string();
        let model = request.parameters.model.to_string();
        let events = [
            TrajectoryEvent::Request(RequestRecord {
                provider: provider.clone(),
                messages: request.messages,
                tools: request.tools,
                parameters: request.parameters,
                timestamp: sent_at,
            }),
            TrajectoryEvent::Response(ResponseRecord {
                provider,
                model,
                response: response.clone(),
                timestamp: Utc::now(),
            }),
        ];

        for event in &events {
            if let Err(e) = recorder.record(event).await {
                warn!(
                    provider = self.provider.name(),
                    error = %e,
                    "Trajectory recorder failed; continuing"
                );
            }
        }
    }
}

#[async_trait]
impl LlmClient for ChatClient {
    fn provider_name(&self) -> &str {
        self.provider.name()
    }

    async fn set_trajectory_recorder(&self, recorder: Option<Arc<dyn TrajectoryRecorder>>) {
        let mut state = self.state.lock().await;
        debug!(attached = recorder.is_some(), "Setting trajectory recorder");
        state.recorder = recorder;
    }

    async fn set_chat_history(&self, messages: Vec<Message>) -> Result<(), Error> {
        validate_sequence(&[], &messages)?;
        let mut state = self.state.lock().await;
        trace!(messages = messages.len(), "Replacing chat history");
        state.history = messages;
        Ok(())
    }

    async fn chat_history(&self) -> Vec<Message> {
        self.state.lock().await.history.clone()
    }

    async fn chat(
        &self,
        messages: Vec<Message>,
        parameters: &ModelParameters,
        options: ChatOptions,
    ) -> Result<Response, Error> {
        let mut state = self.state.lock().await;

        let prior: &[Message] = if options.reuse_history {
            &state.history
        } else {
            &[]
        };
        validate_chat_input(prior, &messages)?;

        if options.has_tools() && !self.provider.supports_tool_calling(&parameters.model) {
            warn!(
                provider = self.provider.name(),
                model = %parameters.model,
                "Model is not known to support tool calling; sending tools anyway"
            );
        }

        let mut outbound = Vec::with_capacity(prior.len() + messages.len());
        outbound.extend_from_slice(prior);
        outbound.extend(messages.iter().cloned());
        let request = ProviderRequest::new(outbound, options.tools, parameters.clone());

        debug!(
            provider = self.provider.name(),
            model = %parameters.model,
            outbound = request.messages.len(),
            reuse_history = options.reuse_history,
            "Sending chat request"
        );
        let sent_at = Utc::now();
        let response = match self.provider.request(&request).await {
            Ok(response) => response,
            Err(e) => {
                debug!(provider = self.provider.name(), error = %e, "Chat request failed");
                return Err(e);
            }
        };

        let reply = response.messages();
        for (index, message) in reply.iter().enumerate() {
            if let Err(e) = validate_message(index, message) {
                let reason = match e {
                    Error::InvalidHistory(reason) => reason,
                    other => other.to_string(),
                };
                debug!(provider = self.provider.name(), %reason, "Rejecting malformed reply");
                return Err(Error::response_parse(
                    self.provider.name(),
                    format!("reply is not a valid assistant turn: {reason}"),
                ));
            }
        }

        if let Some(recorder) = state.recorder.clone() {
            self.record(recorder.as_ref(), request, sent_at, &response)
                .await;
        }

        if options.reuse_history {
            state.history.extend(messages);
            state.history.extend(reply);
        }
        trace!(
            history = state.history.len(),
            complete = response.is_complete(),
            "Chat call finished"
        );

        Ok(response)
    }

    fn supports_tool_calling(&self, parameters: &ModelParameters) -> bool {
        self.provider.supports_tool_calling(&parameters.model)
    }
}
