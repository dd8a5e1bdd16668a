//! Behavioral tests for the chat client contract, driven through a stub provider

use async_trait::async_trait;
use parley::client::ChatClient;
use parley::recorders::MemoryRecorder;
use parley::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Answers from a queue and keeps every request it received
struct StubProvider {
    replies: Mutex<VecDeque<Result<Response>>>,
    seen: Mutex<Vec<ProviderRequest>>,
}

impl StubProvider {
    fn new(replies: Vec<Result<Response>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn seen(&self) -> Vec<ProviderRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    async fn request(&self, request: &ProviderRequest) -> Result<Response> {
        self.seen.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::api("stub", "out of replies")))
    }

    fn supports_tool_calling(&self, _model: &Model) -> bool {
        true
    }
}

fn weather_tools() -> ToolSet {
    ToolSet::new([ToolDescriptor::from_parameters(
        "get_weather",
        "Current weather for a city",
        &[ToolParameter::new("city", "string", "City name").required()],
    )
    .unwrap()])
    .unwrap()
}

fn params() -> ModelParameters {
    ModelParameters::builder("stub-model").max_tokens(256).build()
}

#[tokio::test]
async fn test_hello_exchange_records_trajectory() {
    let provider = StubProvider::new(vec![Ok(Response::text("hello"))]);
    let client = ChatClient::new(provider.clone());
    let recorder = MemoryRecorder::new();
    client
        .set_trajectory_recorder(Some(Arc::new(recorder.clone())))
        .await;

    let response = client
        .chat(vec![Message::user("hi")], &params(), ChatOptions::default())
        .await
        .unwrap();

    assert_eq!(response.content, "hello");
    assert!(response.is_complete());
    assert_eq!(
        client.chat_history().await,
        vec![Message::user("hi"), Message::assistant("hello")]
    );

    let events = recorder.events().await;
    assert_eq!(events.len(), 2);
    match (&events[0], &events[1]) {
        (TrajectoryEvent::Request(req), TrajectoryEvent::Response(resp)) => {
            assert_eq!(req.provider, "stub");
            assert_eq!(req.messages, vec![Message::user("hi")]);
            assert_eq!(resp.model, "stub-model");
            assert_eq!(resp.response.content, "hello");
            assert!(req.timestamp <= resp.timestamp);
        }
        other => panic!("Unexpected event order: {other:?}"),
    }
}

#[tokio::test]
async fn test_full_tool_round_trip() {
    let call = ToolCall::new("call_w", "get_weather", json!({"city": "Lisbon"}));
    let provider = StubProvider::new(vec![
        Ok(Response::with_tool_calls("", vec![call.clone()])),
        Ok(Response::text("It is 21C in Lisbon.")),
    ]);
    let client = ChatClient::new(provider.clone());
    let options = ChatOptions::default().with_tools(weather_tools());

    let first = client
        .chat(
            vec![Message::system("Answer briefly."), Message::user("Weather in Lisbon?")],
            &params(),
            options.clone(),
        )
        .await
        .unwrap();
    assert_eq!(first.tool_calls, vec![call]);

    let result = ToolResult::success("call_w", "21C, clear");
    let second = client
        .chat(vec![result.into()], &params(), options)
        .await
        .unwrap();
    assert_eq!(second.content, "It is 21C in Lisbon.");

    let sent = provider.seen();
    assert_eq!(sent[1].messages.len(), 4);
    assert_eq!(sent[1].messages[3].tool_call_id(), Some("call_w"));
    assert_eq!(sent[1].tools.as_ref().map(ToolSet::len), Some(1));

    let roles: Vec<Role> = client.chat_history().await.iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![Role::System, Role::User, Role::Assistant, Role::Tool, Role::Assistant]
    );
}

#[tokio::test]
async fn test_history_only_changes_on_success() {
    let provider = StubProvider::new(vec![
        Ok(Response::text("first")),
        Err(Error::from_status("stub", 503, "overloaded", None)),
    ]);
    let client = ChatClient::new(provider.clone());

    client
        .chat(vec![Message::user("one")], &params(), ChatOptions::default())
        .await
        .unwrap();
    let before = client.chat_history().await;

    let error = client
        .chat(vec![Message::user("two")], &params(), ChatOptions::default())
        .await
        .unwrap_err();
    assert!(error.is_retryable());
    assert_eq!(client.chat_history().await, before);
}

#[tokio::test]
async fn test_invalid_input_never_reaches_provider() {
    let provider = StubProvider::new(vec![]);
    let client = ChatClient::new(provider.clone());

    let cases = vec![
        Vec::new(),
        vec![Message::user("")],
        vec![Message::tool("orphan", "nope")],
        vec![Message::assistant_with_tool_calls(
            "",
            vec![
                ToolCall::new("dup", "get_weather", json!({})),
                ToolCall::new("dup", "get_weather", json!({})),
            ],
        )],
    ];
    for messages in cases {
        let error = client
            .chat(messages, &params(), ChatOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(error, Error::InvalidHistory(_)), "{error}");
    }
    assert!(provider.seen().is_empty());
    assert!(client.chat_history().await.is_empty());
}

#[tokio::test]
async fn test_set_history_replaces_and_validates() {
    let provider = StubProvider::new(vec![Ok(Response::text("ok"))]);
    let client = ChatClient::new(provider.clone());

    client
        .set_chat_history(vec![Message::system("You are terse."), Message::user("ping")])
        .await
        .unwrap();
    client
        .set_chat_history(vec![Message::system("You are verbose.")])
        .await
        .unwrap();
    assert_eq!(
        client.chat_history().await,
        vec![Message::system("You are verbose.")]
    );

    let rejected = client
        .set_chat_history(vec![Message::tool("x", "missing")])
        .await;
    assert!(matches!(rejected, Err(Error::InvalidHistory(_))));
    assert_eq!(client.chat_history().await.len(), 1);

    client
        .chat(vec![Message::user("hello")], &params(), ChatOptions::default())
        .await
        .unwrap();
    assert_eq!(provider.seen()[0].messages[0], Message::system("You are verbose."));
}

#[tokio::test]
async fn test_clients_do_not_share_state() {
    let a = ChatClient::new(StubProvider::new(vec![Ok(Response::text("from a"))]));
    let b = ChatClient::new(StubProvider::new(vec![]));

    a.chat(vec![Message::user("hi")], &params(), ChatOptions::default())
        .await
        .unwrap();
    assert_eq!(a.chat_history().await.len(), 2);
    assert!(b.chat_history().await.is_empty());
}

#[tokio::test]
async fn test_concurrent_calls_are_serialized() {
    let provider = StubProvider::new(vec![Ok(Response::text("r1")), Ok(Response::text("r2"))]);
    let client = Arc::new(ChatClient::new(provider.clone()));

    let c1 = client.clone();
    let c2 = client.clone();
    let (r1, r2) = tokio::join!(
        async move {
            c1.chat(vec![Message::user("q1")], &params(), ChatOptions::default())
                .await
        },
        async move {
            c2.chat(vec![Message::user("q2")], &params(), ChatOptions::default())
                .await
        },
    );
    r1.unwrap();
    r2.unwrap();

    let history = client.chat_history().await;
    assert_eq!(history.len(), 4);
    // Each user turn is directly followed by its own reply
    assert_eq!(history[0].role, Role::User);
    assert_eq!(history[1].role, Role::Assistant);
    assert_eq!(history[2].role, Role::User);
    assert_eq!(history[3].role, Role::Assistant);

    let sent = provider.seen();
    assert_eq!(sent[0].messages.len(), 1);
    assert_eq!(sent[1].messages.len(), 3);
}
