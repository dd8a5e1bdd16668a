//! Performance benchmarks for the chat client and request conversion

use async_trait::async_trait;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use parley::client::ChatClient;
use parley::providers::openai::OpenAIConverter;
use parley::providers::RequestConverter;
use parley::validation::validate_sequence;
use parley::*;
use serde_json::json;
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Mock provider for benchmarking
struct MockProvider;

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn request(&self, _request: &ProviderRequest) -> Result<Response> {
        Ok(Response::text("Mock response"))
    }

    fn supports_tool_calling(&self, _model: &Model) -> bool {
        true
    }
}

/// A conversation of `turns` user/assistant pairs with one tool exchange each
fn conversation(turns: usize) -> Vec<Message> {
    let mut messages = vec![Message::system("You are a helpful assistant.")];
    for i in 0..turns {
        let id = format!("call_{i}");
        messages.push(Message::user(format!("Question {i}")));
        messages.push(Message::assistant_with_tool_calls(
            "",
            vec![ToolCall::new(&id, "lookup", json!({"n": i}))],
        ));
        messages.push(Message::tool(format!("result {i}"), &id));
        messages.push(Message::assistant(format!("Answer {i}")));
    }
    messages
}

fn benchmark_client_chat(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let params = ModelParameters::new("mock-model");
    let mut group = c.benchmark_group("client_chat");

    for turns in [0, 10, 100] {
        let client = ChatClient::new(Arc::new(MockProvider));
        rt.block_on(client.set_chat_history(conversation(turns))).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(turns), &turns, |b, _| {
            b.iter(|| {
                rt.block_on(async {
                    let response = client
                        .chat(
                            vec![Message::user("Hello")],
                            &params,
                            ChatOptions::default().reuse_history(false),
                        )
                        .await
                        .unwrap();
                    black_box(response)
                })
            });
        });
    }
    group.finish();
}

fn benchmark_validation(c: &mut Criterion) {
    let messages = conversation(250);
    c.bench_function("validate_1000_messages", |b| {
        b.iter(|| validate_sequence(&[], black_box(&messages)).unwrap());
    });
}

fn benchmark_openai_conversion(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let request = ProviderRequest::new(conversation(50), None, ModelParameters::new("gpt-4o"));
    let converter = OpenAIConverter;

    c.bench_function("openai_convert_request", |b| {
        b.iter(|| rt.block_on(converter.convert_request(black_box(&request))).unwrap());
    });
}

criterion_group!(
    benches,
    benchmark_client_chat,
    benchmark_validation,
    benchmark_openai_conversion
);
criterion_main!(benches);
