//! A recorded conversation written to a JSON-lines trajectory file

use async_trait::async_trait;
use parley::client::ChatClient;
use parley::recorders::FileRecorder;
use parley::*;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;

/// Echoes the last user message back
struct EchoProvider;

#[async_trait]
impl Provider for EchoProvider {
    fn name(&self) -> &str {
        "echo"
    }

    async fn request(&self, request: &ProviderRequest) -> Result<Response> {
        let last = request
            .messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.clone())
            .unwrap_or_default();
        Ok(Response::text(format!("echo: {last}")))
    }

    fn supports_tool_calling(&self, _model: &Model) -> bool {
        false
    }
}

#[tokio::test]
async fn test_conversation_is_written_as_jsonl() {
    let dir = TempDir::new().unwrap();
    let recorder = Arc::new(FileRecorder::new(dir.path().join("logs/session.jsonl")).unwrap());

    let client = ChatClient::new(Arc::new(EchoProvider));
    client.set_trajectory_recorder(Some(recorder.clone())).await;

    let params = ModelParameters::new("echo-1");
    for turn in ["first", "second"] {
        client
            .chat(vec![Message::user(turn)], &params, ChatOptions::default())
            .await
            .unwrap();
    }

    let text = std::fs::read_to_string(recorder.path()).unwrap();
    let lines: Vec<Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 4);

    let kinds: Vec<&str> = lines.iter().map(|l| l["event"].as_str().unwrap()).collect();
    assert_eq!(kinds, vec!["request", "response", "request", "response"]);
    assert_eq!(lines[2]["messages"].as_array().unwrap().len(), 3);
    assert_eq!(lines[3]["response"]["content"], json!("echo: second"));
    assert_eq!(lines[3]["model"], json!("echo-1"));

    let events = recorder.read_all().await.unwrap();
    assert_eq!(events.len(), 4);
    assert!(events.iter().all(|e| e.provider() == "echo"));
}

#[tokio::test]
async fn test_detached_recorder_stops_writing() {
    let dir = TempDir::new().unwrap();
    let recorder = Arc::new(FileRecorder::new(dir.path().join("t.jsonl")).unwrap());

    let client = ChatClient::new(Arc::new(EchoProvider));
    client.set_trajectory_recorder(Some(recorder.clone())).await;
    client
        .chat(vec![Message::user("kept")], &ModelParameters::new("echo-1"), ChatOptions::default())
        .await
        .unwrap();

    client.set_trajectory_recorder(None).await;
    client
        .chat(vec![Message::user("dropped")], &ModelParameters::new("echo-1"), ChatOptions::default())
        .await
        .unwrap();

    assert_eq!(recorder.read_all().await.unwrap().len(), 2);
    assert_eq!(client.chat_history().await.len(), 4);
}
