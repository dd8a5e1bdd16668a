//! Recording every exchange to a JSON-lines trajectory file
//!
//! Usage: `ANTHROPIC_API_KEY=... cargo run --example recorded_conversation -- trajectory.jsonl`

use parley::prelude::*;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "trajectory.jsonl".to_string());
    let recorder = Arc::new(FileRecorder::new(&path)?);

    let client = ChatClient::from_config(ClientConfig::from_env(ProviderKind::Anthropic)?)?;
    client.set_trajectory_recorder(Some(recorder.clone())).await;

    let params = ModelParameters::builder("claude-3-5-haiku-latest")
        .max_tokens(300)
        .build();
    let response = client
        .chat(
            vec![
                Message::system("Answer in one sentence."),
                Message::user("Why is the sky blue?"),
            ],
            &params,
            ChatOptions::default(),
        )
        .await?;
    println!("{}", response.content);

    let events = recorder.read_all().await?;
    println!("{} events written to {}", events.len(), recorder.path().display());
    Ok(())
}
