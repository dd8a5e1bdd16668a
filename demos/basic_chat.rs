//! A short multi-turn conversation with any supported provider
//!
//! Usage: `PARLEY_PROVIDER=groq GROQ_API_KEY=... cargo run --example basic_chat`

use parley::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), parley::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let kind: ProviderKind = std::env::var("PARLEY_PROVIDER")
        .unwrap_or_else(|_| "openai".to_string())
        .parse()?;
    let model = std::env::var("PARLEY_MODEL").unwrap_or_else(|_| default_model(kind).to_string());

    let client = ChatClient::from_config(ClientConfig::from_env(kind)?)?;
    let params = ModelParameters::builder(model.as_str())
        .temperature(0.7)
        .max_tokens(256)
        .build();

    client
        .set_chat_history(vec![Message::system("You are a concise assistant.")])
        .await?;

    for question in ["What is the capital of France?", "And its population?"] {
        println!("> {question}");
        let response = client
            .chat(vec![Message::user(question)], &params, ChatOptions::default())
            .await?;
        println!("{}\n", response.content);

        if let Some(usage) = response.metadata.usage {
            println!(
                "Tokens used: {} (prompt: {}, completion: {})",
                usage.total_tokens, usage.prompt_tokens, usage.completion_tokens
            );
        }
    }

    println!("History holds {} messages", client.chat_history().await.len());
    Ok(())
}

fn default_model(kind: ProviderKind) -> &'static str {
    match kind {
        ProviderKind::OpenAI => "gpt-4o-mini",
        ProviderKind::Anthropic => "claude-3-5-haiku-latest",
        ProviderKind::Groq => "llama-3.3-70b-versatile",
        ProviderKind::OpenRouter => "openai/gpt-4o-mini",
        ProviderKind::Ollama => "llama3.1",
    }
}
