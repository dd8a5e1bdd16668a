//! Answering a tool call and letting the model finish its turn
//!
//! Usage: `OPENAI_API_KEY=... cargo run --example tool_calling`

use parley::prelude::*;
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

fn get_weather(call_id: &str, args: &Value) -> ToolResult {
    // Canned data stands in for a real weather service
    match args.get("city").and_then(Value::as_str) {
        Some(city) => ToolResult::success(
            call_id,
            json!({"city": city, "temperature_c": 22, "conditions": "partly cloudy"}).to_string(),
        ),
        None => ToolResult::error(call_id, "missing required argument 'city'"),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = ChatClient::from_config(ClientConfig::from_env(ProviderKind::OpenAI)?)?;
    let params = ModelParameters::builder("gpt-4o-mini")
        .parallel_tool_calls(true)
        .build();

    let tools = ToolSet::new([ToolDescriptor::from_parameters(
        "get_weather",
        "Get the current weather for a city",
        &[
            ToolParameter::new("city", "string", "City name, e.g. Paris").required(),
            ToolParameter::new("unit", "string", "Temperature unit").with_enum(["celsius", "fahrenheit"]),
        ],
    )?])?;
    if !client.supports_tool_calling(&params) {
        println!("Warning: {} may ignore tools", params.model);
    }

    let options = ChatOptions::default().with_tools(tools);
    let mut response = client
        .chat(
            vec![Message::user("What's the weather in Paris and in Tokyo?")],
            &params,
            options.clone(),
        )
        .await?;

    while response.has_tool_calls() {
        let mut results = Vec::with_capacity(response.tool_calls.len());
        for call in &response.tool_calls {
            println!("Calling {}({})", call.name, call.arguments);
            let result = match call.name.as_str() {
                "get_weather" => get_weather(&call.id, &call.arguments),
                other => ToolResult::error(&call.id, format!("unknown tool '{other}'")),
            };
            results.push(Message::from(result));
        }
        response = client.chat(results, &params, options.clone()).await?;
    }

    println!("{}", response.content);
    Ok(())
}
