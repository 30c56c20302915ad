//! Function call over a live OpenAI-compatible server
//!
//! Needs `OPENAI_API_KEY` (and optionally `OPENAI_API_BASE` /
//! `OPENAI_MODEL` for a self-hosted completions server such as vLLM or
//! llama.cpp).
//!
//! Run with: `cargo run --example openai_call`

use funcall_rs::{FunctionSpec, GenerateOptions, Generator, OpenAiBackend};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    if std::env::var("OPENAI_API_KEY").is_err() {
        tracing::warn!("OPENAI_API_KEY not set; the request below will fail");
    }

    let functions = vec![
        FunctionSpec::new(
            "get_weather",
            json!({
                "type": "object",
                "properties": {
                    "city": {"type": "string"},
                    "unit": {"enum": ["celsius", "fahrenheit"]}
                },
                "required": ["city"]
            }),
        )
        .with_description("Get the current weather in a city"),
        FunctionSpec::new(
            "get_forecast",
            json!({
                "type": "object",
                "properties": {
                    "city": {"type": "string"},
                    "days": {"type": "integer"}
                },
                "required": ["city", "days"]
            }),
        )
        .with_description("Get a multi-day forecast for a city"),
    ];

    let generator = Generator::new(functions, OpenAiBackend::from_env()?);

    match generator
        .generate(
            "What's the weather like in Paris right now, in celsius?",
            GenerateOptions::new()
                .with_max_new_steps(32)
                .with_max_total_length(256),
        )
        .await
    {
        Ok(call) => {
            tracing::info!(function = %call.name, "function call generated");
            println!("{}({})", call.name, call.parameters);
        }
        Err(e) => {
            tracing::warn!(error = %e, retryable = e.is_retryable(), "generation failed");
        }
    }

    Ok(())
}
