//! Full function call over a scripted backend
//!
//! The weather walkthrough: a single-function catalog short-circuits
//! selection, the argument phase grows JSON chunk by chunk under the
//! parameter schema, and trailing chatter past the closing brace is
//! trimmed away.
//!
//! Run with: `cargo run --example weather_call`

use funcall_rs::{FunctionSpec, GenerateOptions, Generator, ScriptedBackend};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let functions = vec![
        FunctionSpec::new(
            "get_weather",
            json!({
                "type": "object",
                "properties": {"city": {"type": "string"}},
                "required": ["city"]
            }),
        )
        .with_description("Get the current weather in a city"),
    ];

    let backend = ScriptedBackend::new([
        r#"{"city":"#,
        r#""Paris"} Let me know if you need anything else!"#,
    ]);
    let generator = Generator::new(functions, backend);

    let call = generator
        .generate(
            "What's the weather in Paris?",
            GenerateOptions::new().with_max_new_steps(8),
        )
        .await?;

    tracing::info!(
        function = %call.name,
        parameters = %call.parameters,
        "function call generated"
    );

    println!("{}({})", call.name, call.parameters);
    println!("parsed: {}", call.parsed_parameters()?);
    Ok(())
}
