//! Function selection over a scripted backend
//!
//! Shows the selection phase in isolation: an enumerated constraint over
//! the catalog names, a backend that drifts past the name it picked, and
//! the canonical resolution back to a declared name.
//!
//! Run with: `cargo run --example choose_function`

use funcall_rs::{FunctionSpec, Generator, ScriptedBackend};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let functions = vec![
        FunctionSpec::new(
            "search",
            json!({
                "type": "object",
                "properties": {"query": {"type": "string"}},
                "required": ["query"]
            }),
        )
        .with_description("Search the local index"),
        FunctionSpec::new(
            "search_web",
            json!({
                "type": "object",
                "properties": {"query": {"type": "string"}},
                "required": ["query"]
            }),
        )
        .with_description("Search the web"),
    ];

    // The scripted backend stands in for a model; it would keep talking,
    // but completion is detected on the name and the chatter chunk is never
    // requested.
    let backend = ScriptedBackend::new(["search", " sounds like the right choice"]);
    let generator = Generator::new(functions, backend);

    let name = generator
        .choose_function("find the rust book in my files")
        .await?;
    tracing::info!(function = %name, "selection resolved");

    println!("Selected function: {name}");
    Ok(())
}
