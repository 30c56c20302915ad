//! Test fixtures and data factories
//!
//! Provides factory methods for creating test catalogs and backend scripts
//! with sensible defaults. All factories create real objects, not mocks.

use funcall_rs::{FunctionSpec, ScriptedBackend};
use serde_json::json;

/// Factory for function catalogs with known schemas
pub struct CatalogFactory;

impl CatalogFactory {
    /// A single weather function requiring a string `city`
    pub fn weather() -> Vec<FunctionSpec> {
        vec![
            FunctionSpec::new(
                "get_weather",
                json!({
                    "type": "object",
                    "properties": {"city": {"type": "string"}},
                    "required": ["city"]
                }),
            )
            .with_description("Get the current weather"),
        ]
    }

    /// Two names sharing a proper prefix, in declaration order
    pub fn search_pair() -> Vec<FunctionSpec> {
        vec![
            FunctionSpec::new(
                "search",
                json!({
                    "type": "object",
                    "properties": {"query": {"type": "string"}},
                    "required": ["query"]
                }),
            ),
            FunctionSpec::new(
                "search_web",
                json!({
                    "type": "object",
                    "properties": {"query": {"type": "string"}, "site": {"type": "string"}},
                    "required": ["query"]
                }),
            ),
        ]
    }

    /// A catalog whose argument schema mixes nesting, arrays, and an enum
    pub fn travel() -> Vec<FunctionSpec> {
        vec![
            FunctionSpec::new(
                "book_trip",
                json!({
                    "type": "object",
                    "properties": {
                        "destination": {"type": "string"},
                        "travelers": {"type": "integer"},
                        "class": {"enum": ["economy", "business", "first"]},
                        "stops": {
                            "type": "array",
                            "items": {"type": "string"}
                        }
                    },
                    "required": ["destination", "travelers"]
                }),
            )
            .with_description("Book a trip"),
        ]
    }
}

/// Factory for scripted generation backends
pub struct ScriptFactory;

impl ScriptFactory {
    /// Emits the weather arguments in two chunks, with trailing noise
    pub fn weather_arguments() -> ScriptedBackend {
        ScriptedBackend::new([r#"{"city":"#, r#""Paris"} I hope that helps!"#])
    }

    /// Emits text one character per extension call
    pub fn char_by_char(text: &str) -> ScriptedBackend {
        ScriptedBackend::new(text.chars().map(|c| c.to_string()))
    }
}
