//! # funcall-rs
//!
//! Constrained function calling for text-generation backends. Drives any
//! incremental, prefix-extending text source to emit output that conforms
//! to a target grammar: one of an enumerated set of function names, or JSON
//! matching a function's parameter schema.
//!
//! ## Features
//!
//! - **Streaming acceptance oracles**: enumerated-value and JSON-Schema
//!   constraints that judge partial candidates, not just finished output
//! - **Early abort**: every extension chunk is checked the moment it lands,
//!   so a doomed candidate costs one bad chunk rather than a full sequence
//! - **Backend agnostic**: the text source is an injected capability; an
//!   OpenAI-compatible client and a deterministic scripted backend ship in
//!   the crate
//! - **Budgeted generation**: independent per-step caps on candidate length
//!   and extension count, with usable partial output on exhaustion
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use funcall_rs::{FunctionSpec, GenerateOptions, Generator, OpenAiBackend};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let functions = vec![FunctionSpec::new(
//!         "get_weather",
//!         json!({
//!             "type": "object",
//!             "properties": {"city": {"type": "string"}},
//!             "required": ["city"]
//!         }),
//!     )
//!     .with_description("Get the current weather")];
//!
//!     let generator = Generator::new(functions, OpenAiBackend::from_env()?);
//!     let call = generator
//!         .generate("What's the weather in Paris?", GenerateOptions::new())
//!         .await?;
//!
//!     println!("{}({})", call.name, call.parameters);
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

// Public module exports
pub mod core;
pub mod utils;

// Re-export main types
pub use utils::error::{EngineError, Result};

// Export the generation engine
pub use core::backends::{GenerationBackend, OpenAiBackend, OpenAiConfig, ScriptedBackend};
pub use core::constrainer::Constrainer;
pub use core::constraint::{Constraint, EnumeratedValueConstraint, JsonSchemaConstraint};
pub use core::generator::Generator;
pub use core::prompt::{DefaultPrompter, TextPrompter};
pub use core::schema::SchemaNode;

// Export the data model
pub use core::types::{
    FunctionCall, FunctionSpec, GenerateOptions, Generated, GenerationBudget, StopReason,
    Validation,
};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
