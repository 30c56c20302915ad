//! Core functionality for the engine
//!
//! This module contains the constrained generation machinery and the
//! caller-facing generator built on top of it.

pub mod backends;
pub mod constrainer;
pub mod constraint;
pub mod generator;
pub mod prompt;
pub mod schema;
pub mod types;

// Re-export commonly used types
pub use backends::{GenerationBackend, OpenAiBackend, OpenAiConfig, ScriptedBackend};
pub use constrainer::Constrainer;
pub use constraint::{Constraint, EnumeratedValueConstraint, JsonSchemaConstraint};
pub use generator::Generator;
pub use prompt::{DefaultPrompter, TextPrompter};
pub use schema::SchemaNode;
