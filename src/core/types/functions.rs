//! Callable function types
//!
//! The declared function catalog and the resolved call record.

use serde::{Deserialize, Serialize};

use crate::utils::error::Result;

/// A callable function declaration
///
/// Immutable for the duration of one generation request. Names are expected
/// to be unique within a catalog; lookups take the first match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionSpec {
    /// Function name
    pub name: String,
    /// Function description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Parameter JSON Schema
    pub parameters: serde_json::Value,
}

impl FunctionSpec {
    /// Create a new function declaration
    pub fn new(name: impl Into<String>, parameters: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            description: None,
            parameters,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A resolved function call
///
/// `parameters` holds raw JSON text as generated. On a completed run it is a
/// self-contained schema-valid value; on an exhausted run it may be a
/// partial prefix the caller can inspect or discard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Function name
    pub name: String,
    /// Argument JSON text
    pub parameters: String,
}

impl FunctionCall {
    /// Create a new call record
    pub fn new(name: impl Into<String>, parameters: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: parameters.into(),
        }
    }

    /// Parse the argument text into a JSON value
    ///
    /// Fails when the text is a partial prefix from an exhausted budget.
    pub fn parsed_parameters(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.parameters)?)
    }
}
