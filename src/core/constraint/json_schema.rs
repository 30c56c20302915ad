//! Conformance to a JSON Schema

use serde_json::Value;

use crate::core::constraint::Constraint;
use crate::core::schema::{scan, SchemaNode};
use crate::core::types::Validation;
use crate::utils::error::Result;

/// Accepts JSON text that satisfies a schema
///
/// The schema document is parsed once at construction; a bad document fails
/// here rather than during generation. Checking runs the incremental
/// scanner, so unterminated strings and open objects are valid prefixes
/// while type mismatches reject at the first byte that determines them.
#[derive(Debug, Clone)]
pub struct JsonSchemaConstraint {
    root: SchemaNode,
}

impl JsonSchemaConstraint {
    /// Parse a schema document into a constraint
    pub fn new(schema: &Value) -> Result<Self> {
        Ok(Self {
            root: SchemaNode::parse(schema)?,
        })
    }

    /// Build from an already-parsed schema tree
    pub fn from_node(root: SchemaNode) -> Self {
        Self { root }
    }
}

impl Constraint for JsonSchemaConstraint {
    fn check(&self, candidate: &str) -> Validation {
        scan(&self.root, candidate)
    }
}
