//! Parsed schema tree
//!
//! A `SchemaNode` is the validated, immutable form of a JSON Schema
//! document. All schema errors are caught here, at construction, so the
//! scanner never has to fail on a bad schema mid-candidate.

use serde_json::Value;

use crate::utils::error::{EngineError, Result};

/// One node of a parsed schema tree
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// No constraint; any JSON value is accepted
    Any,
    /// A JSON string, optionally bounded in character count
    String {
        min_length: Option<usize>,
        max_length: Option<usize>,
    },
    /// A JSON number; `integer` forbids fractions and exponents
    Number { integer: bool },
    /// The literals `true` and `false`
    Boolean,
    /// The literal `null`
    Null,
    /// A JSON object
    ///
    /// `properties: None` means freeform: any key, unconstrained values.
    /// `Some(..)` restricts keys to the declared names and types each
    /// value. `required` names must all appear before the object closes.
    Object {
        properties: Option<Vec<(String, SchemaNode)>>,
        required: Vec<String>,
    },
    /// A JSON array with a uniform item schema
    Array {
        items: Box<SchemaNode>,
        min_items: Option<usize>,
        max_items: Option<usize>,
    },
    /// A fixed set of allowed values, held in serialized JSON form
    Enum { literals: Vec<String> },
}

impl SchemaNode {
    /// Parse a JSON Schema document into a node tree
    ///
    /// Fails with [`EngineError::MalformedSchema`] on anything the dialect
    /// does not cover: non-object schemas, unknown `type` strings, empty or
    /// non-array `enum`, malformed bounds, or `required` names absent from
    /// declared `properties`.
    pub fn parse(schema: &Value) -> Result<Self> {
        let map = schema
            .as_object()
            .ok_or_else(|| EngineError::malformed_schema("schema must be a JSON object"))?;

        // enum wins over type when both are present
        if let Some(enum_values) = map.get("enum") {
            let members = enum_values.as_array().ok_or_else(|| {
                EngineError::malformed_schema("enum must be an array of values")
            })?;
            if members.is_empty() {
                return Err(EngineError::malformed_schema("enum must not be empty"));
            }
            let literals = members
                .iter()
                .map(serde_json::to_string)
                .collect::<std::result::Result<Vec<_>, _>>()?;
            return Ok(Self::Enum { literals });
        }

        let type_name = match map.get("type") {
            None => return Ok(Self::Any),
            Some(Value::String(name)) => name.as_str(),
            Some(other) => {
                return Err(EngineError::malformed_schema(format!(
                    "type must be a string, got {other}"
                )));
            }
        };

        match type_name {
            "string" => {
                let min_length = bound(map, "minLength")?;
                let max_length = bound(map, "maxLength")?;
                if let (Some(min), Some(max)) = (min_length, max_length) {
                    if min > max {
                        return Err(EngineError::malformed_schema(format!(
                            "minLength {min} exceeds maxLength {max}"
                        )));
                    }
                }
                Ok(Self::String {
                    min_length,
                    max_length,
                })
            }
            "integer" => Ok(Self::Number { integer: true }),
            "number" => Ok(Self::Number { integer: false }),
            "boolean" => Ok(Self::Boolean),
            "null" => Ok(Self::Null),
            "object" => {
                let properties = match map.get("properties") {
                    None => None,
                    Some(value) => {
                        let entries = value.as_object().ok_or_else(|| {
                            EngineError::malformed_schema("properties must be an object")
                        })?;
                        let mut parsed = Vec::with_capacity(entries.len());
                        for (name, sub) in entries {
                            parsed.push((name.clone(), Self::parse(sub)?));
                        }
                        Some(parsed)
                    }
                };

                let required = match map.get("required") {
                    None => Vec::new(),
                    Some(value) => {
                        let names = value.as_array().ok_or_else(|| {
                            EngineError::malformed_schema("required must be an array")
                        })?;
                        names
                            .iter()
                            .map(|name| {
                                name.as_str().map(str::to_owned).ok_or_else(|| {
                                    EngineError::malformed_schema(
                                        "required entries must be strings",
                                    )
                                })
                            })
                            .collect::<Result<Vec<_>>>()?
                    }
                };

                if let Some(declared) = &properties {
                    for name in &required {
                        if !declared.iter().any(|(key, _)| key == name) {
                            return Err(EngineError::malformed_schema(format!(
                                "required key {name:?} is not a declared property"
                            )));
                        }
                    }
                }

                Ok(Self::Object {
                    properties,
                    required,
                })
            }
            "array" => {
                let items = match map.get("items") {
                    None => Box::new(Self::Any),
                    Some(sub) => Box::new(Self::parse(sub)?),
                };
                let min_items = bound(map, "minItems")?;
                let max_items = bound(map, "maxItems")?;
                if let (Some(min), Some(max)) = (min_items, max_items) {
                    if min > max {
                        return Err(EngineError::malformed_schema(format!(
                            "minItems {min} exceeds maxItems {max}"
                        )));
                    }
                }
                Ok(Self::Array {
                    items,
                    min_items,
                    max_items,
                })
            }
            other => Err(EngineError::malformed_schema(format!(
                "unsupported type {other:?}"
            ))),
        }
    }
}

/// Read an optional non-negative integer bound from a schema object
fn bound(map: &serde_json::Map<String, Value>, key: &str) -> Result<Option<usize>> {
    match map.get(key) {
        None => Ok(None),
        Some(value) => {
            let n = value.as_u64().ok_or_else(|| {
                EngineError::malformed_schema(format!("{key} must be a non-negative integer"))
            })?;
            Ok(Some(n as usize))
        }
    }
}
