//! Executor result types

use serde_json::Value;

/// Result of executing one endpoint
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Decoded response body
    Value(Value),
    /// Whether the response status matched the expected one
    Status(bool),
}

impl Outcome {
    /// Status comparison, when one was requested
    pub fn as_status(&self) -> Option<bool> {
        match self {
            Outcome::Status(matched) => Some(*matched),
            Outcome::Value(_) => None,
        }
    }

    /// Decoded body, when the endpoint did not request a status comparison
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Outcome::Value(value) => Some(value),
            Outcome::Status(_) => None,
        }
    }

    /// Collapse into a JSON value; a status comparison becomes a boolean
    pub fn into_value(self) -> Value {
        match self {
            Outcome::Value(value) => value,
            Outcome::Status(matched) => Value::Bool(matched),
        }
    }
}

/// Decode a response body: JSON when it parses, the raw text otherwise,
/// `null` when empty
pub(crate) fn decode_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
