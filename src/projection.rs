//! Result shaping
//!
//! Three optional projections applied, in order, to the payload produced
//! by the executor or the page aggregator:
//!
//! 1. `key` descends into a dotted path (`"stats.plays"`)
//! 2. `only` keeps an allow-list of top-level keys
//! 3. `get` extracts one field or array index as the final value
//!
//! Missing paths resolve to `null` rather than an error.

use serde_json::{Map, Value};

/// Projection options carried by an endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    /// Dotted path to descend into
    pub key: Option<String>,
    /// Top-level keys to keep
    pub only: Option<Vec<String>>,
    /// Single field or index to extract
    pub get: Option<String>,
}

impl Projection {
    /// Whether no projection was requested
    pub fn is_identity(&self) -> bool {
        self.key.is_none() && self.only.is_none() && self.get.is_none()
    }

    /// Apply `key`, then `only`, then `get`
    pub fn apply(&self, value: Value) -> Value {
        let value = match &self.key {
            Some(path) => lookup(&value, path).cloned().unwrap_or(Value::Null),
            None => value,
        };

        let value = match &self.only {
            Some(keys) => only(value, keys),
            None => value,
        };

        match &self.get {
            Some(segment) => lookup(&value, segment).cloned().unwrap_or(Value::Null),
            None => value,
        }
    }
}

/// Resolve a dotted path through objects and arrays
///
/// Numeric segments index into arrays; `"pictures.sizes.0.link"` works.
/// A leading `$.` is accepted and ignored. An empty path returns the input.
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    if path.is_empty() {
        return Some(value);
    }

    let mut current = value;
    for part in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(part)?,
            Value::Array(items) => items.get(part.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Keep the listed keys of an object; other values pass through
fn only(value: Value, keys: &[String]) -> Value {
    match value {
        Value::Object(map) => {
            let filtered: Map<String, Value> = map
                .into_iter()
                .filter(|(key, _)| keys.iter().any(|k| k == key))
                .collect();
            Value::Object(filtered)
        }
        other => other,
    }
}
