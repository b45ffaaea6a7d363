//! Canonical JSON documents

use serde_json::{Map, Value};

use crate::Result;

/// A schema document in canonical form.
///
/// Canonicalization sorts every object's keys recursively; arrays keep
/// their order (element order is meaningful in schemas). Equality is
/// structural equality of the canonical value, never a byte or hash
/// comparison of arbitrary serializations.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    value: Value,
}

impl Document {
    /// Canonicalize a raw JSON value.
    pub fn new(value: Value) -> Self {
        Self {
            value: sort_value(&value),
        }
    }

    /// Parse a document from JSON text and canonicalize it.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid JSON.
    pub fn from_text(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::new(value))
    }

    /// The canonical value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The canonical serialization: pretty-printed, sorted keys,
    /// trailing newline. Identical documents always produce identical
    /// bytes.
    pub fn canonical_text(&self) -> String {
        let mut text = serde_json::to_string_pretty(&self.value).unwrap_or_default();
        text.push('\n');
        text
    }
}

/// Recursively sort object keys.
fn sort_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut sorted = Map::new();
            let mut keys: Vec<_> = map.keys().collect();
            keys.sort();
            for key in keys {
                if let Some(v) = map.get(key) {
                    sorted.insert(key.clone(), sort_value(v));
                }
            }
            Value::Object(sorted)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(sort_value).collect()),
        other => other.clone(),
    }
}
