//! # Manifest Field Access
//!
//! A [`Manifest`] wraps the parsed JSON document of one agent descriptor.
//! Content rules read fields through shape-checked accessors: a field that
//! exists but has the wrong JSON type is reported as absent rather than
//! propagated as a fault, so content validation always runs to completion
//! even when a malformed value slips past the schema.

use serde_json::{Map, Value};

/// Fixed file name of a manifest inside an agent directory.
pub const MANIFEST_FILE_NAME: &str = "agent.json";

/// A parsed agent manifest.
///
/// The root is usually an object. Any other root is accepted and behaves as
/// an empty mapping for field access.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    value: Value,
}

impl Manifest {
    /// Wrap a parsed document.
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    /// The underlying document.
    pub fn as_value(&self) -> &Value {
        &self.value
    }

    /// The top-level fields, if the root is an object.
    pub fn fields(&self) -> Option<&Map<String, Value>> {
        self.value.as_object()
    }

    /// Raw value of a top-level field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields().and_then(|m| m.get(field))
    }

    /// A top-level text field. `None` when missing or not a string.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    /// A top-level object field. `None` when missing or not an object.
    pub fn object(&self, field: &str) -> Option<&Map<String, Value>> {
        self.get(field).and_then(Value::as_object)
    }

    /// A top-level array field. `None` when missing or not an array.
    pub fn array(&self, field: &str) -> Option<&Vec<Value>> {
        self.get(field).and_then(Value::as_array)
    }
}

impl From<Value> for Manifest {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

/// Number of significant characters in `s`: Unicode scalar values after
/// trimming leading and trailing whitespace.
pub fn significant_len(s: &str) -> usize {
    s.trim().chars().count()
}

/// Whether `s` is empty after trimming whitespace.
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
