//! Field-map codec over [`TypedValue`].
//!
//! A [`Document`] is a flat mapping of field names to typed values, the unit
//! of storage and retrieval. It exists only transiently per operation: built
//! from a caller payload or a wire response, then immediately encoded or
//! handed back as plain JSON.
//!
//! The one place where encoding depends on a field's *name* rather than its
//! value's shape is the timestamp rule in [`Document::from_json`]; see
//! [`is_timestamp_field`].

use std::collections::BTreeMap;

use serde_json::{Map, Value, json};

use super::value::TypedValue;

/// Field names carrying timestamps without an explicit type marker.
///
/// Caller payloads are plain JSON, which cannot distinguish a timestamp from
/// an ordinary string, so the schema convention is encoded here: a field
/// named `timestamp` or ending in `_at` holds a timestamp. This rule applies
/// only to caller-supplied payloads; internally injected timestamps use
/// [`TypedValue::Timestamp`] directly and never rely on name matching.
pub fn is_timestamp_field(name: &str) -> bool {
    name == "timestamp" || name.ends_with("_at")
}

/// A flat mapping of field names to typed values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    fields: BTreeMap<String, TypedValue>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a field.
    pub fn insert(&mut self, name: impl Into<String>, value: TypedValue) {
        self.fields.insert(name.into(), value);
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&TypedValue> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over field names, in sorted order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Build a document from a plain JSON object.
    ///
    /// Fields whose value has no wire counterpart (`null`) are dropped with
    /// a warning. Timestamp-named fields (see [`is_timestamp_field`]) holding
    /// a string become [`TypedValue::Timestamp`]; ones already wire-tagged as
    /// `{"timestampValue": ...}` are passed through unchanged. Any other
    /// shape under a timestamp-named field falls back to ordinary
    /// value-driven conversion.
    pub fn from_json(map: &Map<String, Value>) -> Self {
        let mut fields = BTreeMap::new();
        for (name, value) in map {
            match field_from_json(name, value) {
                Some(typed) => {
                    fields.insert(name.clone(), typed);
                }
                None => {
                    tracing::warn!(field = %name, "dropping unsupported field value during encode");
                }
            }
        }
        Self { fields }
    }

    /// Convert back to a plain JSON object.
    pub fn to_json(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect()
    }

    /// Encode as a wire document body: `{"fields": {name: tagged-value}}`.
    pub fn to_wire(&self) -> Value {
        let fields: Map<String, Value> = self
            .fields
            .iter()
            .map(|(name, value)| (name.clone(), value.to_wire()))
            .collect();
        json!({ "fields": fields })
    }

    /// Decode a wire document (an object with a `fields` key, as returned by
    /// the REST API). A missing or empty `fields` key yields an empty
    /// document. Fields with unrecognized tags are omitted, never an error,
    /// so a decoded document can be narrower than the wire one.
    pub fn from_wire(wire: &Value) -> Self {
        let Some(entries) = wire.get("fields").and_then(Value::as_object) else {
            return Self::new();
        };

        let mut fields = BTreeMap::new();
        for (name, value) in entries {
            match TypedValue::from_wire(value) {
                Some(typed) => {
                    fields.insert(name.clone(), typed);
                }
                None => {
                    tracing::debug!(field = %name, "omitting field with unrecognized wire tag");
                }
            }
        }
        Self { fields }
    }
}

fn field_from_json(name: &str, value: &Value) -> Option<TypedValue> {
    if is_timestamp_field(name) {
        if let Value::String(timestamp) = value {
            return Some(TypedValue::Timestamp(timestamp.clone()));
        }
        // Already wire-tagged timestamps pass through unchanged.
        if let Some(timestamp) = value.get("timestampValue").and_then(Value::as_str) {
            return Some(TypedValue::Timestamp(timestamp.to_string()));
        }
    }
    TypedValue::from_json(value)
}
