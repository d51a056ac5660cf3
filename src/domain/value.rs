//! Typed values and their Firestore wire representation.
//!
//! A [`TypedValue`] is one constructor per value kind the store supports.
//! Conversions come in two pairs:
//!
//! - `from_json` / `to_json`: the plain, untagged JSON callers work with;
//! - `from_wire` / `to_wire`: the tagged wire format the REST API speaks
//!   (`{"stringValue": ...}`, `{"integerValue": "42"}`, and so on).
//!
//! Decoding never fails: a wire value with no recognized tag is absent
//! (`None`), and the enclosing document simply omits the field.

use serde_json::{Value, json};

use super::document::Document;

/// A single value in a document, tagged with its type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    String(String),
    Integer(i64),
    Double(f64),
    Boolean(bool),
    /// RFC 3339 timestamp string (`timestampValue` on the wire).
    Timestamp(String),
    /// Ordered list of values (`arrayValue` on the wire).
    Array(Vec<TypedValue>),
    /// Nested document (`mapValue` on the wire).
    Map(Document),
}

impl TypedValue {
    /// Convert a plain JSON value into a typed value.
    ///
    /// Returns `None` for `null`, the one plain JSON shape with no wire
    /// counterpart. Array elements that convert to `None` are dropped with a
    /// warning; the remaining elements keep their order. Integers in `i64`
    /// range stay integers, everything else numeric becomes a double, so an
    /// integral value never round-trips through `doubleValue`.
    pub fn from_json(plain: &Value) -> Option<Self> {
        match plain {
            Value::Null => None,
            Value::Bool(flag) => Some(Self::Boolean(*flag)),
            Value::Number(number) => {
                if let Some(integer) = number.as_i64() {
                    Some(Self::Integer(integer))
                } else {
                    number.as_f64().map(Self::Double)
                }
            }
            Value::String(text) => Some(Self::String(text.clone())),
            Value::Array(items) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    match Self::from_json(item) {
                        Some(value) => values.push(value),
                        None => {
                            tracing::warn!("dropping unsupported array element during encode");
                        }
                    }
                }
                Some(Self::Array(values))
            }
            Value::Object(map) => Some(Self::Map(Document::from_json(map))),
        }
    }

    /// Convert back to plain JSON. Timestamps become their RFC 3339 string.
    pub fn to_json(&self) -> Value {
        match self {
            Self::String(text) => Value::String(text.clone()),
            Self::Integer(integer) => Value::from(*integer),
            Self::Double(double) => json!(double),
            Self::Boolean(flag) => Value::Bool(*flag),
            Self::Timestamp(timestamp) => Value::String(timestamp.clone()),
            Self::Array(values) => Value::Array(values.iter().map(Self::to_json).collect()),
            Self::Map(document) => Value::Object(document.to_json()),
        }
    }

    /// Encode as a tagged wire value.
    ///
    /// Integers are string-encoded on the wire; the REST API requires this
    /// to avoid precision loss in JSON number handling.
    pub fn to_wire(&self) -> Value {
        match self {
            Self::String(text) => json!({ "stringValue": text }),
            Self::Integer(integer) => json!({ "integerValue": integer.to_string() }),
            Self::Double(double) => json!({ "doubleValue": double }),
            Self::Boolean(flag) => json!({ "booleanValue": flag }),
            Self::Timestamp(timestamp) => json!({ "timestampValue": timestamp }),
            Self::Array(values) => {
                let values: Vec<Value> = values.iter().map(Self::to_wire).collect();
                json!({ "arrayValue": { "values": values } })
            }
            Self::Map(document) => json!({ "mapValue": document.to_wire() }),
        }
    }

    /// Decode a tagged wire value.
    ///
    /// Exactly one tag is expected per value; the first recognized tag wins.
    /// A value with no recognized tag decodes to `None`; the caller treats
    /// the field as absent rather than erroring. Unrecognized tags inside an
    /// `arrayValue` are skipped, so a decoded list may be shorter than the
    /// wire array.
    pub fn from_wire(wire: &Value) -> Option<Self> {
        let tagged = wire.as_object()?;

        if let Some(value) = tagged.get("stringValue") {
            return value.as_str().map(|text| Self::String(text.to_string()));
        }
        if let Some(value) = tagged.get("integerValue") {
            return Self::integer_from_wire(value);
        }
        if let Some(value) = tagged.get("doubleValue") {
            return value.as_f64().map(Self::Double);
        }
        if let Some(value) = tagged.get("booleanValue") {
            return value.as_bool().map(Self::Boolean);
        }
        if let Some(value) = tagged.get("timestampValue") {
            return value
                .as_str()
                .map(|timestamp| Self::Timestamp(timestamp.to_string()));
        }
        if let Some(value) = tagged.get("arrayValue") {
            let items = value
                .get("values")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default();
            let values = items.iter().filter_map(Self::from_wire).collect();
            return Some(Self::Array(values));
        }
        if let Some(value) = tagged.get("mapValue") {
            return Some(Self::Map(Document::from_wire(value)));
        }

        None
    }

    /// Borrow the inner string if this is a `String` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text),
            _ => None,
        }
    }

    /// Borrow the inner element list if this is an `Array` value.
    pub fn as_array(&self) -> Option<&[TypedValue]> {
        match self {
            Self::Array(values) => Some(values),
            _ => None,
        }
    }

    fn integer_from_wire(value: &Value) -> Option<Self> {
        match value {
            // Wire integers are string-encoded; tolerate a bare number too.
            Value::String(text) => match text.parse::<i64>() {
                Ok(integer) => Some(Self::Integer(integer)),
                Err(_) => {
                    tracing::warn!(value = %text, "skipping unparseable integerValue");
                    None
                }
            },
            Value::Number(number) => number.as_i64().map(Self::Integer),
            _ => None,
        }
    }
}
