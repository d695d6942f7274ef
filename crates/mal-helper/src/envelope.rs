//! Unwrapping of the API's listing envelope.
//!
//! Listing endpoints answer `{"data": [{"node": {...}}, ...], "paging": {...}}`,
//! while single-record lookups answer the bare object.

use serde_json::{Map, Value};

/// Records extracted from a response body
#[derive(Debug, Clone, PartialEq)]
pub enum Unwrapped {
    /// The body had no envelope and is the record itself
    Single(Value),
    /// The `node` of every `data` entry, in response order
    Many(Vec<Value>),
}

impl Unwrapped {
    /// Flatten into a list of records.
    ///
    /// A bare object becomes a one-element list; any other bare value is
    /// dropped.
    pub fn into_records(self) -> Vec<Value> {
        match self {
            Unwrapped::Many(records) => records,
            Unwrapped::Single(value @ Value::Object(_)) => vec![value],
            Unwrapped::Single(_) => Vec::new(),
        }
    }
}

/// Extract the substantive records from a response body. Never fails.
pub fn unwrap(envelope: Value) -> Unwrapped {
    if is_falsy(&envelope) {
        return Unwrapped::Single(envelope);
    }

    match envelope {
        Value::Object(mut object) => match object.remove("data") {
            Some(Value::Array(entries)) => {
                Unwrapped::Many(entries.into_iter().map(take_node).collect())
            }
            Some(_) => Unwrapped::Many(Vec::new()),
            None => Unwrapped::Single(Value::Object(object)),
        },
        other => Unwrapped::Single(other),
    }
}

fn take_node(entry: Value) -> Value {
    match entry {
        Value::Object(mut wrapper) => wrapper
            .remove("node")
            .unwrap_or_else(|| Value::Object(Map::new())),
        _ => Value::Object(Map::new()),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
