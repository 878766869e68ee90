//! # Field Values
//!
//! The tagged union stored in a [`Container`](crate::Container) slot.
//! Absence is represented by the absence of the key in the store, never by a
//! variant or a type default.

use crate::container::Container;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value as JsonValue;

/// A single field value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Bool(bool),
    DateTime(DateTime<Utc>),
    Object(Container),
    List(Vec<Value>),
}

impl Value {
    /// Human-readable name of the stored variant, for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Str(_) => "string",
            Value::Int(_) => "integer",
            Value::Bool(_) => "boolean",
            Value::DateTime(_) => "datetime",
            Value::Object(_) => "object",
            Value::List(_) => "list",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::DateTime(t) => Some(*t),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Container> {
        match self {
            Value::Object(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Convert to the JSON wire representation.
    /// Timestamps are emitted as RFC 3339 strings, the gateway's format.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Str(s) => JsonValue::String(s.clone()),
            Value::Int(i) => JsonValue::Number((*i).into()),
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::DateTime(t) => {
                JsonValue::String(t.to_rfc3339_opts(SecondsFormat::Secs, true))
            }
            Value::Object(c) => JsonValue::Object(c.to_json()),
            Value::List(items) => {
                JsonValue::Array(items.iter().map(Value::to_json).collect())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self {
        Value::DateTime(t)
    }
}
