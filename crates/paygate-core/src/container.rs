//! # Typed Property Container
//!
//! The generic schema-validated property bag underlying every domain entity.
//! A container pairs an immutable [`Schema`] with a value store; every read
//! and write is checked against the schema, and conversion to/from the raw
//! JSON wire maps happens here.

use crate::error::{GatewayError, GatewayResult};
use crate::schema::{FieldType, Schema};
use crate::value::Value;
use chrono::{DateTime, Utc};
use serde_json::{Map as JsonMap, Value as JsonValue};
use std::collections::BTreeMap;

/// A keyed bag of values with a declared schema
#[derive(Debug, Clone)]
pub struct Container {
    schema: &'static Schema,
    store: BTreeMap<&'static str, Value>,
}

impl PartialEq for Container {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.schema, other.schema) && self.store == other.store
    }
}

impl Container {
    /// Create an empty container for the given schema
    pub fn new(schema: &'static Schema) -> Self {
        Self {
            schema,
            store: BTreeMap::new(),
        }
    }

    /// Create a container with only the `id` field populated
    pub fn with_id(schema: &'static Schema, id: impl Into<String>) -> GatewayResult<Self> {
        let mut container = Self::new(schema);
        container.set("id", Value::Str(id.into()))?;
        Ok(container)
    }

    /// The schema governing this container
    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    /// True if no field has been set
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Read a field.
    ///
    /// Fails with a schema error if `key` is not declared; returns `Ok(None)`
    /// if the field is declared but unset.
    pub fn get(&self, key: &str) -> GatewayResult<Option<&Value>> {
        let (canonical, _) = self.field(key)?;
        Ok(self.store.get(canonical))
    }

    /// Write a field.
    ///
    /// Fails with a schema error if `key` is not declared and with a type
    /// error if `value` cannot be conformed to the declared type. A prior
    /// value for the key is overwritten.
    pub fn set(&mut self, key: &str, value: Value) -> GatewayResult<()> {
        let (canonical, field_type) = self.field(key)?;
        let conformed = conform(field_type, value, canonical)?;
        self.store.insert(canonical, conformed);
        Ok(())
    }

    /// Remove a field, returning its prior value if any
    pub fn unset(&mut self, key: &str) -> GatewayResult<Option<Value>> {
        let (canonical, _) = self.field(key)?;
        Ok(self.store.remove(canonical))
    }

    pub fn get_str(&self, key: &str) -> GatewayResult<Option<&str>> {
        match self.get(key)? {
            None => Ok(None),
            Some(Value::Str(s)) => Ok(Some(s)),
            Some(other) => Err(self.type_mismatch(key, "string", other)),
        }
    }

    pub fn get_int(&self, key: &str) -> GatewayResult<Option<i64>> {
        match self.get(key)? {
            None => Ok(None),
            Some(Value::Int(i)) => Ok(Some(*i)),
            Some(other) => Err(self.type_mismatch(key, "integer", other)),
        }
    }

    pub fn get_bool(&self, key: &str) -> GatewayResult<Option<bool>> {
        match self.get(key)? {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(self.type_mismatch(key, "boolean", other)),
        }
    }

    pub fn get_datetime(&self, key: &str) -> GatewayResult<Option<DateTime<Utc>>> {
        match self.get(key)? {
            None => Ok(None),
            Some(Value::DateTime(t)) => Ok(Some(*t)),
            Some(other) => Err(self.type_mismatch(key, "datetime", other)),
        }
    }

    pub fn get_object(&self, key: &str) -> GatewayResult<Option<&Container>> {
        match self.get(key)? {
            None => Ok(None),
            Some(Value::Object(c)) => Ok(Some(c)),
            Some(other) => Err(self.type_mismatch(key, "object", other)),
        }
    }

    pub fn get_list(&self, key: &str) -> GatewayResult<Option<&[Value]>> {
        match self.get(key)? {
            None => Ok(None),
            Some(Value::List(items)) => Ok(Some(items)),
            Some(other) => Err(self.type_mismatch(key, "list", other)),
        }
    }

    /// Build a container from a raw response map.
    ///
    /// Keys present in `map` but absent from the schema are silently ignored,
    /// so gateway responses that grow undocumented fields keep parsing. JSON
    /// `null` is treated as unset. Nested maps and arrays are converted
    /// recursively per the schema.
    pub fn from_json(schema: &'static Schema, map: &JsonMap<String, JsonValue>) -> GatewayResult<Self> {
        let mut container = Self::new(schema);
        for (key, json) in map {
            let Some((canonical, field_type)) = schema.field(key) else {
                continue;
            };
            if json.is_null() {
                continue;
            }
            let value = value_from_json(field_type, json, canonical)?;
            container.set(canonical, value)?;
        }
        Ok(container)
    }

    /// Flatten to a raw request map.
    ///
    /// Absent fields are omitted entirely (never emitted as null) so request
    /// bodies stay minimal.
    pub fn to_json(&self) -> JsonMap<String, JsonValue> {
        self.store
            .iter()
            .map(|(key, value)| ((*key).to_string(), value.to_json()))
            .collect()
    }

    fn field(&self, key: &str) -> GatewayResult<(&'static str, &'static FieldType)> {
        self.schema.field(key).ok_or_else(|| GatewayError::Schema {
            entity: self.schema.name,
            field: key.to_string(),
        })
    }

    fn type_mismatch(&self, key: &str, expected: &'static str, got: &Value) -> GatewayError {
        GatewayError::FieldType {
            field: key.to_string(),
            expected,
            got: got.kind().to_string(),
        }
    }
}

/// Conform a value to a declared field type, coercing where the gateway's
/// wire format allows it (numeric strings for integer fields, RFC 3339
/// strings for datetime fields, integers for string fields).
fn conform(field_type: &'static FieldType, value: Value, key: &str) -> GatewayResult<Value> {
    match (field_type, value) {
        (FieldType::Str, Value::Str(s)) => Ok(Value::Str(s)),
        (FieldType::Str, Value::Int(i)) => Ok(Value::Str(i.to_string())),
        (FieldType::Int, Value::Int(i)) => Ok(Value::Int(i)),
        (FieldType::Int, Value::Str(s)) => match s.trim().parse::<i64>() {
            Ok(i) => Ok(Value::Int(i)),
            Err(_) => Err(GatewayError::FieldType {
                field: key.to_string(),
                expected: "integer",
                got: format!("string \"{s}\""),
            }),
        },
        (FieldType::Bool, Value::Bool(b)) => Ok(Value::Bool(b)),
        (FieldType::DateTime, Value::DateTime(t)) => Ok(Value::DateTime(t)),
        (FieldType::DateTime, Value::Str(s)) => match DateTime::parse_from_rfc3339(&s) {
            Ok(t) => Ok(Value::DateTime(t.with_timezone(&Utc))),
            Err(_) => Err(GatewayError::FieldType {
                field: key.to_string(),
                expected: "datetime",
                got: format!("string \"{s}\""),
            }),
        },
        (FieldType::Enum(allowed), Value::Str(s)) => {
            if allowed.contains(&s.as_str()) {
                Ok(Value::Str(s))
            } else {
                Err(GatewayError::FieldType {
                    field: key.to_string(),
                    expected: "enumerated string",
                    got: format!("\"{s}\""),
                })
            }
        }
        (FieldType::Object(schema), Value::Object(container)) => {
            if std::ptr::eq(container.schema(), *schema) {
                Ok(Value::Object(container))
            } else {
                Err(GatewayError::FieldType {
                    field: key.to_string(),
                    expected: schema.name,
                    got: container.schema().name.to_string(),
                })
            }
        }
        (FieldType::List(element), Value::List(items)) => {
            let conformed: GatewayResult<Vec<Value>> = items
                .into_iter()
                .map(|item| conform(element, item, key))
                .collect();
            Ok(Value::List(conformed?))
        }
        (expected, value) => Err(GatewayError::FieldType {
            field: key.to_string(),
            expected: expected.expected(),
            got: value.kind().to_string(),
        }),
    }
}

/// Convert one JSON value per the declared field type
fn value_from_json(
    field_type: &'static FieldType,
    json: &JsonValue,
    key: &str,
) -> GatewayResult<Value> {
    match (field_type, json) {
        (FieldType::Object(schema), JsonValue::Object(map)) => {
            Ok(Value::Object(Container::from_json(schema, map)?))
        }
        (FieldType::List(element), JsonValue::Array(items)) => {
            let values: GatewayResult<Vec<Value>> = items
                .iter()
                .map(|item| value_from_json(element, item, key))
                .collect();
            Ok(Value::List(values?))
        }
        (_, JsonValue::String(s)) => conform(field_type, Value::Str(s.clone()), key),
        (_, JsonValue::Bool(b)) => conform(field_type, Value::Bool(*b), key),
        (_, JsonValue::Number(n)) => match n.as_i64() {
            Some(i) => conform(field_type, Value::Int(i), key),
            None => Err(GatewayError::FieldType {
                field: key.to_string(),
                expected: field_type.expected(),
                got: format!("number {n}"),
            }),
        },
        (_, json) => Err(GatewayError::FieldType {
            field: key.to_string(),
            expected: field_type.expected(),
            got: json_kind(json).to_string(),
        }),
    }
}

fn json_kind(json: &JsonValue) -> &'static str {
    match json {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    static STATUSES: &[&str] = &["RECEIVED", "COMPLETED", "FAILED"];

    static CARD: Schema = Schema {
        name: "TestCard",
        fields: &[
            ("cardNum", FieldType::Str),
            ("lastDigits", FieldType::Str),
        ],
    };

    static CARD_FIELD: FieldType = FieldType::Object(&CARD);

    static AUTH: Schema = Schema {
        name: "TestAuth",
        fields: &[
            ("id", FieldType::Str),
            ("merchantRefNum", FieldType::Str),
            ("amount", FieldType::Int),
            ("settleWithAuth", FieldType::Bool),
            ("txnTime", FieldType::DateTime),
            ("status", FieldType::Enum(STATUSES)),
            ("card", FieldType::Object(&CARD)),
            ("cards", FieldType::List(&CARD_FIELD)),
        ],
    };

    fn raw_auth() -> JsonMap<String, JsonValue> {
        json!({
            "id": "a1",
            "merchantRefNum": "ref-1",
            "amount": 500,
            "status": "COMPLETED",
            "card": { "lastDigits": "1111", "undocumented": true },
            "somethingNew": "ignored"
        })
        .as_object()
        .unwrap()
        .clone()
    }

    #[test]
    fn test_unknown_field_rejected_on_get_and_set() {
        let mut container = Container::new(&AUTH);
        assert!(matches!(
            container.get("bogus"),
            Err(GatewayError::Schema { entity: "TestAuth", .. })
        ));
        assert!(matches!(
            container.set("bogus", Value::Int(1)),
            Err(GatewayError::Schema { .. })
        ));
    }

    #[test]
    fn test_absent_field_reads_as_none() {
        let container = Container::new(&AUTH);
        assert_eq!(container.get("amount").unwrap(), None);
        assert_eq!(container.get_int("amount").unwrap(), None);
    }

    #[test]
    fn test_type_enforcement() {
        let mut container = Container::new(&AUTH);
        assert!(matches!(
            container.set("amount", Value::Str("not-a-number".into())),
            Err(GatewayError::FieldType { .. })
        ));
        assert!(matches!(
            container.set("status", Value::Str("BOGUS".into())),
            Err(GatewayError::FieldType { .. })
        ));
        assert!(container.set("status", Value::Str("RECEIVED".into())).is_ok());
    }

    #[test]
    fn test_numeric_string_coercion() {
        let mut container = Container::new(&AUTH);
        container.set("amount", Value::Str("500".into())).unwrap();
        assert_eq!(container.get_int("amount").unwrap(), Some(500));
    }

    #[test]
    fn test_datetime_coercion() {
        let mut container = Container::new(&AUTH);
        container
            .set("txnTime", Value::Str("2024-06-01T12:30:00Z".into()))
            .unwrap();
        let t = container.get_datetime("txnTime").unwrap().unwrap();
        assert_eq!(t.to_rfc3339(), "2024-06-01T12:30:00+00:00");
    }

    #[test]
    fn test_nested_object_schema_must_match() {
        let mut container = Container::new(&AUTH);
        let wrong = Container::new(&AUTH);
        assert!(matches!(
            container.set("card", Value::Object(wrong)),
            Err(GatewayError::FieldType { .. })
        ));

        let card = Container::new(&CARD);
        assert!(container.set("card", Value::Object(card)).is_ok());
    }

    #[test]
    fn test_last_write_wins() {
        let mut container = Container::new(&AUTH);
        container.set("amount", Value::Int(100)).unwrap();
        container.set("amount", Value::Int(200)).unwrap();
        assert_eq!(container.get_int("amount").unwrap(), Some(200));
    }

    #[test]
    fn test_from_json_ignores_unknown_keys() {
        let container = Container::from_json(&AUTH, &raw_auth()).unwrap();
        assert_eq!(container.get_int("amount").unwrap(), Some(500));
        assert_eq!(container.get_str("status").unwrap(), Some("COMPLETED"));

        let card = container.get_object("card").unwrap().unwrap();
        assert_eq!(card.get_str("lastDigits").unwrap(), Some("1111"));
        // "undocumented" inside card and "somethingNew" at the top level
        // never make it into the stores
        assert!(matches!(card.get("undocumented"), Err(GatewayError::Schema { .. })));
    }

    #[test]
    fn test_from_json_null_is_absent() {
        let map = json!({ "amount": null, "id": "a2" }).as_object().unwrap().clone();
        let container = Container::from_json(&AUTH, &map).unwrap();
        assert_eq!(container.get("amount").unwrap(), None);
        assert_eq!(container.get_str("id").unwrap(), Some("a2"));
    }

    #[test]
    fn test_round_trip_restricted_to_schema() {
        let container = Container::from_json(&AUTH, &raw_auth()).unwrap();
        let out = container.to_json();

        assert_eq!(out.get("amount"), Some(&json!(500)));
        assert_eq!(out.get("id"), Some(&json!("a1")));
        assert_eq!(out.get("card"), Some(&json!({ "lastDigits": "1111" })));
        // extra keys dropped, declared-but-absent keys omitted
        assert!(!out.contains_key("somethingNew"));
        assert!(!out.contains_key("settleWithAuth"));
    }

    #[test]
    fn test_list_elements_checked() {
        let mut container = Container::new(&AUTH);
        let card = Container::new(&CARD);
        container
            .set("cards", Value::List(vec![Value::Object(card)]))
            .unwrap();
        assert!(matches!(
            container.set("cards", Value::List(vec![Value::Int(3)])),
            Err(GatewayError::FieldType { .. })
        ));
    }

    #[test]
    fn test_with_id() {
        let container = Container::with_id(&AUTH, "a9").unwrap();
        assert_eq!(container.get_str("id").unwrap(), Some("a9"));
        assert_eq!(container.get("amount").unwrap(), None);
    }
}
