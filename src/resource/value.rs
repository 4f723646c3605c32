//! Codec value model
//!
//! A `Value` is what the codec reads during serialization and produces
//! during deserialization: scalars, dates, sequences, untyped maps and
//! typed resources.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde_json::{Map, Number};

use super::Resource;
use crate::codec::datetime::{format_date, format_date_time};

/// A value position in a typed object graph.
#[derive(Debug)]
pub enum Value {
    /// Absent / null
    Null,
    /// Boolean
    Bool(bool),
    /// Signed integer
    Integer(i64),
    /// Unsigned integer above `i64::MAX`
    Unsigned(u64),
    /// Floating point number
    Number(f64),
    /// UTF-8 string
    String(String),
    /// Calendar date
    Date(NaiveDate),
    /// Timestamp with a fixed UTC offset
    DateTime(DateTime<FixedOffset>),
    /// Ordered sequence
    Array(Vec<Value>),
    /// Untyped JSON object, key order preserved
    Map(Vec<(String, Value)>),
    /// Typed resource
    Object(Box<dyn Resource>),
}

impl Value {
    /// Returns the kind name for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Integer(_) | Value::Unsigned(_) => "integer",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Date(_) => "date",
            Value::DateTime(_) => "date-time",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
            Value::Object(_) => "object",
        }
    }

    /// Loose emptiness: `null`, `false`, `0`, `0.0`, `""`, `"0"`, `[]` and
    /// an empty map are empty. Dates and resources never are.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => !b,
            Value::Integer(i) => *i == 0,
            Value::Unsigned(u) => *u == 0,
            Value::Number(n) => *n == 0.0,
            Value::String(s) => s.is_empty() || s == "0",
            Value::Array(items) => items.is_empty(),
            Value::Map(entries) => entries.is_empty(),
            Value::Date(_) | Value::DateTime(_) | Value::Object(_) => false,
        }
    }

    /// Whether this is a plain JSON scalar (null included).
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Value::Null
                | Value::Bool(_)
                | Value::Integer(_)
                | Value::Unsigned(_)
                | Value::Number(_)
                | Value::String(_)
        )
    }

    /// Integer value, kept exact across the whole `i64` and `u64` range.
    pub fn from_u64(u: u64) -> Value {
        match i64::try_from(u) {
            Ok(i) => Value::Integer(i),
            Err(_) => Value::Unsigned(u),
        }
    }

    /// Borrows the resource of an `Object` value.
    pub fn as_resource(&self) -> Option<&dyn Resource> {
        match self {
            Value::Object(resource) => Some(resource.as_ref()),
            _ => None,
        }
    }

    /// Moves a typed resource out of an `Object` value.
    ///
    /// Returns `None` for other kinds or a different concrete type.
    pub fn into_resource<T: Resource>(self) -> Option<T> {
        match self {
            Value::Object(resource) => resource.into_any().downcast::<T>().ok().map(|b| *b),
            _ => None,
        }
    }

    /// Converts a raw JSON tree without schema guidance.
    ///
    /// Integers that fit `i64` or `u64` stay integers; objects become
    /// ordered maps.
    pub fn from_json(json: serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    Value::Unsigned(u)
                } else {
                    n.as_f64().map_or(Value::Null, Value::Number)
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Renders the value as JSON without schema guidance.
    ///
    /// Dates use the wire profiles; resources render every declared field.
    /// Non-finite numbers become `null`.
    pub fn to_plain_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Integer(i) => serde_json::Value::Number((*i).into()),
            Value::Unsigned(u) => serde_json::Value::Number((*u).into()),
            Value::Number(n) => {
                Number::from_f64(*n).map_or(serde_json::Value::Null, serde_json::Value::Number)
            }
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Date(date) => serde_json::Value::String(format_date(date)),
            Value::DateTime(dt) => serde_json::Value::String(format_date_time(dt)),
            Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_plain_json).collect())
            }
            Value::Map(entries) => serde_json::Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_plain_json()))
                    .collect(),
            ),
            Value::Object(resource) => {
                let mut map = Map::new();
                for name in resource.field_names() {
                    if let Some(value) = resource.field(name) {
                        map.insert(name.to_string(), value.to_plain_json());
                    }
                }
                serde_json::Value::Object(map)
            }
        }
    }
}

impl Clone for Value {
    fn clone(&self) -> Self {
        match self {
            Value::Null => Value::Null,
            Value::Bool(b) => Value::Bool(*b),
            Value::Integer(i) => Value::Integer(*i),
            Value::Unsigned(u) => Value::Unsigned(*u),
            Value::Number(n) => Value::Number(*n),
            Value::String(s) => Value::String(s.clone()),
            Value::Date(d) => Value::Date(*d),
            Value::DateTime(dt) => Value::DateTime(*dt),
            Value::Array(items) => Value::Array(items.clone()),
            Value::Map(entries) => Value::Map(entries.clone()),
            Value::Object(resource) => Value::Object(resource.clone_resource()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Unsigned(a), Value::Unsigned(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.eq_resource(b.as_ref()),
            _ => false,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Value::from_u64(u)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<NaiveDate> for Value {
    fn from(date: NaiveDate) -> Self {
        Value::Date(date)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Value::DateTime(dt)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}
