//! Scalar coercion for deserialization leaves
//!
//! Converts a raw JSON scalar into the primitive the schema node dictates.
//! Strings are accepted for every scalar kind, as they arrive from query
//! strings and form fields.

use serde_json::Value as Json;
use thiserror::Error;

use crate::codec::datetime::{parse_date, parse_date_time};
use crate::resource::Value;
use crate::schema::{SchemaNode, FORMAT_DATE, FORMAT_DATE_TIME};

/// A raw scalar that cannot become the requested primitive
#[derive(Debug, Clone, PartialEq, Error)]
#[error("cannot coerce {found} {raw} to {expected}")]
pub struct CoercionError {
    /// Target primitive
    pub expected: &'static str,
    /// JSON kind of the raw value
    pub found: &'static str,
    /// Raw value as JSON text
    pub raw: String,
}

impl CoercionError {
    /// Create an error for a raw value
    pub fn new(expected: &'static str, raw: &Json) -> Self {
        Self {
            expected,
            found: json_kind(raw),
            raw: raw.to_string(),
        }
    }
}

/// Converts raw JSON scalars at scalar schema leaves.
pub trait ScalarCoercer: Send + Sync {
    /// Coerces `raw` into the primitive dictated by `node`.
    fn coerce(&self, node: &SchemaNode, raw: &Json) -> Result<Value, CoercionError>;
}

/// Default coercer.
///
/// - `null` stays `null` at every scalar node
/// - string + `date` / `date-time` formats parse into dates
/// - integer / number / boolean accept matching JSON values and strings
#[derive(Debug, Clone, Copy, Default)]
pub struct ParameterCoercer;

impl ScalarCoercer for ParameterCoercer {
    fn coerce(&self, node: &SchemaNode, raw: &Json) -> Result<Value, CoercionError> {
        if raw.is_null() {
            return Ok(Value::Null);
        }
        match node {
            SchemaNode::String { format } => coerce_string(format.as_deref(), raw),
            SchemaNode::Integer { .. } => coerce_integer(raw),
            SchemaNode::Number { .. } => coerce_number(raw),
            SchemaNode::Boolean => coerce_boolean(raw),
            other => Err(CoercionError::new(other.type_name(), raw)),
        }
    }
}

fn coerce_string(format: Option<&str>, raw: &Json) -> Result<Value, CoercionError> {
    match (format, raw) {
        (Some(FORMAT_DATE), Json::String(s)) => parse_date(s)
            .map(Value::Date)
            .ok_or_else(|| CoercionError::new("date", raw)),
        (Some(FORMAT_DATE), _) => Err(CoercionError::new("date", raw)),
        (Some(FORMAT_DATE_TIME), Json::String(s)) => parse_date_time(s)
            .map(Value::DateTime)
            .ok_or_else(|| CoercionError::new("date-time", raw)),
        (Some(FORMAT_DATE_TIME), _) => Err(CoercionError::new("date-time", raw)),
        (_, Json::String(s)) => Ok(Value::String(s.clone())),
        // Other scalars are left as they are
        (_, Json::Bool(_) | Json::Number(_)) => Ok(Value::from_json(raw.clone())),
        (_, _) => Err(CoercionError::new("string", raw)),
    }
}

fn coerce_integer(raw: &Json) -> Result<Value, CoercionError> {
    match raw {
        Json::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(Value::Integer(i));
            }
            if let Some(u) = n.as_u64() {
                return Ok(Value::Unsigned(u));
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                    Ok(Value::Integer(f as i64))
                }
                _ => Err(CoercionError::new("integer", raw)),
            }
        }
        Json::String(s) => match s.parse::<i64>() {
            Ok(i) => Ok(Value::Integer(i)),
            Err(_) => s
                .parse::<u64>()
                .map(Value::Unsigned)
                .map_err(|_| CoercionError::new("integer", raw)),
        },
        _ => Err(CoercionError::new("integer", raw)),
    }
}

fn coerce_number(raw: &Json) -> Result<Value, CoercionError> {
    match raw {
        Json::Number(n) => n
            .as_f64()
            .map(Value::Number)
            .ok_or_else(|| CoercionError::new("number", raw)),
        Json::String(s) => match s.trim().parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(Value::Number(f)),
            _ => Err(CoercionError::new("number", raw)),
        },
        _ => Err(CoercionError::new("number", raw)),
    }
}

fn coerce_boolean(raw: &Json) -> Result<Value, CoercionError> {
    match raw {
        Json::Bool(b) => Ok(Value::Bool(*b)),
        Json::String(s) => match s.as_str() {
            "true" | "1" => Ok(Value::Bool(true)),
            "false" | "0" => Ok(Value::Bool(false)),
            _ => Err(CoercionError::new("boolean", raw)),
        },
        _ => Err(CoercionError::new("boolean", raw)),
    }
}

/// Returns the JSON kind name for error messages.
pub(crate) fn json_kind(raw: &Json) -> &'static str {
    match raw {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}
