//! Conversions between Rust field types and codec values

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use thiserror::Error;

use super::Value;
use crate::codec::datetime::{parse_date, parse_date_time};

/// Why a value could not be stored in (or read from) a field
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    /// The resource declares no such field
    #[error("no field named '{0}'")]
    UnknownField(String),

    /// The value kind cannot be held by the field type
    #[error("expected {expected}, found {found}")]
    Mismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// The value has the right kind but is out of range or unparsable
    #[error("invalid {expected} value '{value}'")]
    Invalid {
        expected: &'static str,
        value: String,
    },
}

impl FieldError {
    /// Create a kind mismatch error
    pub fn mismatch(expected: &'static str, found: &Value) -> Self {
        FieldError::Mismatch {
            expected,
            found: found.kind(),
        }
    }
}

/// A Rust type that can be the type of a resource field.
///
/// `Null` assigns the zero value for plain scalars and sequences; use
/// `Option<T>` to keep absence observable.
pub trait FieldValue: Sized {
    /// Reads the field as a codec value.
    fn to_value(&self) -> Value;

    /// Builds the field from a codec value.
    fn from_value(value: Value) -> Result<Self, FieldError>;
}

impl FieldValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }

    fn from_value(value: Value) -> Result<Self, FieldError> {
        Ok(value)
    }
}

impl FieldValue for String {
    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }

    fn from_value(value: Value) -> Result<Self, FieldError> {
        match value {
            Value::String(s) => Ok(s),
            Value::Null => Ok(String::new()),
            other => Err(FieldError::mismatch("string", &other)),
        }
    }
}

impl FieldValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: Value) -> Result<Self, FieldError> {
        match value {
            Value::Bool(b) => Ok(b),
            Value::Null => Ok(false),
            other => Err(FieldError::mismatch("boolean", &other)),
        }
    }
}

fn integer_from_value(value: Value) -> Result<i64, FieldError> {
    match value {
        Value::Integer(i) => Ok(i),
        Value::Null => Ok(0),
        Value::Number(n) if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 => {
            Ok(n as i64)
        }
        Value::Unsigned(u) => Err(FieldError::Invalid {
            expected: "integer",
            value: u.to_string(),
        }),
        Value::Number(n) => Err(FieldError::Invalid {
            expected: "integer",
            value: n.to_string(),
        }),
        other => Err(FieldError::mismatch("integer", &other)),
    }
}

macro_rules! integer_field {
    ($($ty:ty),*) => {
        $(
            impl FieldValue for $ty {
                fn to_value(&self) -> Value {
                    Value::Integer(i64::from(*self))
                }

                fn from_value(value: Value) -> Result<Self, FieldError> {
                    let i = integer_from_value(value)?;
                    <$ty>::try_from(i).map_err(|_| FieldError::Invalid {
                        expected: stringify!($ty),
                        value: i.to_string(),
                    })
                }
            }
        )*
    };
}

integer_field!(i8, i16, i32, u8, u16, u32);

impl FieldValue for i64 {
    fn to_value(&self) -> Value {
        Value::Integer(*self)
    }

    fn from_value(value: Value) -> Result<Self, FieldError> {
        integer_from_value(value)
    }
}

impl FieldValue for u64 {
    fn to_value(&self) -> Value {
        Value::from_u64(*self)
    }

    fn from_value(value: Value) -> Result<Self, FieldError> {
        if let Value::Unsigned(u) = value {
            return Ok(u);
        }
        let i = integer_from_value(value)?;
        u64::try_from(i).map_err(|_| FieldError::Invalid {
            expected: "u64",
            value: i.to_string(),
        })
    }
}

impl FieldValue for f64 {
    fn to_value(&self) -> Value {
        Value::Number(*self)
    }

    fn from_value(value: Value) -> Result<Self, FieldError> {
        match value {
            Value::Number(n) => Ok(n),
            Value::Integer(i) => Ok(i as f64),
            Value::Unsigned(u) => Ok(u as f64),
            Value::Null => Ok(0.0),
            other => Err(FieldError::mismatch("number", &other)),
        }
    }
}

impl FieldValue for f32 {
    fn to_value(&self) -> Value {
        Value::Number(f64::from(*self))
    }

    fn from_value(value: Value) -> Result<Self, FieldError> {
        f64::from_value(value).map(|n| n as f32)
    }
}

impl FieldValue for NaiveDate {
    fn to_value(&self) -> Value {
        Value::Date(*self)
    }

    fn from_value(value: Value) -> Result<Self, FieldError> {
        match value {
            Value::Date(date) => Ok(date),
            Value::DateTime(dt) => Ok(dt.date_naive()),
            Value::String(s) => parse_date(&s).ok_or(FieldError::Invalid {
                expected: "date",
                value: s,
            }),
            other => Err(FieldError::mismatch("date", &other)),
        }
    }
}

impl FieldValue for DateTime<FixedOffset> {
    fn to_value(&self) -> Value {
        Value::DateTime(*self)
    }

    fn from_value(value: Value) -> Result<Self, FieldError> {
        match value {
            Value::DateTime(dt) => Ok(dt),
            Value::String(s) => parse_date_time(&s).ok_or(FieldError::Invalid {
                expected: "date-time",
                value: s,
            }),
            other => Err(FieldError::mismatch("date-time", &other)),
        }
    }
}

impl FieldValue for DateTime<Utc> {
    fn to_value(&self) -> Value {
        Value::DateTime(DateTime::<FixedOffset>::from(*self))
    }

    fn from_value(value: Value) -> Result<Self, FieldError> {
        DateTime::<FixedOffset>::from_value(value).map(|dt| dt.with_timezone(&Utc))
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: Value) -> Result<Self, FieldError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(FieldValue::to_value).collect())
    }

    fn from_value(value: Value) -> Result<Self, FieldError> {
        match value {
            Value::Array(items) => items.into_iter().map(T::from_value).collect(),
            Value::Null => Ok(Vec::new()),
            other => Err(FieldError::mismatch("array", &other)),
        }
    }
}

impl FieldValue for serde_json::Value {
    fn to_value(&self) -> Value {
        Value::from_json(self.clone())
    }

    fn from_value(value: Value) -> Result<Self, FieldError> {
        Ok(value.to_plain_json())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_assigns_zero_value() {
        assert_eq!(String::from_value(Value::Null).unwrap(), "");
        assert_eq!(i64::from_value(Value::Null).unwrap(), 0);
        assert!(!bool::from_value(Value::Null).unwrap());
        assert!(Vec::<String>::from_value(Value::Null).unwrap().is_empty());
        assert_eq!(Option::<i64>::from_value(Value::Null).unwrap(), None);
    }

    #[test]
    fn test_integer_narrowing() {
        assert_eq!(i32::from_value(Value::Integer(42)).unwrap(), 42);
        assert!(u8::from_value(Value::Integer(300)).is_err());
        assert!(u32::from_value(Value::Integer(-1)).is_err());
        assert_eq!(i64::from_value(Value::Number(3.0)).unwrap(), 3);
        assert!(i64::from_value(Value::Number(3.5)).is_err());
        // 2^63 does not fit
        assert!(i64::from_value(Value::Number(9_223_372_036_854_775_808.0)).is_err());
    }

    #[test]
    fn test_u64_full_range() {
        assert_eq!(u64::MAX.to_value(), Value::Unsigned(u64::MAX));
        assert_eq!(u64::from_value(Value::Unsigned(u64::MAX)).unwrap(), u64::MAX);
        assert_eq!(u64::from_value(Value::Integer(5)).unwrap(), 5);
        assert!(u64::from_value(Value::Integer(-1)).is_err());
        assert!(i64::from_value(Value::Unsigned(u64::MAX)).is_err());
        assert!(u32::from_value(Value::Unsigned(u64::MAX)).is_err());
    }

    #[test]
    fn test_kind_mismatch() {
        let err = String::from_value(Value::Integer(1)).unwrap_err();
        assert_eq!(
            err,
            FieldError::Mismatch {
                expected: "string",
                found: "integer"
            }
        );
    }

    #[test]
    fn test_dates_from_strings() {
        let date = NaiveDate::from_value(Value::from("2020-02-29")).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2020, 2, 29).unwrap());
        assert!(NaiveDate::from_value(Value::from("2021-02-29")).is_err());

        let dt = DateTime::<FixedOffset>::from_value(Value::from("2016-01-01T12:00:00+0100")).unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 3600);
    }

    #[test]
    fn test_vec_of_options() {
        let value = Value::Array(vec![Value::Integer(1), Value::Null]);
        let items = Vec::<Option<i64>>::from_value(value).unwrap();
        assert_eq!(items, vec![Some(1), None]);
    }
}
