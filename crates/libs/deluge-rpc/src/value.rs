//! Shape-checked extraction of decoded payloads into typed values.
//!
//! Every conversion matches the [`Value`] variant explicitly and reports a
//! [`ScanError`] on mismatch; nothing here defaults or coerces.

use std::fmt;

use rmpv::Value;

/// A payload did not have the requested shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanError {
    pub expected: &'static str,
    pub found: String,
}

impl ScanError {
    pub fn new(expected: &'static str, found: &Value) -> Self {
        Self { expected, found: describe(found).to_owned() }
    }

    pub fn arity(expected: usize, found: usize) -> Self {
        let expected = match expected {
            0 => "no values",
            1 => "exactly 1 value",
            2 => "exactly 2 values",
            _ => "a fixed number of values",
        };
        Self { expected, found: format!("{found} values") }
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected {}, found {}", self.expected, self.found)
    }
}

impl std::error::Error for ScanError {}

/// Short name of a value's wire shape, used in error messages and diagnostics.
pub fn describe(value: &Value) -> &'static str {
    match value {
        Value::Nil => "nil",
        Value::Boolean(_) => "boolean",
        Value::Integer(_) => "integer",
        Value::F32(_) | Value::F64(_) => "float",
        Value::String(_) => "string",
        Value::Binary(_) => "byte-string",
        Value::Array(_) => "list",
        Value::Map(_) => "dictionary",
        Value::Ext(_, _) => "extension",
    }
}

pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self, ScanError>;
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self, ScanError> {
        Ok(value.clone())
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self, ScanError> {
        match value {
            Value::Boolean(flag) => Ok(*flag),
            other => Err(ScanError::new("boolean", other)),
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Result<Self, ScanError> {
        match value {
            Value::Integer(int) => {
                int.as_i64().ok_or_else(|| ScanError::new("64-bit signed integer", value))
            }
            other => Err(ScanError::new("integer", other)),
        }
    }
}

impl FromValue for i32 {
    fn from_value(value: &Value) -> Result<Self, ScanError> {
        let wide = i64::from_value(value)?;
        i32::try_from(wide).map_err(|_| ScanError {
            expected: "32-bit signed integer",
            found: format!("integer {wide}"),
        })
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self, ScanError> {
        match value {
            Value::F32(float) => Ok(f64::from(*float)),
            Value::F64(float) => Ok(*float),
            other => Err(ScanError::new("float", other)),
        }
    }
}

/// Text and byte-strings both decode, provided the bytes are UTF-8.
impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self, ScanError> {
        match value {
            Value::String(text) => text
                .as_str()
                .map(str::to_owned)
                .ok_or_else(|| ScanError::new("utf-8 string", value)),
            Value::Binary(bytes) => String::from_utf8(bytes.clone())
                .map_err(|_| ScanError::new("utf-8 byte-string", value)),
            other => Err(ScanError::new("byte-string", other)),
        }
    }
}

/// Nil is an explicit absent value, distinct from a shape mismatch.
impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self, ScanError> {
        match value {
            Value::Nil => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Result<Self, ScanError> {
        match value {
            Value::Array(items) => items.iter().map(T::from_value).collect(),
            other => Err(ScanError::new("list", other)),
        }
    }
}

impl<A: FromValue, B: FromValue> FromValue for (A, B) {
    fn from_value(value: &Value) -> Result<Self, ScanError> {
        match value {
            Value::Array(items) if items.len() == 2 => {
                Ok((A::from_value(&items[0])?, B::from_value(&items[1])?))
            }
            Value::Array(items) => Err(ScanError::arity(2, items.len())),
            other => Err(ScanError::new("2-tuple", other)),
        }
    }
}

/// Scans a positional result that must hold exactly one value.
pub fn scan_single<T: FromValue>(values: &[Value]) -> Result<T, ScanError> {
    match values {
        [only] => T::from_value(only),
        other => Err(ScanError::arity(1, other.len())),
    }
}

/// Borrows the entries of a dictionary value.
pub fn as_dictionary(value: &Value) -> Result<&[(Value, Value)], ScanError> {
    match value {
        Value::Map(entries) => Ok(entries.as_slice()),
        other => Err(ScanError::new("dictionary", other)),
    }
}

/// Borrows the items of a list value.
pub fn as_list(value: &Value) -> Result<&[Value], ScanError> {
    match value {
        Value::Array(items) => Ok(items.as_slice()),
        other => Err(ScanError::new("list", other)),
    }
}

pub(crate) fn text(value: &str) -> Value {
    Value::from(value)
}

pub(crate) fn text_list<S: AsRef<str>>(items: &[S]) -> Value {
    Value::Array(items.iter().map(|item| text(item.as_ref())).collect())
}
