// Author: Dustin Pilgrim
// License: MIT

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::{HoconError, Value};

fn expected(what: &str, value: &Value, hint: &str, code: u32) -> HoconError {
    HoconError::TypeError {
        message: format!("Expected {}, got {}", what, value),
        hint: Some(hint.into()),
        code: Some(code),
    }
}

fn out_of_range(n: i64, target: &str, hint: String, code: u32) -> HoconError {
    HoconError::TypeError {
        message: format!("Number {} out of range for {}", n, target),
        hint: Some(hint),
        code: Some(code),
    }
}

/// Integers only; floats are never truncated.
fn integer(value: Value) -> Result<i64, HoconError> {
    match value {
        Value::Int(n) => Ok(n),
        other => Err(expected("integer", &other, "Use a whole number value in your config", 402)),
    }
}

impl TryFrom<Value> for String {
    type Error = HoconError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(expected("string", &other, "Use a quoted string value in your config", 401)),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = HoconError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Float32(n) => Ok(f64::from(n)),
            Value::Int(n) => Ok(n as f64),
            other => Err(expected("number", &other, "Use a number value in your config", 402)),
        }
    }
}

impl TryFrom<Value> for f32 {
    type Error = HoconError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Float32(n) => Ok(n),
            Value::Int(n) => Ok(n as f32),
            other => Err(expected("number", &other, "Use a number value in your config", 402)),
        }
    }
}

impl TryFrom<Value> for i64 {
    type Error = HoconError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        integer(value)
    }
}

impl TryFrom<Value> for i32 {
    type Error = HoconError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let n = integer(value)?;
        i32::try_from(n).map_err(|_| {
            out_of_range(n, "i32", format!("Use a number between {} and {}", i32::MIN, i32::MAX), 412)
        })
    }
}

impl TryFrom<Value> for u8 {
    type Error = HoconError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let n = integer(value)?;
        u8::try_from(n).map_err(|_| out_of_range(n, "u8", "Use a number between 0 and 255".into(), 407))
    }
}

impl TryFrom<Value> for u16 {
    type Error = HoconError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let n = integer(value)?;
        u16::try_from(n).map_err(|_| out_of_range(n, "u16", "Use a number between 0 and 65535".into(), 403))
    }
}

impl TryFrom<Value> for u32 {
    type Error = HoconError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let n = integer(value)?;
        u32::try_from(n).map_err(|_| out_of_range(n, "u32", "Use a number between 0 and 4294967295".into(), 408))
    }
}

impl TryFrom<Value> for u64 {
    type Error = HoconError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let n = integer(value)?;
        u64::try_from(n).map_err(|_| out_of_range(n, "u64", "Use a non-negative number".into(), 406))
    }
}

impl TryFrom<Value> for usize {
    type Error = HoconError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let n = integer(value)?;
        usize::try_from(n).map_err(|_| out_of_range(n, "usize", "Use a non-negative number".into(), 409))
    }
}

impl TryFrom<Value> for bool {
    type Error = HoconError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Boolean(b) => Ok(b),
            other => Err(expected(
                "boolean",
                &other,
                "Use true/yes/on or false/no/off in your config",
                404,
            )),
        }
    }
}

impl<T> TryFrom<Value> for Vec<T>
where
    T: TryFrom<Value, Error = HoconError>,
{
    type Error = HoconError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(values) => Arc::unwrap_or_clone(values).into_iter().map(T::try_from).collect(),
            other => Err(expected("array", &other, "Use an array [...] in your config", 405)),
        }
    }
}

impl<T> TryFrom<Value> for Option<T>
where
    T: TryFrom<Value, Error = HoconError>,
{
    type Error = HoconError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(None),
            v => Ok(Some(T::try_from(v)?)),
        }
    }
}

impl<T> TryFrom<Value> for HashMap<String, T>
where
    T: TryFrom<Value, Error = HoconError>,
{
    type Error = HoconError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(items) => Arc::unwrap_or_clone(items)
                .into_iter()
                .map(|(k, v)| T::try_from(v).map(|v| (k, v)))
                .collect(),
            other => Err(expected("object", &other, "Use an object { ... } in your config", 410)),
        }
    }
}

/// Like the `HashMap` conversion, keeping document order.
impl<T> TryFrom<Value> for IndexMap<String, T>
where
    T: TryFrom<Value, Error = HoconError>,
{
    type Error = HoconError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(items) => Arc::unwrap_or_clone(items)
                .into_iter()
                .map(|(k, v)| T::try_from(v).map(|v| (k, v)))
                .collect(),
            other => Err(expected("object", &other, "Use an object { ... } in your config", 410)),
        }
    }
}
