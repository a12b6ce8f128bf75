// Author: Dustin Pilgrim
// License: MIT

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

/// Insertion-ordered object body. Re-assigning a key keeps its original slot.
pub type Map = IndexMap<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Object(Arc<Map>),
    Array(Arc<Vec<Value>>),
    String(String),
    Int(i64),
    Float32(f32),
    Boolean(bool),
    Null,
    Substitution(Substitution),
}

/// `${path}` or `${?path}` placeholder, replaced during resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Substitution {
    pub path: String,
    pub optional: bool,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Object,
    Array,
    String,
    Int,
    Float32,
    Boolean,
    Null,
    Substitution,
}

impl Value {
    pub fn object(items: Map) -> Self {
        Value::Object(Arc::new(items))
    }

    pub fn array(values: Vec<Value>) -> Self {
        Value::Array(Arc::new(values))
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Object(_) => ValueKind::Object,
            Value::Array(_) => ValueKind::Array,
            Value::String(_) => ValueKind::String,
            Value::Int(_) => ValueKind::Int,
            Value::Float32(_) => ValueKind::Float32,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Null => ValueKind::Null,
            Value::Substitution(_) => ValueKind::Substitution,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        if let Value::Object(items) = self {
            Some(items)
        } else {
            None
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        if let Value::Array(values) = self {
            Some(values)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::Float32(n) => Some(*n),
            Value::Int(n) => Some(*n as f32),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Walk `path` through nested objects. An empty path yields `self`.
    pub fn lookup<S: AsRef<str>>(&self, path: &[S]) -> Option<&Value> {
        let mut current = self;
        for seg in path {
            current = current.as_object()?.get(seg.as_ref())?;
        }
        Some(current)
    }

    /// True when two values are the same shared container, or equal scalars.
    pub fn shares_with(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            (Value::Array(a), Value::Array(b)) => Arc::ptr_eq(a, b),
            _ => self == other,
        }
    }
}

/// Deep-merge `incoming` into `existing`.
///
/// Object-valued keys present on both sides merge recursively; any other
/// incoming value replaces the existing one.
pub fn merge_objects(existing: &mut Map, incoming: Map) {
    for (key, value) in incoming {
        match value {
            Value::Object(new) => {
                if let Some(Value::Object(current)) = existing.get_mut(&key) {
                    merge_objects(Arc::make_mut(current), Arc::unwrap_or_clone(new));
                } else {
                    existing.insert(key, Value::Object(new));
                }
            }
            other => {
                existing.insert(key, other);
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Object(items) => {
                write!(f, "{{")?;
                for (i, (key, value)) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "\"{}\":{}", key, value)?;
                }
                write!(f, "}}")
            }
            Value::Array(values) => {
                write!(f, "[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", value)?;
                }
                write!(f, "]")
            }
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::Int(n) => write!(f, "{}", n),
            // Debug formatting keeps a fraction or exponent so the text re-lexes as a float.
            Value::Float32(n) => write!(f, "{:?}", n),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Null => write!(f, "null"),
            Value::Substitution(sub) => write!(f, "{}", sub),
        }
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.optional {
            write!(f, "${{?{}}}", self.path)
        } else {
            write!(f, "${{{}}}", self.path)
        }
    }
}
