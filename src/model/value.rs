//! Universal value type for graph data.

use std::fmt;

use serde::{Serialize, Serializer};

use super::raw::RawValue;
use super::{GraphObject, Sequence};

/// Anything that can live in a graph object.
///
/// - Scalars: Null, Bool, Int, UInt, Float, String
/// - Containers: Sequence, Object
///
/// Containers are handles. Cloning a `Value` never copies a store or a
/// sequence, and equality on containers is reference equality.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    /// Integers above `i64::MAX`, kept exact.
    UInt(u64),
    Float(f64),
    String(String),
    Sequence(Sequence),
    Object(GraphObject),
}

// ============================================================================
// Type checking
// ============================================================================

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Bool(_) => "BOOLEAN",
            Value::Int(_) | Value::UInt(_) => "INTEGER",
            Value::Float(_) => "FLOAT",
            Value::String(_) => "STRING",
            Value::Sequence(_) => "SEQUENCE",
            Value::Object(_) => "OBJECT",
        }
    }

    pub fn is_null(&self) -> bool { matches!(self, Value::Null) }
    pub fn is_numeric(&self) -> bool { matches!(self, Value::Int(_) | Value::UInt(_) | Value::Float(_)) }
    pub fn is_string(&self) -> bool { matches!(self, Value::String(_)) }
    pub fn is_scalar(&self) -> bool { !matches!(self, Value::Sequence(_) | Value::Object(_)) }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempt to extract as i64. Integral floats are accepted; anything
    /// outside the i64 range is `None`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::UInt(u) => i64::try_from(*u).ok(),
            Value::Float(f)
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 =>
            {
                Some(*f as i64)
            }
            _ => None,
        }
    }

    /// Attempt to extract as f64
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            Value::UInt(u) => Some(*u as f64),
            _ => None,
        }
    }

    /// Attempt to extract as &str
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&GraphObject> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Value::Sequence(s) => Some(s),
            _ => None,
        }
    }

    pub fn into_object(self) -> Option<GraphObject> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn into_sequence(self) -> Option<Sequence> {
        match self {
            Value::Sequence(s) => Some(s),
            _ => None,
        }
    }

    pub fn into_string(self) -> Option<String> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

// ============================================================================
// Raw tree boundary
// ============================================================================

impl Value {
    /// Convert one raw node. Containers are wrapped one level deep; their
    /// children stay raw until read.
    pub fn from_raw(raw: RawValue) -> Self {
        match raw {
            RawValue::Null => Value::Null,
            RawValue::Bool(b) => Value::Bool(b),
            RawValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::UInt(u)
                } else {
                    n.as_f64().map(Value::Float).unwrap_or(Value::Null)
                }
            }
            RawValue::String(s) => Value::String(s),
            RawValue::Array(items) => Value::Sequence(Sequence::from_raw(items)),
            RawValue::Object(map) => Value::Object(GraphObject::from_raw_map(map)),
        }
    }

    /// Raw snapshot of this value and everything below it.
    ///
    /// Non-finite floats have no raw form and become null.
    pub fn to_json(&self) -> RawValue {
        match self {
            Value::Null => RawValue::Null,
            Value::Bool(b) => RawValue::Bool(*b),
            Value::Int(i) => RawValue::from(*i),
            Value::UInt(u) => RawValue::from(*u),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(RawValue::Number)
                .unwrap_or(RawValue::Null),
            Value::String(s) => RawValue::String(s.clone()),
            Value::Sequence(s) => s.to_json(),
            Value::Object(o) => o.to_json(),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

// ============================================================================
// Conversions (From impls)
// ============================================================================

impl From<bool> for Value { fn from(v: bool) -> Self { Value::Bool(v) } }
impl From<i32> for Value { fn from(v: i32) -> Self { Value::Int(v as i64) } }
impl From<u32> for Value { fn from(v: u32) -> Self { Value::Int(v as i64) } }
impl From<i64> for Value { fn from(v: i64) -> Self { Value::Int(v) } }
impl From<u64> for Value {
    fn from(v: u64) -> Self { i64::try_from(v).map(Value::Int).unwrap_or(Value::UInt(v)) }
}
impl From<f64> for Value { fn from(v: f64) -> Self { Value::Float(v) } }
impl From<String> for Value { fn from(v: String) -> Self { Value::String(v) } }
impl From<&str> for Value { fn from(v: &str) -> Self { Value::String(v.to_owned()) } }
impl From<GraphObject> for Value { fn from(v: GraphObject) -> Self { Value::Object(v) } }
impl From<Sequence> for Value { fn from(v: Sequence) -> Self { Value::Sequence(v) } }
impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self { Value::Sequence(v.into_iter().collect()) }
}
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self { v.map(Into::into).unwrap_or(Value::Null) }
}

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::UInt(u) => write!(f, "{u}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(s) => write!(f, "\"{}\"", s.replace('"', "\\\"")),
            Value::Sequence(s) => write!(f, "{}", s.to_json()),
            Value::Object(o) => write!(f, "{}", o.to_json()),
        }
    }
}
