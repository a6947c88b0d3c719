//! Raw tree types as handed over by the data-acquisition side.
//!
//! A raw tree is the parsed response body before anything has looked at it.
//! Nothing here allocates; the aliases only name the boundary.

/// One raw node: scalar, raw sequence or raw mapping.
pub type RawValue = serde_json::Value;

/// A raw mapping, the only root shape a store can wrap.
pub type RawMap = serde_json::Map<String, RawValue>;

/// Type name of a raw node, using the same vocabulary as `Value::type_name`.
pub fn raw_type_name(raw: &RawValue) -> &'static str {
    match raw {
        RawValue::Null => "NULL",
        RawValue::Bool(_) => "BOOLEAN",
        RawValue::Number(n) if n.is_i64() => "INTEGER",
        RawValue::Number(_) => "FLOAT",
        RawValue::String(_) => "STRING",
        RawValue::Array(_) => "SEQUENCE",
        RawValue::Object(_) => "OBJECT",
    }
}

/// True for raw mappings and raw sequences.
pub(crate) fn is_container(raw: &RawValue) -> bool {
    matches!(raw, RawValue::Array(_) | RawValue::Object(_))
}
