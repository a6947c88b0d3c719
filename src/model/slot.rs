//! Per-slot wrap state for lazily materialized raw containers.
//!
//! Every entry of a store and every element of a sequence lives in a
//! [`Slot`]. A slot starts `Unwrapped` when it holds a raw node and moves to
//! `Wrapped` the first time a raw mapping or raw sequence is read through it.
//! The transition is one-way; only overwriting the slot resets it.

use std::fmt;

use tracing::trace;

use super::raw::{is_container, raw_type_name, RawValue};
use super::Value;

/// Observable wrap state of one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WrapState {
    /// Holds a raw node that has not been materialized.
    Unwrapped,
    /// Holds a materialized value (a store or sequence handle, or a value set directly).
    Wrapped,
}

#[derive(Debug, Clone)]
pub(crate) enum Slot {
    Unwrapped(RawValue),
    Wrapped(Value),
}

impl Slot {
    pub(crate) fn state(&self) -> WrapState {
        match self {
            Slot::Unwrapped(_) => WrapState::Unwrapped,
            Slot::Wrapped(_) => WrapState::Wrapped,
        }
    }

    /// Read the slot. A raw container is converted one level deep, written
    /// back in place, and the stored handle is returned, so every later read
    /// yields the same instance. Raw scalars are converted on the way out and
    /// left as they are.
    pub(crate) fn read(&mut self, location: &dyn fmt::Display) -> Value {
        match self {
            Slot::Wrapped(value) => value.clone(),
            Slot::Unwrapped(raw) if is_container(raw) => {
                let kind = raw_type_name(raw);
                let value = Value::from_raw(std::mem::take(raw));
                trace!(%location, kind, "materialized raw container");
                *self = Slot::Wrapped(value.clone());
                value
            }
            Slot::Unwrapped(raw) => Value::from_raw(raw.clone()),
        }
    }

    /// Raw snapshot of the slot. Never materializes.
    pub(crate) fn to_raw(&self) -> RawValue {
        match self {
            Slot::Unwrapped(raw) => raw.clone(),
            Slot::Wrapped(value) => value.to_json(),
        }
    }
}

impl From<Value> for Slot {
    fn from(value: Value) -> Self {
        Slot::Wrapped(value)
    }
}

impl From<RawValue> for Slot {
    fn from(raw: RawValue) -> Self {
        Slot::Unwrapped(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_read_stays_unwrapped() {
        let mut slot = Slot::from(json!("Paris"));
        assert_eq!(slot.read(&"city"), Value::from("Paris"));
        assert_eq!(slot.state(), WrapState::Unwrapped);
    }

    #[test]
    fn test_container_read_wraps_once() {
        let mut slot = Slot::from(json!({"city": "Paris"}));
        let first = slot.read(&"location");
        assert_eq!(slot.state(), WrapState::Wrapped);
        let second = slot.read(&"location");
        assert!(first.as_object().unwrap().ptr_eq(second.as_object().unwrap()));
    }

    #[test]
    fn test_to_raw_does_not_materialize() {
        let slot = Slot::from(json!([{"a": 1}]));
        assert_eq!(slot.to_raw(), json!([{"a": 1}]));
        assert_eq!(slot.state(), WrapState::Unwrapped);
    }
}
