//! Sequence — ordered, possibly heterogeneous list of values.
//!
//! Elements are wrapped the same way store entries are: a raw mapping
//! element becomes a `GraphObject` the first time that element is read, and
//! stays that same instance afterwards. Scalar elements are left alone.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Serialize, Serializer};

use super::raw::RawValue;
use super::slot::{Slot, WrapState};
use super::Value;

/// Handle to a shared, lazily wrapped list.
#[derive(Clone, Default)]
pub struct Sequence {
    items: Rc<RefCell<Vec<Slot>>>,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_raw(items: Vec<RawValue>) -> Self {
        let items = items.into_iter().map(Slot::Unwrapped).collect();
        Self { items: Rc::new(RefCell::new(items)) }
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// Element at `index`, wrapping a raw container element on first read.
    pub fn get(&self, index: usize) -> Option<Value> {
        let mut items = self.items.borrow_mut();
        items.get_mut(index).map(|slot| slot.read(&index))
    }

    pub fn push(&self, value: impl Into<Value>) {
        self.items.borrow_mut().push(Slot::Wrapped(value.into()));
    }

    pub fn push_raw(&self, raw: RawValue) {
        self.items.borrow_mut().push(Slot::Unwrapped(raw));
    }

    /// Overwrite the element at `index`. Returns false if out of bounds.
    pub fn set(&self, index: usize, value: impl Into<Value>) -> bool {
        match self.items.borrow_mut().get_mut(index) {
            Some(slot) => {
                *slot = Slot::Wrapped(value.into());
                true
            }
            None => false,
        }
    }

    pub fn wrap_state(&self, index: usize) -> Option<WrapState> {
        self.items.borrow().get(index).map(Slot::state)
    }

    /// Iterate the elements in order, wrapping each one as it is reached.
    pub fn iter(&self) -> SequenceIter {
        SequenceIter { sequence: self.clone(), next: 0 }
    }

    /// Read every element.
    pub fn to_vec(&self) -> Vec<Value> {
        self.iter().collect()
    }

    pub fn ptr_eq(&self, other: &Sequence) -> bool {
        Rc::ptr_eq(&self.items, &other.items)
    }

    /// Raw snapshot. Does not wrap anything.
    pub fn to_json(&self) -> RawValue {
        RawValue::Array(self.items.borrow().iter().map(Slot::to_raw).collect())
    }
}

impl PartialEq for Sequence {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Sequence {}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.items.try_borrow() {
            Ok(items) => f.debug_list().entries(items.iter()).finish(),
            Err(_) => f.write_str("Sequence(<borrowed>)"),
        }
    }
}

impl Serialize for Sequence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<V: Into<Value>> FromIterator<V> for Sequence {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let items = iter.into_iter().map(|v| Slot::Wrapped(v.into())).collect();
        Self { items: Rc::new(RefCell::new(items)) }
    }
}

impl IntoIterator for &Sequence {
    type Item = Value;
    type IntoIter = SequenceIter;

    fn into_iter(self) -> SequenceIter {
        self.iter()
    }
}

/// Lazy iterator over a [`Sequence`]. Reads the live sequence by index.
#[derive(Debug, Clone)]
pub struct SequenceIter {
    sequence: Sequence,
    next: usize,
}

impl Iterator for SequenceIter {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        let value = self.sequence.get(self.next)?;
        self.next += 1;
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_seq(raw: RawValue) -> Sequence {
        match Value::from_raw(raw) {
            Value::Sequence(s) => s,
            other => panic!("expected sequence, got {}", other.type_name()),
        }
    }

    #[test]
    fn test_mapping_elements_wrap_lazily() {
        let seq = raw_seq(json!([{"id": "1"}, "plain", {"id": "2"}]));
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.wrap_state(0), Some(WrapState::Unwrapped));

        let first = seq.get(0).unwrap();
        assert_eq!(seq.wrap_state(0), Some(WrapState::Wrapped));
        assert_eq!(seq.wrap_state(2), Some(WrapState::Unwrapped));

        let again = seq.get(0).unwrap();
        assert!(first.as_object().unwrap().ptr_eq(again.as_object().unwrap()));
    }

    #[test]
    fn test_scalar_elements_untouched() {
        let seq = raw_seq(json!(["plain", 4]));
        assert_eq!(seq.get(0), Some(Value::from("plain")));
        assert_eq!(seq.wrap_state(0), Some(WrapState::Unwrapped));
        assert_eq!(seq.get(1), Some(Value::Int(4)));
    }

    #[test]
    fn test_out_of_bounds() {
        let seq = Sequence::new();
        assert_eq!(seq.get(0), None);
        assert!(!seq.set(0, 1));
        seq.push(1);
        assert!(seq.set(0, 2));
        assert_eq!(seq.get(0), Some(Value::Int(2)));
    }

    #[test]
    fn test_iter_wraps_every_container() {
        let seq = raw_seq(json!([{"a": 1}, {"a": 2}]));
        let values = seq.to_vec();
        assert_eq!(values.len(), 2);
        assert_eq!(seq.wrap_state(1), Some(WrapState::Wrapped));
        assert_eq!(seq.to_json(), json!([{"a": 1}, {"a": 2}]));
    }

    #[test]
    fn test_collect_and_push_raw() {
        let seq: Sequence = vec![1, 2].into_iter().collect();
        seq.push_raw(json!({"x": true}));
        assert_eq!(seq.wrap_state(2), Some(WrapState::Unwrapped));
        assert_eq!(seq.to_json(), json!([1, 2, {"x": true}]));
    }
}
