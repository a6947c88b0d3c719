//! GraphObject — the untyped store behind one graph node.
//!
//! A `GraphObject` is an opaque handle: clones share the same storage and
//! equality is reference equality. Absence of a key is an ordinary state,
//! never an error.
//!
//! ## Ownership
//!
//! The handle is `!Send` and `!Sync`. Lazy wrapping rewrites slots during
//! reads, so a store and every handle into its subtree belong to one thread.
//! Callers that need to share data across threads should ship the raw tree
//! (`to_json`) and wrap it again on the other side.
//!
//! Stores are trees. Placing a store inside its own subtree creates a cycle
//! that `to_json`, `Debug` and `Serialize` do not detect.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use hashbrown::HashMap;
use serde::{Serialize, Serializer};

use super::raw::{raw_type_name, RawMap, RawValue};
use super::slot::{Slot, WrapState};
use super::Value;
use crate::{Error, Result};

/// Untyped, mutable store of one graph node.
#[derive(Clone, Default)]
pub struct GraphObject {
    slots: Rc<RefCell<HashMap<String, Slot>>>,
}

impl GraphObject {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a raw mapping, or hand back an existing store unchanged.
    ///
    /// A raw mapping's entries are moved into the store as they are; nested
    /// containers are not visited until read.
    pub fn wrap(source: impl IntoGraphObject) -> Self {
        source.into_graph_object()
    }

    pub(crate) fn from_raw_map(map: RawMap) -> Self {
        let slots = map
            .into_iter()
            .map(|(key, raw)| (key, Slot::Unwrapped(raw)))
            .collect::<HashMap<_, _>>();
        Self { slots: Rc::new(RefCell::new(slots)) }
    }

    /// Number of keys currently present.
    pub fn count(&self) -> usize {
        self.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.slots.borrow().contains_key(key)
    }

    /// Value at `key`, or `None` if absent.
    ///
    /// A raw mapping or raw sequence is wrapped on the first read and the
    /// wrapped handle replaces it in place; later reads return the same
    /// instance.
    pub fn get(&self, key: &str) -> Option<Value> {
        let mut slots = self.slots.borrow_mut();
        slots.get_mut(key).map(|slot| slot.read(&key))
    }

    /// Insert or overwrite `key` with an already materialized value.
    ///
    /// Raw trees go through [`set_raw`](Self::set_raw) so they stay unwrapped.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.slots
            .borrow_mut()
            .insert(key.into(), Slot::Wrapped(value.into()));
    }

    /// Insert or overwrite `key` with a raw node that stays unwrapped until read.
    pub fn set_raw(&self, key: impl Into<String>, raw: RawValue) {
        self.slots
            .borrow_mut()
            .insert(key.into(), Slot::Unwrapped(raw));
    }

    /// Delete `key`. Returns whether it was present; removing an absent key is a no-op.
    pub fn remove(&self, key: &str) -> bool {
        self.slots.borrow_mut().remove(key).is_some()
    }

    /// Snapshot of the keys present right now.
    ///
    /// The iterator owns its keys; clone it to restart. Mutations made
    /// after the call are not reflected.
    pub fn keys(&self) -> Keys {
        let keys: Vec<String> = self.slots.borrow().keys().cloned().collect();
        Keys { inner: keys.into_iter() }
    }

    /// Run `f` on the slot at `key` without materializing it.
    pub(crate) fn peek<R>(&self, key: &str, f: impl FnOnce(&Slot) -> R) -> Option<R> {
        self.slots.borrow().get(key).map(f)
    }

    /// Wrap state of the slot at `key`, or `None` if absent.
    pub fn wrap_state(&self, key: &str) -> Option<WrapState> {
        self.slots.borrow().get(key).map(Slot::state)
    }

    /// True if both handles point at the same storage.
    pub fn ptr_eq(&self, other: &GraphObject) -> bool {
        Rc::ptr_eq(&self.slots, &other.slots)
    }

    /// Raw snapshot of the whole subtree. Unwrapped slots are copied as they
    /// are and stay unwrapped.
    pub fn to_json(&self) -> RawValue {
        let slots = self.slots.borrow();
        RawValue::Object(
            slots
                .iter()
                .map(|(key, slot)| (key.clone(), slot.to_raw()))
                .collect(),
        )
    }

    /// Deserialize a snapshot of this store into a concrete type.
    pub fn deserialize_into<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.to_json())?)
    }
}

impl PartialEq for GraphObject {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for GraphObject {}

impl fmt::Debug for GraphObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.slots.try_borrow() {
            Ok(slots) => f.debug_map().entries(slots.iter()).finish(),
            Err(_) => f.write_str("GraphObject(<borrowed>)"),
        }
    }
}

impl Serialize for GraphObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl From<RawMap> for GraphObject {
    fn from(map: RawMap) -> Self {
        Self::from_raw_map(map)
    }
}

impl TryFrom<RawValue> for GraphObject {
    type Error = Error;

    fn try_from(raw: RawValue) -> Result<Self> {
        match raw {
            RawValue::Object(map) => Ok(Self::from_raw_map(map)),
            other => Err(Error::TypeError {
                expected: "OBJECT".into(),
                got: raw_type_name(&other).into(),
            }),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for GraphObject {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let object = GraphObject::new();
        for (key, value) in iter {
            object.set(key, value);
        }
        object
    }
}

// ============================================================================
// Wrapping
// ============================================================================

/// Sources a store can be produced from by [`GraphObject::wrap`].
pub trait IntoGraphObject {
    fn into_graph_object(self) -> GraphObject;
}

impl IntoGraphObject for GraphObject {
    fn into_graph_object(self) -> GraphObject {
        self
    }
}

impl IntoGraphObject for &GraphObject {
    fn into_graph_object(self) -> GraphObject {
        self.clone()
    }
}

impl IntoGraphObject for RawMap {
    fn into_graph_object(self) -> GraphObject {
        GraphObject::from_raw_map(self)
    }
}

// ============================================================================
// Keys
// ============================================================================

/// Owned snapshot of a store's keys.
#[derive(Debug, Clone)]
pub struct Keys {
    inner: std::vec::IntoIter<String>,
}

impl Iterator for Keys {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Keys {}
