//! Node identity.
//!
//! Two stores denote the same remote node when both carry the same
//! non-empty identifier. When neither carries one, only the same storage
//! instance counts as the same node. When only one side carries one, the
//! answer is no.

use tracing::debug;

use crate::model::slot::Slot;
use crate::model::{GraphObject, RawValue, Value};

/// Key holding a node's declared identifier.
pub const ID_KEY: &str = "id";

/// Which key identity comparison reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityConfig {
    pub key: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self { key: ID_KEY.to_owned() }
    }
}

impl IdentityConfig {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// The identifier of `object` as a string, if it has a usable one.
    ///
    /// Strings are taken as they are, integers by their exact decimal
    /// digits. Empty strings, floats, null, booleans and containers carry no
    /// identity. The slot is inspected in place and never materialized.
    pub fn identity_of(&self, object: &GraphObject) -> Option<String> {
        object.peek(&self.key, slot_identity).flatten()
    }

    pub fn is_same(&self, a: &GraphObject, b: &GraphObject) -> bool {
        match (self.identity_of(a), self.identity_of(b)) {
            (Some(left), Some(right)) => left == right,
            (None, None) => {
                debug!(key = %self.key, "no identity on either side, comparing by reference");
                a.ptr_eq(b)
            }
            _ => false,
        }
    }
}

fn slot_identity(slot: &Slot) -> Option<String> {
    match slot {
        Slot::Unwrapped(RawValue::String(s)) if !s.is_empty() => Some(s.clone()),
        Slot::Unwrapped(RawValue::Number(n)) if n.is_i64() || n.is_u64() => Some(n.to_string()),
        Slot::Wrapped(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Slot::Wrapped(Value::Int(i)) => Some(i.to_string()),
        Slot::Wrapped(Value::UInt(u)) => Some(u.to_string()),
        _ => None,
    }
}

/// Whether `a` and `b` denote the same graph node, keyed on `"id"`.
pub fn is_same_graph_object(a: &GraphObject, b: &GraphObject) -> bool {
    IdentityConfig::default().is_same(a, b)
}

impl GraphObject {
    /// The node's declared identifier under `"id"`.
    pub fn identity(&self) -> Option<String> {
        IdentityConfig::default().identity_of(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WrapState;
    use serde_json::json;

    fn raw(value: RawValue) -> GraphObject {
        GraphObject::try_from(value).unwrap()
    }

    fn with_id(id: impl Into<Value>) -> GraphObject {
        let object = GraphObject::new();
        object.set(ID_KEY, id);
        object
    }

    #[test]
    fn test_equal_ids() {
        assert!(is_same_graph_object(&with_id("123"), &with_id("123")));
        assert!(!is_same_graph_object(&with_id("123"), &with_id("124")));
    }

    // Assumption: integer ids compare by their decimal digits, so a numeric
    // id and its string form name the same node.
    #[test]
    fn test_numeric_id_matches_string_id() {
        assert!(is_same_graph_object(&with_id(123), &with_id("123")));
    }

    #[test]
    fn test_u64_range_ids_keep_exact_digits() {
        let a = raw(json!({"id": 18446744073709551615_u64}));
        let b = raw(json!({"id": 18446744073709551614_u64}));
        assert_eq!(a.identity().as_deref(), Some("18446744073709551615"));
        assert_eq!(b.identity().as_deref(), Some("18446744073709551614"));
        assert!(!is_same_graph_object(&a, &b));
        assert!(is_same_graph_object(&a, &raw(json!({"id": "18446744073709551615"}))));

        // Same answer once the slot has been read through `get`.
        let _ = a.get("id");
        assert_eq!(a.identity().as_deref(), Some("18446744073709551615"));
    }

    // Assumption: floats are never identities, even integral ones.
    #[test]
    fn test_float_id_is_no_identity() {
        let float = raw(json!({"id": 1000.0}));
        assert_eq!(float.identity(), None);
        assert_eq!(with_id(1000.0).identity(), None);
        assert!(!is_same_graph_object(&float, &with_id(1000)));
        assert!(!is_same_graph_object(&float, &with_id("1000")));
    }

    #[test]
    fn test_identity_does_not_materialize_id_slot() {
        let object = raw(json!({"id": {"nested": "1"}}));
        assert_eq!(object.identity(), None);
        assert_eq!(object.wrap_state(ID_KEY), Some(WrapState::Unwrapped));
    }

    #[test]
    fn test_one_sided_identity_is_not_same() {
        let anonymous = GraphObject::new();
        assert!(!is_same_graph_object(&with_id("1"), &anonymous));
        assert!(!is_same_graph_object(&anonymous, &with_id("1")));
    }

    #[test]
    fn test_no_identity_falls_back_to_reference() {
        let a = GraphObject::new();
        let b = GraphObject::new();
        assert!(is_same_graph_object(&a, &a.clone()));
        assert!(!is_same_graph_object(&a, &b));
    }

    // Assumption: an empty-string id is treated as no identity.
    #[test]
    fn test_empty_id_counts_as_absent() {
        let a = with_id("");
        let b = with_id("");
        assert_eq!(a.identity(), None);
        assert!(!is_same_graph_object(&a, &b));
        assert!(is_same_graph_object(&a, &a));
        assert!(!is_same_graph_object(&a, &with_id("1")));
    }

    #[test]
    fn test_custom_key() {
        let config = IdentityConfig::new("uid");
        let a = GraphObject::new();
        a.set("uid", "u1");
        let b = GraphObject::new();
        b.set("uid", "u1");
        assert!(config.is_same(&a, &b));
        assert!(!is_same_graph_object(&a, &b));
    }
}
