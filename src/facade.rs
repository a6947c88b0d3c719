//! # Facade Views
//!
//! A facade is a named set of typed properties laid over a [`GraphObject`].
//! Resolving one is a cast: it wraps the store handle and never fails.
//! Property reads go through `get` and report absence as `None`, both for a
//! missing key and for a value of the wrong shape. Property writes go
//! through `set` and are visible to every other view of the same store.
//!
//! Facades are declared with [`graph_facade!`](crate::graph_facade):
//!
//! ```rust
//! use graph_object::{graph_facade, GraphObject};
//!
//! graph_facade! {
//!     /// A thing with a title.
//!     pub struct Titled {
//!         title, set_title: String;
//!         views, set_views: i64 => "view_count";
//!     }
//! }
//!
//! let object = GraphObject::new();
//! let titled: Titled = object.view();
//! assert_eq!(titled.title(), None);
//!
//! titled.set_views(3);
//! assert_eq!(object.get("view_count").and_then(|v| v.as_int()), Some(3));
//! ```

use crate::model::{GraphObject, Sequence, Value};

/// A typed view over a store.
///
/// Implemented by [`graph_facade!`](crate::graph_facade); hand-written
/// implementations must keep `from_object` infallible.
pub trait Facade: Sized {
    /// Declared name of the facade.
    const NAME: &'static str;

    /// View `object` through this facade.
    fn from_object(object: GraphObject) -> Self;

    /// The underlying store.
    fn object(&self) -> &GraphObject;

    fn into_object(self) -> GraphObject;

    /// View the same store through another facade.
    fn cast<G: Facade>(&self) -> G {
        G::from_object(self.object().clone())
    }
}

/// Shape-checked conversion between a stored [`Value`] and a property type.
pub trait FacadeValue: Sized {
    /// `None` when the value does not have this type's shape.
    fn from_value(value: Value) -> Option<Self>;

    fn into_value(self) -> Value;
}

impl GraphObject {
    /// Resolve a facade view over this store. Always succeeds.
    pub fn view<F: Facade>(&self) -> F {
        F::from_object(self.clone())
    }

    /// Typed read of `key`. Absent and shape-mismatched values are `None`.
    pub fn get_as<T: FacadeValue>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(T::from_value)
    }

    /// Typed write of `key`.
    pub fn set_as<T: FacadeValue>(&self, key: impl Into<String>, value: T) {
        self.set(key, value.into_value());
    }
}

// ============================================================================
// FacadeValue impls
// ============================================================================

impl FacadeValue for Value {
    fn from_value(value: Value) -> Option<Self> { Some(value) }
    fn into_value(self) -> Value { self }
}

impl FacadeValue for String {
    fn from_value(value: Value) -> Option<Self> { value.into_string() }
    fn into_value(self) -> Value { Value::String(self) }
}

impl FacadeValue for bool {
    fn from_value(value: Value) -> Option<Self> { value.as_bool() }
    fn into_value(self) -> Value { Value::Bool(self) }
}

impl FacadeValue for i64 {
    fn from_value(value: Value) -> Option<Self> { value.as_int() }
    fn into_value(self) -> Value { Value::Int(self) }
}

impl FacadeValue for f64 {
    fn from_value(value: Value) -> Option<Self> { value.as_float() }
    fn into_value(self) -> Value { Value::Float(self) }
}

impl FacadeValue for GraphObject {
    fn from_value(value: Value) -> Option<Self> { value.into_object() }
    fn into_value(self) -> Value { Value::Object(self) }
}

impl FacadeValue for Sequence {
    fn from_value(value: Value) -> Option<Self> { value.into_sequence() }
    fn into_value(self) -> Value { Value::Sequence(self) }
}

/// Elements that do not convert are skipped.
impl<T: FacadeValue> FacadeValue for Vec<T> {
    fn from_value(value: Value) -> Option<Self> {
        let sequence = value.into_sequence()?;
        Some(sequence.iter().filter_map(T::from_value).collect())
    }

    fn into_value(self) -> Value {
        Value::Sequence(self.into_iter().map(FacadeValue::into_value).collect())
    }
}

// ============================================================================
// Declaration macro
// ============================================================================

/// Declare a facade over [`GraphObject`].
///
/// Each property names a getter, a setter and a type. The store key
/// defaults to the getter's name; `=> "key"` binds another one.
///
/// The generated type holds only the store handle. It implements
/// [`Facade`], [`FacadeValue`] (so it can be nested in other facades or in
/// `Vec`), and `Deref<Target = GraphObject>` so the untyped accessors stay
/// reachable. Equality is store identity.
#[macro_export]
macro_rules! graph_facade {
    (@key $getter:ident $key:literal) => { $key };
    (@key $getter:ident) => { stringify!($getter) };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$prop_meta:meta])*
                $getter:ident, $setter:ident : $ty:ty $(=> $key:literal)?;
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        $vis struct $name {
            object: $crate::GraphObject,
        }

        impl $crate::Facade for $name {
            const NAME: &'static str = stringify!($name);

            fn from_object(object: $crate::GraphObject) -> Self {
                Self { object }
            }

            fn object(&self) -> &$crate::GraphObject {
                &self.object
            }

            fn into_object(self) -> $crate::GraphObject {
                self.object
            }
        }

        impl $crate::FacadeValue for $name {
            fn from_value(value: $crate::Value) -> ::std::option::Option<Self> {
                value.into_object().map(<Self as $crate::Facade>::from_object)
            }

            fn into_value(self) -> $crate::Value {
                $crate::Value::Object(self.object)
            }
        }

        impl ::std::ops::Deref for $name {
            type Target = $crate::GraphObject;

            fn deref(&self) -> &$crate::GraphObject {
                &self.object
            }
        }

        impl ::std::convert::From<$crate::GraphObject> for $name {
            fn from(object: $crate::GraphObject) -> Self {
                Self { object }
            }
        }

        #[allow(dead_code)]
        impl $name {
            $(
                $(#[$prop_meta])*
                pub fn $getter(&self) -> ::std::option::Option<$ty> {
                    self.object.get_as::<$ty>($crate::graph_facade!(@key $getter $($key)?))
                }

                pub fn $setter(&self, value: impl ::std::convert::Into<$ty>) {
                    self.object.set_as::<$ty>($crate::graph_facade!(@key $getter $($key)?), value.into());
                }
            )*
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    crate::graph_facade! {
        struct Named {
            name, set_name: String;
            rank, set_rank: i64 => "position";
            tags, set_tags: Vec<String>;
            parent, set_parent: Named;
        }
    }

    fn store(raw: serde_json::Value) -> GraphObject {
        GraphObject::try_from(raw).unwrap()
    }

    #[test]
    fn test_resolution_never_fails() {
        let named: Named = GraphObject::new().view();
        assert_eq!(named.name(), None);
        assert_eq!(named.rank(), None);
        assert_eq!(named.parent(), None);
        assert_eq!(Named::NAME, "Named");
    }

    #[test]
    fn test_shape_mismatch_reads_none() {
        let named: Named = store(json!({"name": 12, "position": "first"})).view();
        assert_eq!(named.name(), None);
        assert_eq!(named.rank(), None);
        assert_eq!(named.get("name"), Some(Value::Int(12)));
    }

    #[test]
    fn test_key_override() {
        let object = store(json!({"position": 2}));
        let named: Named = object.view();
        assert_eq!(named.rank(), Some(2));
        named.set_rank(5);
        assert_eq!(object.get("position"), Some(Value::Int(5)));
        assert!(!object.contains_key("rank"));
    }

    #[test]
    fn test_sequence_property_skips_mismatches() {
        let named: Named = store(json!({"tags": ["a", 1, "b"]})).view();
        assert_eq!(named.tags(), Some(vec!["a".to_string(), "b".to_string()]));
        named.set_tags(vec!["c".to_string()]);
        assert_eq!(named.to_json(), json!({"tags": ["c"]}));
    }

    #[test]
    fn test_nested_facade_shares_store() {
        let object = store(json!({"parent": {"name": "root"}}));
        let named: Named = object.view();
        let parent = named.parent().unwrap();
        assert_eq!(parent.name().as_deref(), Some("root"));
        assert!(parent.object().ptr_eq(&object.get_as::<GraphObject>("parent").unwrap()));
    }

    #[test]
    fn test_cast_between_facades() {
        crate::graph_facade! {
            struct Ranked {
                position, set_position: i64;
            }
        }
        let named: Named = GraphObject::new().view();
        named.set_rank(9);
        let ranked: Ranked = named.cast();
        assert_eq!(ranked.position(), Some(9));
        assert!(ranked.object().ptr_eq(named.object()));
    }

    #[test]
    fn test_f64_accepts_integers() {
        let object = store(json!({"lat": 48}));
        assert_eq!(object.get_as::<f64>("lat"), Some(48.0));
        assert_eq!(object.get_as::<bool>("lat"), None);
    }

    #[test]
    fn test_out_of_range_int_reads_none() {
        let object = store(json!({"n": 1e20, "m": -1e20, "big": 18446744073709551615_u64, "ok": 1e3}));
        assert_eq!(object.get_as::<i64>("n"), None);
        assert_eq!(object.get_as::<i64>("m"), None);
        assert_eq!(object.get_as::<i64>("big"), None);
        assert_eq!(object.get_as::<i64>("ok"), Some(1000));
        assert_eq!(object.get_as::<f64>("n"), Some(1e20));
    }
}
