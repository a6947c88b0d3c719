//! # Graph Object Model
//!
//! The untyped side of the crate: values, stores and sequences.
//! Everything a facade reads or writes goes through these types.
//!
//! Design rule: no facade or identity logic here. This module is pure data
//! plus the lazy wrapping that keeps it materialized exactly once.

pub mod value;
pub mod raw;
pub mod slot;
pub mod object;
pub mod sequence;

pub use value::Value;
pub use raw::{RawMap, RawValue};
pub use slot::WrapState;
pub use object::{GraphObject, IntoGraphObject, Keys};
pub use sequence::{Sequence, SequenceIter};
