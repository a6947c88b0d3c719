//! # graph-object — Untyped Graph Data with Typed Facades
//!
//! Remote graph APIs return trees of maps, lists and scalars whose schema
//! drifts independently of client code. This crate stores such a tree as
//! untyped [`GraphObject`]s and lets callers look at the same storage
//! through any declared facade, without adapter code.
//!
//! ## Design Principles
//!
//! 1. **Untyped first**: `count`/`get`/`set`/`remove`/`keys` work on every store, always
//! 2. **Lazy wrapping**: nested raw containers become stores on first read, exactly once
//! 3. **Facades are casts**: resolving a view never fails; missing fields read as `None`
//! 4. **Declared identity**: the `"id"` key decides node equality when both sides have one
//!
//! ## Quick Start
//!
//! ```rust
//! use graph_object::{is_same_graph_object, GraphObject, GraphPlace};
//! use serde_json::json;
//!
//! let raw = json!({
//!     "id": "123",
//!     "name": "Eiffel Tower",
//!     "location": {"city": "Paris", "state": null}
//! });
//! let store = GraphObject::try_from(raw)?;
//!
//! let place: GraphPlace = store.view();
//! let location = place.location().unwrap();
//! assert_eq!(location.city().as_deref(), Some("Paris"));
//! assert_eq!(location.state(), None);
//!
//! // Undeclared fields stay reachable through the untyped surface.
//! assert_eq!(store.get("founded"), None);
//!
//! let other = GraphObject::try_from(json!({"id": "123"}))?;
//! assert!(is_same_graph_object(&store, &other));
//! # Ok::<(), graph_object::Error>(())
//! ```
//!
//! ## Threading
//!
//! Stores are single-owner (`!Send`, `!Sync`). Reads rewrite slots in
//! place, so there is no internal locking and none is needed.

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod facade;
pub mod identity;
pub mod facades;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{
    GraphObject, IntoGraphObject, Keys, RawMap, RawValue, Sequence, SequenceIter, Value,
    WrapState,
};

// ============================================================================
// Re-exports: Facades and identity
// ============================================================================

pub use facade::{Facade, FacadeValue};
pub use facades::{GraphLocation, GraphPlace, GraphUser};
pub use identity::{is_same_graph_object, IdentityConfig, ID_KEY};

// ============================================================================
// Error Types
// ============================================================================

/// Errors at the raw-tree boundary. Store, facade and identity operations
/// themselves do not fail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Type error: expected {expected}, got {got}")]
    TypeError { expected: String, got: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
