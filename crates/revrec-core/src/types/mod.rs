//! Data structures shared across the workspace.

pub mod collections;
pub mod identifiers;

pub use collections::{FxHashMap, FxHashSet, FxIndexMap, FxIndexSet};
pub use identifiers::IdentityId;
