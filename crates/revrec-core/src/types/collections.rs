//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxBuildHasher, FxHashMap, FxHashSet};

/// Insertion-ordered map with the Fx hasher. Used wherever iteration order
/// must be deterministic for a given input order.
pub type FxIndexMap<K, V> = indexmap::IndexMap<K, V, FxBuildHasher>;

/// Insertion-ordered set with the Fx hasher.
pub type FxIndexSet<T> = indexmap::IndexSet<T, FxBuildHasher>;
