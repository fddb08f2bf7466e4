//! Insertion-ordered set of display names.
//!
//! Names are case-sensitive and stored once. `insert` only reports whether a
//! name is new; an identity attached to a registry is mutated through
//! [`IdentityMut`](crate::IdentityMut), which re-indexes every new name.

use revrec_core::types::FxIndexSet;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameIndex {
    names: FxIndexSet<String>,
}

impl NameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `name` unless it is empty or already present.
    /// Returns `true` when the set changed.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if name.is_empty() {
            return false;
        }
        self.names.insert(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }

    /// First name seen for this person.
    pub fn first(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for NameIndex {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut index = Self::new();
        for name in iter {
            index.insert(name);
        }
        index
    }
}
