//! Registry of recommended identities for one recommendation pass.
//!
//! Identities live in an arena of slots and are keyed redundantly:
//! - `by_email`: email → identity, for identities with a known email
//! - `by_name`: name → identity, for identities known only by name
//! - `name_to_email`: name → email, aliases of emailed identities
//!
//! Once an identity is stored under `by_email`, none of its names remain keys
//! of `by_name`. The distinct people in the registry are the union of the
//! values of both maps.
//!
//! When one identity is merged into another its slot becomes a tombstone that
//! forwards to the survivor, so [`IdentityId`]s held by callers keep working.

mod handle;
mod merge;
mod ranking;

use std::sync::Arc;

use revrec_core::events::{EventDispatcher, RegistryEventHandler};
use revrec_core::types::{FxHashMap, FxHashSet, FxIndexMap};
use revrec_core::{IdentityId, RegistryError};

use crate::identity::{normalize_email, Identity};
use crate::warnings::IndexWarning;

pub use handle::IdentityMut;

/// Lookup key for an identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Email(String),
    Name(String),
}

#[derive(Debug, Clone)]
enum Slot {
    Live(Identity),
    /// Folded into another identity; lookups follow the forward.
    Merged { into: IdentityId },
    /// Replaced by a last-write-wins overwrite and unreachable from any key.
    Dropped,
}

#[derive(Debug, Default)]
pub struct Registry {
    slots: Vec<Slot>,
    by_email: FxIndexMap<String, IdentityId>,
    by_name: FxIndexMap<String, IdentityId>,
    name_to_email: FxIndexMap<String, String>,
    /// Pairs merged so far, with whether `other` was removed.
    merged_pairs: FxHashMap<(IdentityId, IdentityId), bool>,
    /// Number of `by_email`/`by_name` keys per identity.
    key_refs: FxHashMap<IdentityId, usize>,
    merge_count: usize,
    warnings: Vec<IndexWarning>,
    events: EventDispatcher,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer for registry events.
    pub fn register_handler(&mut self, handler: Arc<dyn RegistryEventHandler>) {
        self.events.register(handler);
    }

    // ---- Lookup ----

    /// Exact match on the lower-cased email.
    pub fn get_by_email(&self, email: &str) -> Option<&Identity> {
        self.find_by_email(email).and_then(|id| self.live(id))
    }

    /// Resolve a name through the email alias table first, then the
    /// name-only index.
    pub fn get_by_name(&self, name: &str) -> Option<&Identity> {
        self.find_by_name(name).and_then(|id| self.live(id))
    }

    /// Resolve a tagged key to the current identity handle.
    pub fn resolve(&self, key: &Key) -> Option<IdentityId> {
        match key {
            Key::Email(email) => self.find_by_email(email),
            Key::Name(name) => self.find_by_name(name),
        }
    }

    /// Item lookup: tries `key` as an email, then as a name.
    pub fn lookup(&self, key: &str) -> Result<&Identity, RegistryError> {
        self.get_by_email(key)
            .or_else(|| self.get_by_name(key))
            .ok_or_else(|| RegistryError::NotFound {
                key: key.to_string(),
            })
    }

    /// The identity behind `id`, following merge forwards.
    pub fn get(&self, id: IdentityId) -> Option<&Identity> {
        self.canonical(id).and_then(|id| self.live(id))
    }

    /// Mutation handle for `id`, following merge forwards.
    pub fn identity_mut(&mut self, id: IdentityId) -> Option<IdentityMut<'_>> {
        let id = self.canonical(id)?;
        Some(IdentityMut::new(self, id))
    }

    /// Current handle for `id` after following merge forwards, or `None` if
    /// the identity was dropped by an overwrite.
    pub fn canonical(&self, id: IdentityId) -> Option<IdentityId> {
        let mut current = id;
        // A forward chain can never be longer than the arena.
        for _ in 0..=self.slots.len() {
            match self.slots.get(current.index())? {
                Slot::Live(_) => return Some(current),
                Slot::Merged { into } => current = *into,
                Slot::Dropped => return None,
            }
        }
        None
    }

    // ---- Creation ----

    /// Existing identity for `email`, or a fresh one keyed by it.
    pub fn get_or_create_by_email(&mut self, email: &str) -> Result<IdentityMut<'_>, RegistryError> {
        let id = match self.find_by_email(email) {
            Some(id) => id,
            None => self.add(Identity::with_email(email)?)?,
        };
        Ok(IdentityMut::new(self, id))
    }

    /// Existing identity for `name`, or a fresh name-only one.
    pub fn get_or_create_by_name(&mut self, name: &str) -> Result<IdentityMut<'_>, RegistryError> {
        let id = match self.find_by_name(name) {
            Some(id) => id,
            None => self.add(Identity::with_name(name)?)?,
        };
        Ok(IdentityMut::new(self, id))
    }

    // ---- Introspection ----

    /// Number of distinct people.
    pub fn len(&self) -> usize {
        self.recommendation_ids().count()
    }

    pub fn is_empty(&self) -> bool {
        self.by_email.is_empty() && self.by_name.is_empty()
    }

    /// Number of merges performed so far.
    pub fn merge_count(&self) -> usize {
        self.merge_count
    }

    /// Warnings collected since the registry was created or last drained.
    pub fn warnings(&self) -> &[IndexWarning] {
        &self.warnings
    }

    pub fn take_warnings(&mut self) -> Vec<IndexWarning> {
        std::mem::take(&mut self.warnings)
    }

    /// Distinct identities: emailed ones in insertion order, then name-only.
    pub fn recommendations(&self) -> impl Iterator<Item = &Identity> + '_ {
        self.recommendation_ids().filter_map(|id| self.live(id))
    }

    pub(crate) fn recommendation_ids(&self) -> impl Iterator<Item = IdentityId> + '_ {
        let mut seen = FxHashSet::default();
        self.by_email
            .values()
            .chain(self.by_name.values())
            .copied()
            .filter(move |id| seen.insert(*id))
    }

    // ---- Internals ----

    fn find_by_email(&self, email: &str) -> Option<IdentityId> {
        let email = normalize_email(email)?;
        self.by_email.get(&email).copied()
    }

    fn find_by_name(&self, name: &str) -> Option<IdentityId> {
        self.name_to_email
            .get(name)
            .and_then(|email| self.by_email.get(email))
            .or_else(|| self.by_name.get(name))
            .copied()
    }

    fn live(&self, id: IdentityId) -> Option<&Identity> {
        match self.slots.get(id.index()) {
            Some(Slot::Live(identity)) => Some(identity),
            _ => None,
        }
    }

    fn live_mut(&mut self, id: IdentityId) -> Option<&mut Identity> {
        match self.slots.get_mut(id.index()) {
            Some(Slot::Live(identity)) => Some(identity),
            _ => None,
        }
    }

    fn warn(&mut self, warning: IndexWarning) {
        if warning.is_notice() {
            tracing::info!(kind = warning.kind(), %warning, "registry index notice");
        } else {
            tracing::warn!(kind = warning.kind(), %warning, "registry index warning");
        }
        self.events.emit_index_warning(&warning.to_event());
        self.warnings.push(warning);
    }
}
