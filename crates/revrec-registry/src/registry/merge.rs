//! Insertion, merging, and the index maintenance behind identity mutation.

use revrec_core::events::types::{EmailResolvedEvent, IdentitiesMergedEvent, IdentityCreatedEvent};
use revrec_core::{IdentityId, RegistryError};

use super::{Registry, Slot};
use crate::identity::{normalize_email, Identity};
use crate::warnings::IndexWarning;

impl Registry {
    /// Insert an identity and return its handle.
    ///
    /// With an email, the identity is stored under it (replacing any previous
    /// holder, last write wins) and every name-only identity sharing one of
    /// its names is merged into it. Without an email, it is stored under each
    /// of its names; if one of those names already belongs to an emailed
    /// identity, it is merged into that identity instead and the returned
    /// handle forwards there.
    pub fn add(&mut self, identity: Identity) -> Result<IdentityId, RegistryError> {
        if identity.email().is_none() && identity.names().is_empty() {
            return Err(RegistryError::MissingIdentifier);
        }

        let names = identity.names().to_vec();
        match identity.email().map(str::to_owned) {
            Some(email) => {
                let id = self.insert_slot(identity);
                if let Some(previous) = self.key_email(&email, id) {
                    self.warn(IndexWarning::EmailOverwritten {
                        email: email.clone(),
                        previous,
                        replacement: id,
                    });
                    self.release_if_orphaned(previous);
                }
                for name in &names {
                    self.attach_name_to_email(id, &email, name);
                }
                Ok(id)
            }
            None => {
                let known_owner = names
                    .iter()
                    .filter_map(|name| self.name_to_email.get(name))
                    .find_map(|email| self.by_email.get(email))
                    .copied();
                let id = self.insert_slot(identity);
                if let Some(base) = known_owner {
                    self.merge_inner(base, id, true);
                    return Ok(id);
                }
                for name in names {
                    self.index_name(id, name);
                }
                Ok(id)
            }
        }
    }

    /// Merge `other` into `base` and detach `other` from the indexes.
    /// Returns `false` when nothing changed (same identity, or already merged).
    pub fn merge(&mut self, base: IdentityId, other: IdentityId) -> bool {
        self.merge_inner(base, other, true)
    }

    /// Merge `other` into `base`; `other` stays indexed when `remove_other`
    /// is false.
    pub fn merge_with(&mut self, base: IdentityId, other: IdentityId, remove_other: bool) -> bool {
        self.merge_inner(base, other, remove_other)
    }

    /// `base` receives every name of `other` and the average of both scores.
    ///
    /// A pair merges once per mode: after a keeping merge, a removing merge
    /// of the same pair still detaches `other` but leaves the score alone.
    pub(super) fn merge_inner(&mut self, base: IdentityId, other: IdentityId, remove_other: bool) -> bool {
        let (Some(base), Some(other)) = (self.canonical(base), self.canonical(other)) else {
            let id = if self.canonical(base).is_none() { base } else { other };
            self.warn(IndexWarning::StaleIdentity { id });
            return false;
        };
        let previous = self.merged_pairs.get(&(base, other)).copied();
        let repeated = match previous {
            _ if base == other => true,
            Some(removed) => removed || !remove_other,
            None => false,
        };
        if repeated {
            self.warn(IndexWarning::AlreadyMerged { base, other });
            return false;
        }
        self.merged_pairs.insert((base, other), remove_other);
        let completing = previous.is_some();

        let absorbed = if remove_other {
            let slot = std::mem::replace(&mut self.slots[other.index()], Slot::Merged { into: base });
            let Slot::Live(absorbed) = slot else {
                return false;
            };
            self.detach(other, &absorbed);
            absorbed
        } else {
            match self.live(other) {
                Some(identity) => identity.clone(),
                None => return false,
            }
        };

        let score = match self.live_mut(base) {
            Some(identity) => {
                if !completing {
                    identity.set_score((identity.score() + absorbed.score()) / 2.0);
                }
                identity.score()
            }
            None => return false,
        };

        for name in absorbed.names().iter() {
            if remove_other {
                self.absorb_name(base, name);
            } else {
                self.add_name_keeping(base, name);
            }
        }

        // A name-only survivor takes over the email of an absorbed identity.
        if remove_other {
            if let (Some(email), Some(current)) = (absorbed.email(), self.canonical(base)) {
                if self.live(current).is_some_and(|i| i.email().is_none()) {
                    self.set_email_inner(current, email);
                }
            }
        }

        if !completing {
            self.merge_count += 1;
        }
        tracing::info!(%base, %other, score, remove_other, completing, "merged identities");
        self.events.emit_identities_merged(&IdentitiesMergedEvent {
            base,
            other,
            score,
            removed_other: remove_other,
        });
        true
    }

    /// Add a name to an attached identity and keep the indexes consistent.
    pub(super) fn add_name_inner(&mut self, id: IdentityId, name: &str) {
        let Some(id) = self.canonical(id) else {
            self.warn(IndexWarning::StaleIdentity { id });
            return;
        };
        if name.is_empty() {
            self.warn(IndexWarning::EmptyIdentifier);
            return;
        }
        let Some(identity) = self.live_mut(id) else {
            return;
        };
        if identity.names_mut().insert(name) {
            self.claim_name(id, name);
        }
    }

    /// Carry a name of a just-detached identity over to `base`. A name `base`
    /// already has is only re-indexed when the detach left it unresolvable.
    fn absorb_name(&mut self, base: IdentityId, name: &str) {
        let Some(base) = self.canonical(base) else {
            return;
        };
        let inserted = match self.live_mut(base) {
            Some(identity) => identity.names_mut().insert(name),
            None => return,
        };
        if inserted || self.find_by_name(name).is_none() {
            self.claim_name(base, name);
        }
    }

    /// Index `name`, already on `id`, folding whoever else holds it.
    ///
    /// An emailed identity takes the name as an alias. A name-only identity
    /// merges into the emailed owner of the alias if there is one, and
    /// otherwise absorbs the name-only identity keyed by it.
    fn claim_name(&mut self, id: IdentityId, name: &str) {
        let Some(email) = self.live(id).map(|i| i.email().map(str::to_owned)) else {
            return;
        };
        if let Some(email) = email {
            self.attach_name_to_email(id, &email, name);
            return;
        }

        let known_owner = self
            .name_to_email
            .get(name)
            .and_then(|email| self.by_email.get(email))
            .copied();
        if let Some(base) = known_owner.filter(|base| *base != id) {
            self.merge_inner(base, id, true);
            return;
        }

        if let Some(holder) = self.by_name.get(name).copied().filter(|holder| *holder != id) {
            self.merge_inner(id, holder, true);
        }
        if let Some(current) = self.canonical(id) {
            if self.live(current).is_some_and(|i| i.email().is_none()) {
                self.index_name(current, name.to_string());
            }
        }
    }

    /// Name addition during a non-removing merge: `other` keeps its own
    /// index entries, so no reconciliation against `by_name` happens here.
    fn add_name_keeping(&mut self, base: IdentityId, name: &str) {
        let Some(identity) = self.live_mut(base) else {
            return;
        };
        if !identity.names_mut().insert(name) {
            return;
        }
        match identity.email().map(str::to_owned) {
            Some(email) => self.alias_name(name, &email),
            None => {
                if !self.by_name.contains_key(name) {
                    self.key_name(name.to_string(), base);
                }
            }
        }
    }

    /// Set the email of an attached identity.
    ///
    /// If another identity already holds the email, this identity is merged
    /// into it. Otherwise it is stored under the email and every identity
    /// known only by one of its names is merged into it.
    pub(super) fn set_email_inner(&mut self, id: IdentityId, email: &str) {
        let Some(id) = self.canonical(id) else {
            self.warn(IndexWarning::StaleIdentity { id });
            return;
        };
        let Some(email) = normalize_email(email) else {
            self.warn(IndexWarning::EmptyIdentifier);
            return;
        };
        let Some(identity) = self.live_mut(id) else {
            return;
        };
        if let Some(current) = identity.email() {
            let warning = IndexWarning::EmailAlreadySet {
                current: current.to_string(),
                attempted: email,
            };
            self.warn(warning);
            return;
        }
        identity.store_email(email.clone());
        let names = identity.names().to_vec();

        tracing::debug!(%id, email = %email, "email resolved");
        self.events.emit_email_resolved(&EmailResolvedEvent {
            id,
            email: email.clone(),
        });

        match self.by_email.get(&email).copied() {
            Some(existing) if existing != id => {
                self.merge_inner(existing, id, true);
            }
            _ => {
                self.key_email(&email, id);
                for name in &names {
                    self.attach_name_to_email(id, &email, name);
                }
            }
        }
    }

    pub(super) fn add_score_inner(&mut self, id: IdentityId, value: f64, weights: &[f64]) {
        let Some(id) = self.canonical(id) else {
            self.warn(IndexWarning::StaleIdentity { id });
            return;
        };
        let accepted = self
            .live_mut(id)
            .map(|identity| identity.add_score(value, weights))
            .unwrap_or(true);
        if !accepted {
            self.warn(IndexWarning::NonFiniteContribution { id });
        }
    }

    pub(super) fn set_merge_rights_inner(&mut self, id: IdentityId, value: bool) {
        match self.canonical(id).and_then(|id| self.live_mut(id)) {
            Some(identity) => identity.set_merge_rights(value),
            None => self.warn(IndexWarning::StaleIdentity { id }),
        }
    }

    // ---- Index maintenance ----

    fn insert_slot(&mut self, mut identity: Identity) -> IdentityId {
        let id = IdentityId::new(self.slots.len());
        identity.attach(id);
        tracing::debug!(%id, key = identity.display_key(), "identity created");
        self.events.emit_identity_created(&IdentityCreatedEvent {
            id,
            email: identity.email().map(str::to_owned),
            names: identity.names().to_vec(),
        });
        self.slots.push(Slot::Live(identity));
        id
    }

    /// Record `name` as an alias of the identity stored under `email`, and
    /// fold any name-only identity holding `name` into it.
    fn attach_name_to_email(&mut self, base: IdentityId, email: &str, name: &str) {
        self.alias_name(name, email);
        match self.by_name.get(name).copied() {
            Some(holder) if holder == base => self.unkey_name(name),
            Some(holder) => {
                self.merge_inner(base, holder, true);
            }
            None => {}
        }
    }

    /// Point `name` at `email`, reporting an alias taken from another live
    /// emailed identity.
    fn alias_name(&mut self, name: &str, email: &str) {
        let Some(previous) = self.name_to_email.insert(name.to_string(), email.to_string()) else {
            return;
        };
        if previous != email && self.by_email.contains_key(&previous) {
            self.warn(IndexWarning::AliasMoved {
                name: name.to_string(),
                previous,
                email: email.to_string(),
            });
        }
    }

    /// Store a name-only identity under `name`, replacing any previous holder.
    fn index_name(&mut self, id: IdentityId, name: String) {
        if let Some(previous) = self.key_name(name.clone(), id) {
            self.warn(IndexWarning::NameOverwritten {
                name,
                previous,
                replacement: id,
            });
            self.release_if_orphaned(previous);
        }
    }

    /// Remove `id` from both maps, but only where it is still the stored
    /// value. Only aliases of the identity's own names are dropped.
    fn detach(&mut self, id: IdentityId, identity: &Identity) {
        if let Some(email) = identity.email() {
            if self.by_email.get(email) == Some(&id) {
                self.unkey_email(email);
                for name in identity.names().iter() {
                    if self.name_to_email.get(name).is_some_and(|owner| owner == email) {
                        self.name_to_email.swap_remove(name);
                    }
                }
            }
        }
        for name in identity.names().iter() {
            if self.by_name.get(name) == Some(&id) {
                self.unkey_name(name);
            }
        }
    }

    /// Store `id` under `email`; returns a different identity it replaced.
    fn key_email(&mut self, email: &str, id: IdentityId) -> Option<IdentityId> {
        let previous = self.by_email.insert(email.to_string(), id);
        self.retain_key(id);
        if let Some(previous) = previous {
            self.release_key(previous);
        }
        previous.filter(|previous| *previous != id)
    }

    fn unkey_email(&mut self, email: &str) {
        if let Some(id) = self.by_email.swap_remove(email) {
            self.release_key(id);
        }
    }

    /// Store `id` under `name`; returns a different identity it replaced.
    fn key_name(&mut self, name: String, id: IdentityId) -> Option<IdentityId> {
        let previous = self.by_name.insert(name, id);
        self.retain_key(id);
        if let Some(previous) = previous {
            self.release_key(previous);
        }
        previous.filter(|previous| *previous != id)
    }

    fn unkey_name(&mut self, name: &str) {
        if let Some(id) = self.by_name.swap_remove(name) {
            self.release_key(id);
        }
    }

    fn retain_key(&mut self, id: IdentityId) {
        *self.key_refs.entry(id).or_default() += 1;
    }

    fn release_key(&mut self, id: IdentityId) {
        if let Some(count) = self.key_refs.get_mut(&id) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.key_refs.remove(&id);
            }
        }
    }

    /// Drop an identity no key refers to any more.
    fn release_if_orphaned(&mut self, id: IdentityId) {
        if self.key_refs.contains_key(&id) {
            return;
        }
        if let Some(slot) = self.slots.get_mut(id.index()) {
            if matches!(slot, Slot::Live(_)) {
                tracing::info!(%id, "identity replaced by overwrite");
                *slot = Slot::Dropped;
            }
        }
    }
}
