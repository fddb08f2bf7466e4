//! Borrow-scoped mutation handle for attached identities.

use revrec_core::IdentityId;

use super::Registry;
use crate::identity::Identity;

/// Mutable view of one identity inside a [`Registry`].
///
/// Every mutation is routed through the registry so that a new email or name
/// updates the indexes (and may merge this identity with another). If that
/// happens the handle keeps following the surviving identity.
pub struct IdentityMut<'a> {
    registry: &'a mut Registry,
    id: IdentityId,
}

impl<'a> IdentityMut<'a> {
    pub(super) fn new(registry: &'a mut Registry, id: IdentityId) -> Self {
        Self { registry, id }
    }

    /// Handle of the identity this view currently points at.
    pub fn id(&self) -> IdentityId {
        self.registry.canonical(self.id).unwrap_or(self.id)
    }

    pub fn get(&self) -> Option<&Identity> {
        self.registry.get(self.id)
    }

    /// Set-once email. A second call is recorded as a warning and ignored.
    pub fn set_email(&mut self, email: &str) -> &mut Self {
        self.registry.set_email_inner(self.id, email);
        self
    }

    pub fn add_name(&mut self, name: &str) -> &mut Self {
        self.registry.add_name_inner(self.id, name);
        self
    }

    /// Add `value` times every weight to the score.
    pub fn add_score(&mut self, value: f64, weights: &[f64]) -> &mut Self {
        self.registry.add_score_inner(self.id, value, weights);
        self
    }

    pub fn set_merge_rights(&mut self, value: bool) -> &mut Self {
        self.registry.set_merge_rights_inner(self.id, value);
        self
    }
}
