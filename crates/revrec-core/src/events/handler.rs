//! RegistryEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Trait for observing registry events.
///
/// Handlers only override the events they care about. `Send + Sync` is
/// required so one handler can be shared by registries built on different
/// threads.
pub trait RegistryEventHandler: Send + Sync {
    fn on_identity_created(&self, _event: &IdentityCreatedEvent) {}
    fn on_identities_merged(&self, _event: &IdentitiesMergedEvent) {}
    fn on_email_resolved(&self, _event: &EmailResolvedEvent) {}
    fn on_index_warning(&self, _event: &IndexWarningEvent) {}
}
