//! EventDispatcher: synchronous event dispatch with zero overhead when empty.

use std::sync::Arc;

use super::handler::RegistryEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
#[derive(Clone, Default)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn RegistryEventHandler>>,
}

impl EventDispatcher {
    /// Create a new empty dispatcher.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Register an event handler.
    pub fn register(&mut self, handler: Arc<dyn RegistryEventHandler>) {
        self.handlers.push(handler);
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Emit an event to all registered handlers.
    /// A panicking handler does not stop delivery to the ones after it.
    fn emit<F: Fn(&dyn RegistryEventHandler)>(&self, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                tracing::warn!("registry event handler panicked");
            }
        }
    }

    pub fn emit_identity_created(&self, event: &IdentityCreatedEvent) {
        self.emit(|h| h.on_identity_created(event));
    }

    pub fn emit_identities_merged(&self, event: &IdentitiesMergedEvent) {
        self.emit(|h| h.on_identities_merged(event));
    }

    pub fn emit_email_resolved(&self, event: &EmailResolvedEvent) {
        self.emit(|h| h.on_email_resolved(event));
    }

    pub fn emit_index_warning(&self, event: &IndexWarningEvent) {
        self.emit(|h| h.on_index_warning(event));
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
