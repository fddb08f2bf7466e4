//! Identity hints carried by signal input records.

use revrec_core::{IdentityId, SignalError};
use revrec_registry::{Key, Registry};
use serde::{Deserialize, Serialize};

/// Who a contribution is about: an email, a display name, or both.
///
/// Empty strings count as absent. A hint with neither is rejected when it is
/// resolved, not when it is built, since records usually arrive deserialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonRef {
    pub email: Option<String>,
    pub name: Option<String>,
}

impl PersonRef {
    pub fn new(email: Option<&str>, name: Option<&str>) -> Self {
        Self {
            email: email.map(str::to_owned),
            name: name.map(str::to_owned),
        }
    }

    pub fn by_email(email: &str) -> Self {
        Self::new(Some(email), None)
    }

    pub fn by_name(name: &str) -> Self {
        Self::new(None, Some(name))
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().filter(|e| !e.is_empty())
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    /// Get or create the identity this hint describes.
    ///
    /// The email is preferred as key; a name given alongside it is attached
    /// as an alias, which folds any identity known only by that name into
    /// the emailed one.
    pub fn resolve(&self, registry: &mut Registry, signal: &str) -> Result<IdentityId, SignalError> {
        match (self.email(), self.name()) {
            (Some(email), name) => {
                let mut handle = registry.get_or_create_by_email(email)?;
                if let Some(name) = name {
                    handle.add_name(name);
                }
                Ok(handle.id())
            }
            (None, Some(name)) => Ok(registry.get_or_create_by_name(name)?.id()),
            (None, None) => Err(SignalError::InvalidInput {
                signal: signal.to_string(),
                message: "person has neither email nor name".to_string(),
            }),
        }
    }

    /// Existing identity for this hint, without creating one.
    pub fn find(&self, registry: &Registry) -> Option<IdentityId> {
        let by_email = self
            .email()
            .and_then(|email| registry.resolve(&Key::Email(email.to_string())));
        by_email.or_else(|| {
            self.name()
                .and_then(|name| registry.resolve(&Key::Name(name.to_string())))
        })
    }
}
