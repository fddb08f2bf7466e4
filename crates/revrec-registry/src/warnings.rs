//! Recoverable index conditions.
//!
//! None of these abort the operation that hit them: the registry degrades to
//! a no-op or a last-write-wins update, records the warning, and carries on.

use std::fmt;

use revrec_core::events::types::IndexWarningEvent;
use revrec_core::IdentityId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IndexWarning {
    /// An email was set on an identity that already had one; ignored.
    EmailAlreadySet { current: String, attempted: String },
    /// An empty email or name was supplied; ignored.
    EmptyIdentifier,
    /// A direct `add` replaced the identity stored under an email.
    EmailOverwritten {
        email: String,
        previous: IdentityId,
        replacement: IdentityId,
    },
    /// A direct `add` replaced the identity stored under a name.
    NameOverwritten {
        name: String,
        previous: IdentityId,
        replacement: IdentityId,
    },
    /// A name alias moved from one emailed identity to another.
    AliasMoved {
        name: String,
        previous: String,
        email: String,
    },
    /// The pair was merged before; nothing was changed.
    AlreadyMerged { base: IdentityId, other: IdentityId },
    /// The handle refers to an identity that was overwritten and dropped.
    StaleIdentity { id: IdentityId },
    /// A contribution whose weighted value was NaN or infinite; skipped.
    NonFiniteContribution { id: IdentityId },
}

impl IndexWarning {
    /// Stable snake_case kind, used in events and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmailAlreadySet { .. } => "email_already_set",
            Self::EmptyIdentifier => "empty_identifier",
            Self::EmailOverwritten { .. } => "email_overwritten",
            Self::NameOverwritten { .. } => "name_overwritten",
            Self::AliasMoved { .. } => "alias_moved",
            Self::AlreadyMerged { .. } => "already_merged",
            Self::StaleIdentity { .. } => "stale_identity",
            Self::NonFiniteContribution { .. } => "non_finite_contribution",
        }
    }

    /// Overwrites and repeated merges are expected on noisy input and are
    /// logged at info; everything else at warn.
    pub fn is_notice(&self) -> bool {
        matches!(
            self,
            Self::EmailOverwritten { .. }
                | Self::NameOverwritten { .. }
                | Self::AliasMoved { .. }
                | Self::AlreadyMerged { .. }
        )
    }

    pub fn to_event(&self) -> IndexWarningEvent {
        IndexWarningEvent {
            kind: self.kind().to_string(),
            message: self.to_string(),
        }
    }
}

impl fmt::Display for IndexWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmailAlreadySet { current, attempted } => {
                write!(f, "email already set to {current}, ignoring {attempted}")
            }
            Self::EmptyIdentifier => write!(f, "empty email or name ignored"),
            Self::EmailOverwritten {
                email,
                previous,
                replacement,
            } => write!(f, "email {email} moved from {previous} to {replacement}"),
            Self::NameOverwritten {
                name,
                previous,
                replacement,
            } => write!(f, "name {name:?} moved from {previous} to {replacement}"),
            Self::AliasMoved {
                name,
                previous,
                email,
            } => write!(f, "alias {name:?} moved from {previous} to {email}"),
            Self::AlreadyMerged { base, other } => {
                write!(f, "{other} is already merged into {base}")
            }
            Self::StaleIdentity { id } => write!(f, "identity {id} no longer exists"),
            Self::NonFiniteContribution { id } => {
                write!(f, "non-finite contribution to {id} skipped")
            }
        }
    }
}
