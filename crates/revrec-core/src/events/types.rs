//! Event payloads emitted by the registry.

use serde::{Deserialize, Serialize};

use crate::types::IdentityId;

/// A fresh identity was inserted into the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityCreatedEvent {
    pub id: IdentityId,
    pub email: Option<String>,
    pub names: Vec<String>,
}

/// `other` was folded into `base`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentitiesMergedEvent {
    pub base: IdentityId,
    pub other: IdentityId,
    /// Score of `base` after averaging.
    pub score: f64,
    /// Whether `other` was detached from the indexes.
    pub removed_other: bool,
}

/// An identity that was only known by name now has an email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailResolvedEvent {
    pub id: IdentityId,
    pub email: String,
}

/// A recoverable index condition was hit and degraded gracefully.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexWarningEvent {
    /// Stable warning kind (e.g. "email_overwritten").
    pub kind: String,
    pub message: String,
}
