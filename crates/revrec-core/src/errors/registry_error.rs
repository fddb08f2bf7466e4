//! Registry errors. Only the fatal cases live here; recoverable index
//! conditions are reported as warnings by the registry itself.

use super::error_code::{self, RevrecErrorCode};

/// Errors raised by identity construction, insertion, and lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Identity needs an email or at least one name")]
    InvalidIdentity,

    #[error("Cannot add an identity without an email or any name")]
    MissingIdentifier,

    #[error("No identity found for {key}")]
    NotFound { key: String },
}

impl RevrecErrorCode for RegistryError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidIdentity => error_code::INVALID_IDENTITY,
            Self::MissingIdentifier => error_code::MISSING_IDENTIFIER,
            Self::NotFound { .. } => error_code::NOT_FOUND,
        }
    }
}
