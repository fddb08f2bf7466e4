//! Signal producer errors.

use super::error_code::{self, RevrecErrorCode};
use super::RegistryError;

/// Errors that can occur while a signal source contributes to the registry.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Invalid input for signal {signal}: {message}")]
    InvalidInput { signal: String, message: String },
}

impl RevrecErrorCode for SignalError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Registry(e) => e.error_code(),
            Self::InvalidInput { .. } => error_code::SIGNAL_ERROR,
        }
    }
}
