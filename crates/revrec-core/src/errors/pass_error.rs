//! Recommendation pass errors and non-fatal warning collection.

use super::error_code::RevrecErrorCode;
use super::{ConfigError, RegistryError, SignalError};

/// Errors that abort a recommendation pass.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PassError {
    #[error("Signal error: {0}")]
    Signal(#[from] SignalError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl RevrecErrorCode for PassError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Signal(e) => e.error_code(),
            Self::Registry(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}

/// Result of a pass that accumulates non-fatal warnings alongside the data.
/// Allows a best-effort result to be returned even when the identity data
/// was noisy.
#[derive(Debug, Default)]
pub struct PassResult<T: Default, W = String> {
    /// The successful result data.
    pub data: T,
    /// Non-fatal warnings collected during the pass.
    pub warnings: Vec<W>,
}

impl<T: Default, W> PassResult<T, W> {
    /// Create a new result with no warnings.
    pub fn new(data: T) -> Self {
        Self {
            data,
            warnings: Vec::new(),
        }
    }

    /// Add a non-fatal warning to the result.
    pub fn add_warning(&mut self, warning: W) {
        self.warnings.push(warning);
    }

    /// Returns true if there are no warnings.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Returns the number of warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}
