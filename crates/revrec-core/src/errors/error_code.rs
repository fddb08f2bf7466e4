//! RevrecErrorCode trait for structured error codes.

/// Trait for attaching a stable error code to every error enum.
/// Consumers (CLI tool, evaluation harness) match on the code rather
/// than on the display text.
pub trait RevrecErrorCode {
    /// Returns the error code string (e.g., "NOT_FOUND").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted coded string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const INVALID_IDENTITY: &str = "INVALID_IDENTITY";
pub const MISSING_IDENTIFIER: &str = "MISSING_IDENTIFIER";
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const SIGNAL_ERROR: &str = "SIGNAL_ERROR";
