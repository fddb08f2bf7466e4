//! Error handling for the reviewer recommender.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod pass_error;
pub mod registry_error;
pub mod signal_error;

pub use config_error::ConfigError;
pub use error_code::RevrecErrorCode;
pub use pass_error::{PassError, PassResult};
pub use registry_error::RegistryError;
pub use signal_error::SignalError;
