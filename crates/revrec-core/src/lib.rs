//! Shared foundation for the reviewer recommender: configuration, errors,
//! events, weights, tracing setup, and collection aliases.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod tracing;
pub mod traits;
pub mod types;

pub use config::RevrecConfig;
pub use errors::{ConfigError, PassError, RegistryError, RevrecErrorCode, SignalError};
pub use types::IdentityId;
