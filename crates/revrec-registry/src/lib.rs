//! # revrec-registry
//!
//! Accumulates weighted signal contributions into per-person recommendation
//! records, merging records that turn out to describe the same person.
//!
//! ## Modules
//! - **identity**: one recommended person (email, names, score, merge rights)
//! - **names**: insertion-ordered name set owned by each identity
//! - **registry**: dual email/name keyed arena with merge and ranking
//! - **warnings**: recoverable index conditions reported per registry

pub mod identity;
pub mod names;
pub mod registry;
pub mod warnings;

pub use identity::Identity;
pub use names::NameIndex;
pub use registry::{IdentityMut, Key, Registry};
pub use revrec_core::IdentityId;
pub use warnings::IndexWarning;
