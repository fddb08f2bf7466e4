//! Index-based ID types for arena-stored values.
//!
//! Each ID type wraps a slot index to prevent cross-type confusion.

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl $name {
            /// Create a new ID from a slot index.
            pub fn new(index: usize) -> Self {
                Self(index as u32)
            }

            /// Get the slot index.
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "#{}", self.0)
            }
        }
    };
}

define_id!(
    /// Handle to an identity slot inside a registry.
    IdentityId
);
