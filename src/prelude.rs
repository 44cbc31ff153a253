//! Convenient re-exports for common usage patterns.
//!
//! This module provides a single import to bring all commonly used types
//! into scope.
//!
//! # Example
//!
//! ```ignore
//! use save_vault::prelude::*;
//!
//! let store = SaveStore::init(".save-vault", RetentionPolicy::default())?;
//! let slots = store.fetch_by_player("p1")?;
//! ```

// Unified error handling
pub use crate::error::{Error, Result};

// Slot store types (requires "store" feature)
#[cfg(feature = "store")]
pub use crate::store::{
    IdentityMap, PlayerSlots, RetentionPolicy, SaveRecord, SaveStore, StoreError, rotate_in,
};
