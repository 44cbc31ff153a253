//! Durable slot store for per-player save records.
//!
//! This module provides a persistent store where each player owns a bounded
//! "recent" window of save records plus a per-day coalesced "history" window,
//! and an identity map binding stable ident tokens to players. Values are
//! stored as JSON documents in a fjall database.

mod error;
mod identity;
mod record;
mod rotation;
mod store;

pub use error::StoreError;
pub use identity::IdentityMap;
pub use record::{PlayerSlots, SaveRecord};
pub use rotation::{RetentionPolicy, rotate_in};
pub use store::SaveStore;
