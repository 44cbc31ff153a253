//! Durable per-player save storage with slot rotation.
//!
//! This library keeps a small "recent" window of the latest saves per player
//! for fast continue access, and archives displaced saves into a per-day
//! coalesced "history" window. An identity map binds stable ident tokens
//! (e.g. device tokens) to players so saves can be looked up without knowing
//! the player id.
//!
//! # Quick Start
//!
//! ```ignore
//! use save_vault::prelude::*;
//!
//! // Initialize a store with the default retention policy
//! let store = SaveStore::init(".save-vault", RetentionPolicy::default())?;
//!
//! // Submit a save; the resulting recent/history windows are returned
//! let slots = store.submit(SaveRecord {
//!     player_id: "p1".into(),
//!     ident: "device-abc".into(),
//!     device_description: "Chrome Browser".into(),
//!     time_stamp: "2026-08-04T12:00:00Z".into(),
//!     save_data: serde_json::json!({"score": 100}),
//! })?;
//!
//! // Look the player up by ident token
//! let slots = store.fetch_by_ident("device-abc")?;
//! ```
//!
//! # Modules
//!
//! - [`store`] - Durable slot store, identity map and rotation (requires `store` feature)
//! - [`server`] - HTTP API server on top of the store (requires `server` feature)
//!
//! # Feature Flags
//!
//! - `store` - Enable the durable slot store (enabled by default)
//! - `logging` - Enable library-level tracing (consumers provide their own subscriber)
//! - `server` - Enable the HTTP API server
//! - `full` - Enable all features

mod logging;
pub mod prelude;
#[cfg(feature = "server")]
pub mod server;
#[cfg(feature = "store")]
pub mod store;

mod error;

// Re-export the unified error type
pub use error::{Error, Result};

// Re-export store types at crate root for convenience
#[cfg(feature = "store")]
pub use store::{
    IdentityMap, PlayerSlots, RetentionPolicy, SaveRecord, SaveStore, StoreError, rotate_in,
};
