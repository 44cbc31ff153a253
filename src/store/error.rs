//! Error types for the slot store module.

use thiserror::Error;

/// Errors that can occur during slot store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Fjall error: {0}")]
    Fjall(#[from] fjall::Error),

    #[error("Encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Ident '{ident}' is already bound to player '{bound_to}'")]
    IdentConflict { ident: String, bound_to: String },

    #[error("No saves found for player: {0}")]
    PlayerNotFound(String),

    #[error("Ident not bound to any player: {0}")]
    IdentNotFound(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Store not initialized at {0}")]
    NotInitialized(String),
}
