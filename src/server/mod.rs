//! HTTP API server for save-vault.
//!
//! This module provides an HTTP API on top of the save-vault store using
//! axum. It exposes save submission, lookup by player or ident token,
//! listing, and purge operations over versioned JSON endpoints.

mod config;
mod error;
mod logging;
mod routes;
mod state;

pub use config::{
    Config, ConfigError, CorsConfig, LogFormat, LoggingConfig, ServerConfig, StorageConfig,
};
pub use error::ApiError;
pub use logging::init as init_logging;
pub use routes::router;
pub use state::AppState;
