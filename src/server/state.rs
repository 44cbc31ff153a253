//! Application state management.

use std::sync::Arc;

use crate::store::SaveStore;

use super::config::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The save store instance.
    store: Arc<SaveStore>,
}

impl AppState {
    /// Create a new AppState from configuration, opening the store at the
    /// configured path or initializing it on first run.
    pub fn from_config(config: &Config) -> Result<Self, StateError> {
        let path = std::path::Path::new(&config.storage.path);

        let store = if path.exists() {
            SaveStore::open(path, config.retention).map_err(|e| StateError::OpenStore {
                path: config.storage.path.clone(),
                source: e,
            })?
        } else {
            SaveStore::init(path, config.retention).map_err(|e| StateError::InitStore {
                path: config.storage.path.clone(),
                source: e,
            })?
        };

        Ok(Self {
            store: Arc::new(store),
        })
    }

    /// The save store.
    pub fn store(&self) -> &SaveStore {
        &self.store
    }
}

/// Errors that can occur when setting up application state.
#[derive(Debug)]
pub enum StateError {
    /// Failed to open an existing store.
    OpenStore {
        path: String,
        source: crate::store::StoreError,
    },
    /// Failed to initialize a new store.
    InitStore {
        path: String,
        source: crate::store::StoreError,
    },
}

impl std::fmt::Display for StateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateError::OpenStore { path, source } => {
                write!(f, "Failed to open store at '{}': {}", path, source)
            }
            StateError::InitStore { path, source } => {
                write!(f, "Failed to initialize store at '{}': {}", path, source)
            }
        }
    }
}

impl std::error::Error for StateError {}
