use std::sync::Arc;

use billcraft_store::RecordStore;

use crate::config::ServerConfig;

/// Shared application state accessible to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Invoice record store.
    pub store: Arc<dyn RecordStore>,

    /// Configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, config: ServerConfig) -> Self {
        Self { store, config: Arc::new(config) }
    }
}
