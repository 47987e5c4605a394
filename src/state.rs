use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state, handed to every route through `axum::extract::State`.
pub struct AppState {
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Arc<Self> {
        Arc::new(Self { config })
    }
}
