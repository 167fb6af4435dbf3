pub mod routes;

use std::sync::Arc;

use wakehub_common::config::Config;

/// Shared application state threaded through axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}
