use crate::config::ServerConfig;
use crate::esv::EsvClient;
use std::sync::Arc;

/// Shared, immutable per-process state handed to every handler. Nothing here
/// mutates after startup, so requests stay fully independent.
pub struct AppState {
    config: Arc<ServerConfig>,
    esv: EsvClient,
}

impl AppState {
    pub fn new(config: Arc<ServerConfig>) -> Self {
        let esv = EsvClient::new(&config);
        Self { config, esv }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn esv(&self) -> &EsvClient {
        &self.esv
    }
}
