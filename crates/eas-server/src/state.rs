//! Shared state for the HTTP server.

use std::sync::Arc;

use eas_cache::AlertCache;

use crate::config::ServerConfig;

/// State shared by all HTTP handlers.
///
/// Handlers only ever read the cache; the refresh scheduler holds the
/// sole write path.
#[derive(Debug)]
pub struct AppState {
    config: ServerConfig,
    cache: Arc<AlertCache>,
}

impl AppState {
    /// Create the shared state.
    #[must_use]
    pub fn new(config: ServerConfig, cache: Arc<AlertCache>) -> Self {
        Self { config, cache }
    }

    /// The server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// The shared alert cache.
    #[must_use]
    pub fn cache(&self) -> &AlertCache {
        &self.cache
    }
}
