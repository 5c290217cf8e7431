//! Proxy server implementation and startup sequencing.

use std::net::SocketAddr;
use std::sync::Arc;

use eas_cache::{AlertCache, JsonFileStore};
use eas_feed::{FeedOrder, Normalizer};
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::fetch::FeedFetcher;
use crate::routes::create_router;
use crate::scheduler::RefreshScheduler;
use crate::state::AppState;

/// HTTP server for the proxy API.
///
/// Serves the cached alert state; the cache is injected so tests (and the
/// scheduler) can share it.
#[derive(Debug, Clone)]
pub struct ProxyServer {
    state: Arc<AppState>,
}

impl ProxyServer {
    /// Create a server over an existing cache.
    #[must_use]
    pub fn new(config: ServerConfig, cache: Arc<AlertCache>) -> Self {
        let state = Arc::new(AppState::new(config, cache));
        Self { state }
    }

    /// Get the shared state for external access.
    #[must_use]
    pub fn state(&self) -> Arc<AppState> {
        self.state.clone()
    }

    /// Create the router without starting the server.
    ///
    /// Useful for testing or embedding in another server.
    #[must_use]
    pub fn router(&self) -> axum::Router {
        create_router(self.state.clone())
    }

    /// Start the server and listen for connections.
    ///
    /// # Errors
    ///
    /// Returns an error if binding to the address fails.
    pub async fn serve(&self, addr: SocketAddr) -> ServerResult<()> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindFailed(addr, e))?;

        info!(addr = %addr, "proxy server listening");

        axum::serve(listener, self.router())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;

        Ok(())
    }

    /// Start the server with graceful shutdown support.
    ///
    /// # Errors
    ///
    /// Returns an error if binding to the address fails.
    pub async fn serve_with_shutdown<F>(&self, addr: SocketAddr, shutdown: F) -> ServerResult<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindFailed(addr, e))?;

        info!(addr = %addr, "proxy server listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;

        info!("proxy server shut down");
        Ok(())
    }

    /// Run the whole proxy: restore the cache, start the refresh loop,
    /// then listen.
    ///
    /// The steps are strictly ordered so the very first request never
    /// races cache population: the durable restore completes (success or
    /// not) before the listener binds, and the spawned scheduler fires
    /// its first cycle immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the listen
    /// address cannot be bound.
    pub async fn start(config: ServerConfig) -> ServerResult<()> {
        let store = JsonFileStore::new(&config.state_dir);
        let cache = Arc::new(AlertCache::new(Box::new(store), Some(config.durable_ttl)));

        let restored = cache.restore_on_startup().await;
        info!(restored, "durable cache restore attempted");

        let fetcher = FeedFetcher::new(config.feed_url.clone(), config.fetch_timeout)?;
        let order = if config.sort_by_sent {
            FeedOrder::SentDesc
        } else {
            FeedOrder::FeedOrder
        };
        let normalizer = Normalizer::new()
            .with_max_retained(config.max_retained)
            .with_order(order);

        let scheduler = RefreshScheduler::new(
            fetcher,
            normalizer,
            cache.clone(),
            config.refresh_interval,
        );
        tokio::spawn(scheduler.run());

        let addr = config.bind_addr;
        let server = Self::new(config, cache);
        server.serve(addr).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eas_cache::MemoryStore;

    fn make_test_server() -> ProxyServer {
        let cache = Arc::new(AlertCache::new(Box::new(MemoryStore::new()), None));
        ProxyServer::new(ServerConfig::default(), cache)
    }

    #[test]
    fn test_server_creation_and_clone() {
        let server = make_test_server();
        let cloned = server.clone();

        // Both share the same state.
        assert!(Arc::ptr_eq(&server.state(), &cloned.state()));
    }

    #[tokio::test]
    async fn test_router_creation() {
        let server = make_test_server();
        let _router = server.router();
    }

    #[tokio::test]
    async fn test_serve_with_shutdown() {
        let server = make_test_server();
        let addr = SocketAddr::from(([127, 0, 0, 1], 0));

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let server_handle = tokio::spawn(async move {
            server
                .serve_with_shutdown(addr, async move {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        let _ = shutdown_tx.send(());

        let result =
            tokio::time::timeout(std::time::Duration::from_secs(1), server_handle).await;

        assert!(result.is_ok());
    }
}
