//! Proxy server configuration.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Default upstream feed: the IPAWS-OPEN recent-alerts endpoint.
pub const DEFAULT_FEED_URL: &str =
    "https://tdl.apps.fema.gov/IPAWSOPEN_EAS_SERVICE/rest/eas/recent/2023-08-21T11:40:43";

/// Configuration for the proxy: upstream polling, cache expiry, and the
/// HTTP listener.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP server to.
    pub bind_addr: SocketAddr,
    /// Upstream XML feed URL.
    pub feed_url: String,
    /// Fixed period between refresh cycles.
    pub refresh_interval: Duration,
    /// Bounded timeout on each upstream fetch.
    pub fetch_timeout: Duration,
    /// Directory holding the durable cache snapshot.
    pub state_dir: PathBuf,
    /// Expiration for durable cache entries.
    pub durable_ttl: Duration,
    /// How many alerts to retain per refresh.
    pub max_retained: usize,
    /// Sort alerts by their `sent` field instead of trusting feed order.
    pub sort_by_sent: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 4000)),
            feed_url: DEFAULT_FEED_URL.to_string(),
            refresh_interval: Duration::from_secs(30),
            fetch_timeout: Duration::from_secs(10),
            state_dir: PathBuf::from("/var/lib/easproxy"),
            durable_ttl: Duration::from_secs(86_400),
            max_retained: 2,
            sort_by_sent: false,
        }
    }
}

impl ServerConfig {
    /// Create a new configuration with the specified bind address.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            ..Self::default()
        }
    }

    /// Set the upstream feed URL.
    #[must_use]
    pub fn with_feed_url(mut self, url: impl Into<String>) -> Self {
        self.feed_url = url.into();
        self
    }

    /// Set the refresh interval.
    #[must_use]
    pub const fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    /// Set the upstream fetch timeout.
    #[must_use]
    pub const fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Set the durable state directory.
    #[must_use]
    pub fn with_state_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.state_dir = dir.into();
        self
    }

    /// Set the durable entry expiration.
    #[must_use]
    pub const fn with_durable_ttl(mut self, ttl: Duration) -> Self {
        self.durable_ttl = ttl;
        self
    }

    /// Set how many alerts are retained per refresh.
    #[must_use]
    pub const fn with_max_retained(mut self, max: usize) -> Self {
        self.max_retained = max;
        self
    }

    /// Sort alerts by `sent` instead of trusting feed order.
    #[must_use]
    pub const fn with_sort_by_sent(mut self, enabled: bool) -> Self {
        self.sort_by_sent = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();

        assert_eq!(config.bind_addr.port(), 4000);
        assert_eq!(config.feed_url, DEFAULT_FEED_URL);
        assert_eq!(config.refresh_interval, Duration::from_secs(30));
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
        assert_eq!(config.durable_ttl, Duration::from_secs(86_400));
        assert_eq!(config.max_retained, 2);
        assert!(!config.sort_by_sent);
    }

    #[test]
    fn test_config_builder() {
        let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 9000);
        let config = ServerConfig::new(addr)
            .with_feed_url("http://localhost:9999/feed")
            .with_refresh_interval(Duration::from_secs(10))
            .with_fetch_timeout(Duration::from_secs(3))
            .with_state_dir("/tmp/eas-test")
            .with_durable_ttl(Duration::from_secs(3600))
            .with_max_retained(1)
            .with_sort_by_sent(true);

        assert_eq!(config.bind_addr, addr);
        assert_eq!(config.feed_url, "http://localhost:9999/feed");
        assert_eq!(config.refresh_interval, Duration::from_secs(10));
        assert_eq!(config.fetch_timeout, Duration::from_secs(3));
        assert_eq!(config.state_dir, PathBuf::from("/tmp/eas-test"));
        assert_eq!(config.durable_ttl, Duration::from_secs(3600));
        assert_eq!(config.max_retained, 1);
        assert!(config.sort_by_sent);
    }
}
