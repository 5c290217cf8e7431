//! easproxy - EAS feed proxy daemon
//!
//! Polls an upstream XML feed of emergency alert messages, caches the
//! newest alerts, and serves the cached state over a small HTTP API.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use eas_server::{ProxyServer, ServerConfig, config::DEFAULT_FEED_URL};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "easproxy")]
#[command(about = "Emergency alert feed proxy")]
#[command(version)]
struct Cli {
    /// Upstream XML feed URL
    #[arg(long, env = "EAS_FEED_URL", default_value = DEFAULT_FEED_URL)]
    feed_url: String,

    /// Port to listen on
    #[arg(long, env = "EAS_PORT", default_value_t = 4000)]
    port: u16,

    /// Seconds between refresh cycles
    #[arg(long, env = "EAS_REFRESH_INTERVAL_SECS", default_value_t = 30)]
    refresh_interval_secs: u64,

    /// Timeout in seconds for each upstream fetch
    #[arg(long, env = "EAS_FETCH_TIMEOUT_SECS", default_value_t = 10)]
    fetch_timeout_secs: u64,

    /// Directory for the durable cache snapshot
    #[arg(long, env = "EAS_STATE_DIR", default_value = "/var/lib/easproxy")]
    state_dir: PathBuf,

    /// Seconds before durable cache entries expire
    #[arg(long, env = "EAS_DURABLE_TTL_SECS", default_value_t = 86_400)]
    durable_ttl_secs: u64,

    /// How many alerts to retain per refresh
    #[arg(long, env = "EAS_MAX_RETAINED", default_value_t = 2)]
    max_retained: usize,

    /// Sort alerts by their `sent` field instead of trusting feed order
    #[arg(long, env = "EAS_SORT_BY_SENT")]
    sort_by_sent: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eas_server=info,eas_cache=info,eas_feed=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let config = ServerConfig::new(SocketAddr::from(([0, 0, 0, 0], cli.port)))
        .with_feed_url(cli.feed_url)
        .with_refresh_interval(Duration::from_secs(cli.refresh_interval_secs))
        .with_fetch_timeout(Duration::from_secs(cli.fetch_timeout_secs))
        .with_state_dir(cli.state_dir)
        .with_durable_ttl(Duration::from_secs(cli.durable_ttl_secs))
        .with_max_retained(cli.max_retained)
        .with_sort_by_sent(cli.sort_by_sent);

    tracing::info!(
        feed_url = %config.feed_url,
        interval_secs = config.refresh_interval.as_secs(),
        port = config.bind_addr.port(),
        "easproxy starting"
    );

    ProxyServer::start(config).await?;
    Ok(())
}
