//! The periodic refresh scheduler.
//!
//! Drives fetch → decode → normalize → cache-write on a fixed interval.
//! Any stage failing abandons the cycle and leaves the previously cached
//! state untouched; the next tick simply tries again. There is no
//! retry-with-backoff beyond the periodic re-trigger.

use std::sync::Arc;
use std::time::Duration;

use eas_cache::{AlertCache, CacheEntry};
use eas_feed::{Normalizer, decode};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::fetch::FeedFetcher;

/// How one refresh cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Decode and normalize succeeded; the cache now holds fresh state.
    Updated {
        /// Number of alerts written.
        alerts: usize,
    },
    /// The payload was unusable (empty, malformed, or alert-free); the
    /// cache was left untouched.
    Skipped,
    /// The upstream was unreachable; the cache was left untouched.
    Failed,
}

/// Owns the write path to the cache and runs the refresh loop.
///
/// Exactly one scheduler should exist per cache. The loop is a single
/// task that awaits each cycle inline, so cycles never overlap: a slow
/// upstream delays the next tick instead of stacking concurrent fetches.
pub struct RefreshScheduler {
    fetcher: FeedFetcher,
    normalizer: Normalizer,
    cache: Arc<AlertCache>,
    interval: Duration,
}

impl RefreshScheduler {
    /// Create a scheduler over the given fetcher, normalizer, and cache.
    #[must_use]
    pub fn new(
        fetcher: FeedFetcher,
        normalizer: Normalizer,
        cache: Arc<AlertCache>,
        interval: Duration,
    ) -> Self {
        Self {
            fetcher,
            normalizer,
            cache,
            interval,
        }
    }

    /// Run the refresh loop forever.
    ///
    /// The first cycle fires immediately; later cycles follow the
    /// configured interval.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            self.run_once().await;
        }
    }

    /// Run a single refresh cycle end to end.
    pub async fn run_once(&self) -> RefreshOutcome {
        debug!(url = self.fetcher.url(), "fetching feed");
        match self.fetcher.fetch_body().await {
            Ok(body) => self.refresh_from_body(&body).await,
            Err(e) => {
                warn!(error = %e, "feed fetch failed; keeping previous state");
                RefreshOutcome::Failed
            }
        }
    }

    /// Run the decode → normalize → write stages against a fetched body.
    pub async fn refresh_from_body(&self, body: &str) -> RefreshOutcome {
        if body.trim().is_empty() {
            debug!("feed body is empty; skipping cycle");
            return RefreshOutcome::Skipped;
        }

        let tree = match decode(body) {
            Ok(tree) => tree,
            Err(e) => {
                warn!(error = %e, "feed decode failed; keeping previous state");
                return RefreshOutcome::Skipped;
            }
        };

        let alerts = match self.normalizer.normalize(&tree) {
            Ok(alerts) => alerts,
            Err(e) => {
                warn!(error = %e, "feed normalize failed; keeping previous state");
                return RefreshOutcome::Skipped;
            }
        };

        let newest = alerts
            .first()
            .and_then(|a| a.identifier())
            .unwrap_or("<no identifier>")
            .to_string();
        let count = alerts.len();

        let entry = CacheEntry::now(alerts);
        if let Err(e) = self.cache.write(entry).await {
            // In-memory state is already updated; only durability suffered.
            warn!(error = %e, "durable cache write failed");
        }

        info!(alerts = count, newest = %newest, "alert cache updated");
        RefreshOutcome::Updated { alerts: count }
    }
}
