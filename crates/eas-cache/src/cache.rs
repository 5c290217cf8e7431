//! The two-tier alert cache.

use std::time::Duration;

use chrono::{DateTime, Utc};
use eas_feed::AlertRecord;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::entry::CacheEntry;
use crate::error::StoreError;
use crate::store::{ALERT_KEY, DurableStore, UPDATED_KEY};

/// Raw per-tier status for the debug endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheDebug {
    /// Whether the in-memory tier currently holds an entry.
    pub in_memory: bool,
    /// Whether the durable tier currently holds a readable entry.
    pub durable: bool,
    /// The durable tier's entry, if readable.
    pub durable_data: Option<CacheEntry>,
}

/// Two-tier cache holding the current alert state.
///
/// The in-memory tier is a single mutable cell with one writer (the
/// refresh scheduler) and many readers (HTTP handlers). Each write fully
/// replaces the previous entry. The durable tier is written best-effort
/// in the same refresh cycle and is the source of truth after a restart.
///
/// Construct one per process and pass it to both the scheduler and the
/// server; nothing in this crate holds global state.
pub struct AlertCache {
    current: RwLock<Option<CacheEntry>>,
    durable: Box<dyn DurableStore>,
    durable_ttl: Option<Duration>,
}

impl AlertCache {
    /// Create a cache over the given durable backend.
    ///
    /// `durable_ttl` bounds how long a durable entry may outlive the
    /// refresh cycle that wrote it.
    #[must_use]
    pub fn new(durable: Box<dyn DurableStore>, durable_ttl: Option<Duration>) -> Self {
        Self {
            current: RwLock::new(None),
            durable,
            durable_ttl,
        }
    }

    /// Replace the cached state with `entry`.
    ///
    /// The in-memory tier is written first, synchronously and
    /// unconditionally. The durable tier is then written under both fixed
    /// keys.
    ///
    /// # Errors
    ///
    /// A returned error means only that the durable write failed; the
    /// in-memory tier already holds `entry` and is never rolled back.
    /// Callers log the error and move on.
    pub async fn write(&self, entry: CacheEntry) -> Result<(), StoreError> {
        let alerts_json = serde_json::to_string(&entry.alerts)?;
        let updated = entry.last_updated.to_rfc3339();

        *self.current.write().await = Some(entry);

        self.durable
            .set(ALERT_KEY, &alerts_json, self.durable_ttl)
            .await?;
        self.durable
            .set(UPDATED_KEY, &updated, self.durable_ttl)
            .await?;
        Ok(())
    }

    /// The current cached state: the in-memory tier if present, otherwise
    /// a fallback read of the durable tier.
    ///
    /// The read path never mutates either tier; the durable fallback is
    /// not copied back into memory.
    pub async fn read_current(&self) -> Option<CacheEntry> {
        if let Some(entry) = self.current.read().await.clone() {
            return Some(entry);
        }
        self.read_durable().await
    }

    /// One-shot startup restore: populate the in-memory tier from the
    /// durable tier so a restarted process does not present an absent
    /// state while the first fetch is in flight.
    ///
    /// Returns whether anything was restored.
    pub async fn restore_on_startup(&self) -> bool {
        match self.read_durable().await {
            Some(entry) => {
                debug!(alerts = entry.alerts.len(), "restored alert state from durable tier");
                *self.current.write().await = Some(entry);
                true
            }
            None => false,
        }
    }

    /// Raw status of both tiers, for operational introspection.
    pub async fn debug_status(&self) -> CacheDebug {
        let in_memory = self.current.read().await.is_some();
        let durable_data = self.read_durable().await;
        CacheDebug {
            in_memory,
            durable: durable_data.is_some(),
            durable_data,
        }
    }

    async fn read_durable(&self) -> Option<CacheEntry> {
        let alerts_raw = self.durable_get(ALERT_KEY).await?;
        let updated_raw = self.durable_get(UPDATED_KEY).await?;

        let alerts: Vec<AlertRecord> = match serde_json::from_str(&alerts_raw) {
            Ok(alerts) => alerts,
            Err(e) => {
                warn!(error = %e, "durable alert list is unreadable; treating as absent");
                return None;
            }
        };
        let last_updated = match DateTime::parse_from_rfc3339(&updated_raw) {
            Ok(ts) => ts.with_timezone(&Utc),
            Err(e) => {
                warn!(error = %e, "durable timestamp is unreadable; treating as absent");
                return None;
            }
        };

        Some(CacheEntry {
            alerts,
            last_updated,
        })
    }

    async fn durable_get(&self, key: &str) -> Option<String> {
        match self.durable.get(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "durable read failed; treating as absent");
                None
            }
        }
    }
}

impl std::fmt::Debug for AlertCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertCache")
            .field("durable_ttl", &self.durable_ttl)
            .finish_non_exhaustive()
    }
}
