//! Durable key-value backends for the cache's second tier.
//!
//! The durable tier is deliberately tiny: two string values under fixed
//! keys, with an optional expiration. Which backend holds them is a
//! deployment detail hidden behind [`DurableStore`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::StoreError;

/// Durable key for the serialized alert list (a JSON array).
pub const ALERT_KEY: &str = "lastValidAlert";

/// Durable key for the last-updated timestamp (a plain ISO-8601 string).
pub const UPDATED_KEY: &str = "lastUpdated";

/// A keyed string store that outlives the process.
///
/// `set` with a TTL makes the value disappear from `get` after the TTL
/// elapses, so a permanently stalled feed cannot serve stale data forever.
#[async_trait]
pub trait DurableStore: Send + Sync {
    /// Read a value, treating expired entries as absent.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, optionally expiring after `ttl`.
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), StoreError>;
}

#[async_trait]
impl<T: DurableStore + ?Sized> DurableStore for std::sync::Arc<T> {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), StoreError> {
        (**self).set(key, value, ttl).await
    }
}

/// One stored value with its optional expiration.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredValue {
    value: String,
    expires_at: Option<DateTime<Utc>>,
}

impl StoredValue {
    fn new(value: &str, ttl: Option<Duration>) -> Self {
        let expires_at = ttl
            .and_then(|d| chrono::Duration::from_std(d).ok())
            .map(|d| Utc::now() + d);
        Self {
            value: value.to_string(),
            expires_at,
        }
    }

    fn expired(&self) -> bool {
        self.expires_at.is_some_and(|at| at <= Utc::now())
    }
}

/// File-backed durable store: a JSON snapshot of all entries in a state
/// directory, rewritten on every `set`.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, StoredValue>>,
}

impl JsonFileStore {
    /// Open (or create) the store under `state_dir`, loading any existing
    /// snapshot from disk.
    #[must_use]
    pub fn new(state_dir: &Path) -> Self {
        let path = state_dir.join("eas-cache.json");
        let entries = Self::load(&path);
        debug!(count = entries.len(), path = %path.display(), "loaded durable cache snapshot");
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    fn load(path: &Path) -> HashMap<String, StoredValue> {
        match std::fs::read_to_string(path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(error = %e, path = %path.display(), "corrupt cache snapshot; starting empty");
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        }
    }

    fn snapshot(&self, entries: &HashMap<String, StoredValue>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(entries)?;
        // Write-then-rename so a crash mid-write never corrupts the snapshot.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, raw)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[async_trait]
impl DurableStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().await;
        Ok(entries
            .get(key)
            .filter(|stored| !stored.expired())
            .map(|stored| stored.value.clone()))
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_string(), StoredValue::new(value, ttl));
        self.snapshot(&entries)
    }
}

/// In-memory durable store, for tests and single-shot demos.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, StoredValue>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DurableStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().await;
        Ok(entries
            .get(key)
            .filter(|stored| !stored.expired())
            .map(|stored| stored.value.clone()))
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_string(), StoredValue::new(value, ttl));
        Ok(())
    }
}
