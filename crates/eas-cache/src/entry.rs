//! The single logical record held by the cache.

use chrono::{DateTime, Utc};
use eas_feed::AlertRecord;
use serde::{Deserialize, Serialize};

/// The cached alert state: the retained alerts plus the wall-clock time
/// the entry was computed.
///
/// `last_updated` is always the local refresh time, never a timestamp
/// taken from feed content. An entry's alert list is never empty; before
/// the first successful fetch the cache holds no entry at all rather than
/// an entry with zero alerts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    /// Retained alerts, index 0 newest.
    pub alerts: Vec<AlertRecord>,
    /// Wall-clock time this entry was computed.
    pub last_updated: DateTime<Utc>,
}

impl CacheEntry {
    /// Build an entry stamped with the current wall-clock time.
    #[must_use]
    pub fn now(alerts: Vec<AlertRecord>) -> Self {
        Self {
            alerts,
            last_updated: Utc::now(),
        }
    }
}
