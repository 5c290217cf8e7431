//! Alert extraction and normalization.
//!
//! Takes the generic tree produced by [`crate::decode`] and turns the
//! `alerts.alert` subtree into a uniform, bounded, ordered list of
//! [`AlertRecord`]s. The upstream feed sometimes delivers a single alert
//! without a sequence wrapper; that shape difference is erased here.

use serde_json::Value;

use crate::error::FeedError;
use crate::record::AlertRecord;

/// How the normalizer orders alerts before truncation.
///
/// The upstream feed is believed to deliver alerts newest-first, but that
/// was never confirmed by upstream documentation. `FeedOrder` trusts it;
/// `SentDesc` sorts by each alert's `sent` timestamp descending instead,
/// so deployments can opt out of the assumption.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeedOrder {
    /// Keep the feed's own ordering (assumed newest-first).
    #[default]
    FeedOrder,
    /// Sort by the `sent` field, newest first. Alerts without a `sent`
    /// field sort last.
    SentDesc,
}

/// Normalizes a decoded feed tree into a bounded list of alert records.
///
/// Index 0 of the result is "newest". Configuration is injected up front
/// so the pipeline itself stays free of deployment details; in particular
/// any synthetic demo alerts are plain data appended after truncation,
/// never merged into the extraction logic.
#[derive(Debug, Clone)]
pub struct Normalizer {
    max_retained: usize,
    order: FeedOrder,
    synthetic: Vec<AlertRecord>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            max_retained: 2,
            order: FeedOrder::FeedOrder,
            synthetic: Vec::new(),
        }
    }
}

impl Normalizer {
    /// Create a normalizer that retains the two newest alerts in feed order.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how many alerts are retained after ordering.
    #[must_use]
    pub const fn with_max_retained(mut self, max: usize) -> Self {
        self.max_retained = max;
        self
    }

    /// Set the ordering applied before truncation.
    #[must_use]
    pub const fn with_order(mut self, order: FeedOrder) -> Self {
        self.order = order;
        self
    }

    /// Append fixed synthetic alerts (demo/test data) to every result.
    #[must_use]
    pub fn with_synthetic(mut self, extras: Vec<AlertRecord>) -> Self {
        self.synthetic = extras;
        self
    }

    /// Extract the alert list from a decoded feed tree.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::NoAlerts`] when the `alerts.alert` path is
    /// absent, and [`FeedError::EmptyFeed`] when it exists but yields no
    /// alert mappings.
    pub fn normalize(&self, tree: &Value) -> Result<Vec<AlertRecord>, FeedError> {
        let alert = tree
            .get("alerts")
            .and_then(|alerts| alerts.get("alert"))
            .ok_or(FeedError::NoAlerts)?;

        // A single alert arrives unwrapped; coerce both shapes into one
        // ordered sequence.
        let mut records: Vec<AlertRecord> = match alert {
            Value::Object(_) => AlertRecord::from_value(alert).into_iter().collect(),
            Value::Array(items) => items.iter().filter_map(AlertRecord::from_value).collect(),
            _ => Vec::new(),
        };

        if self.order == FeedOrder::SentDesc {
            // Stable sort: alerts with equal or missing `sent` keep feed order.
            records.sort_by(|a, b| b.sent().cmp(&a.sent()));
        }

        records.truncate(self.max_retained);

        if records.is_empty() {
            return Err(FeedError::EmptyFeed);
        }

        records.extend(self.synthetic.iter().cloned());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode;
    use serde_json::json;

    fn alert(identifier: &str) -> Value {
        json!({ "identifier": identifier })
    }

    #[test]
    fn test_single_alert_and_sequence_produce_the_same_shape() {
        let single = json!({ "alerts": { "alert": alert("A1") } });
        let wrapped = json!({ "alerts": { "alert": [alert("A1")] } });

        let normalizer = Normalizer::new();
        let from_single = normalizer.normalize(&single).expect("single");
        let from_wrapped = normalizer.normalize(&wrapped).expect("wrapped");

        assert_eq!(from_single, from_wrapped);
        assert_eq!(from_single.len(), 1);
        assert_eq!(from_single[0].identifier(), Some("A1"));
    }

    #[test]
    fn test_truncates_to_first_two_in_feed_order() {
        let tree = json!({
            "alerts": { "alert": [alert("A0"), alert("A1"), alert("A2"), alert("A3")] }
        });

        let records = Normalizer::new().normalize(&tree).expect("normalize");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].identifier(), Some("A0"));
        assert_eq!(records[1].identifier(), Some("A1"));
    }

    #[test]
    fn test_max_retained_is_configurable() {
        let tree = json!({
            "alerts": { "alert": [alert("A0"), alert("A1"), alert("A2")] }
        });

        let records = Normalizer::new()
            .with_max_retained(1)
            .normalize(&tree)
            .expect("normalize");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].identifier(), Some("A0"));
    }

    #[test]
    fn test_missing_alerts_path_is_no_alerts() {
        let normalizer = Normalizer::new();

        let err = normalizer.normalize(&json!({})).expect_err("no alerts key");
        assert_eq!(err, FeedError::NoAlerts);

        let err = normalizer
            .normalize(&json!({ "alerts": { "updated": "2024-01-05" } }))
            .expect_err("no alert key");
        assert_eq!(err, FeedError::NoAlerts);
    }

    #[test]
    fn test_empty_sequence_is_empty_feed() {
        let tree = json!({ "alerts": { "alert": [] } });

        let err = Normalizer::new().normalize(&tree).expect_err("empty");
        assert_eq!(err, FeedError::EmptyFeed);
    }

    #[test]
    fn test_scalar_alert_value_is_empty_feed() {
        // Well-formed XML can still decode `alert` to a bare string.
        let tree = json!({ "alerts": { "alert": "oops" } });

        let err = Normalizer::new().normalize(&tree).expect_err("scalar");
        assert_eq!(err, FeedError::EmptyFeed);
    }

    #[test]
    fn test_sent_desc_reorders_before_truncation() {
        let tree = json!({
            "alerts": { "alert": [
                { "identifier": "OLD", "sent": "2024-01-01T00:00:00-00:00" },
                { "identifier": "NEW", "sent": "2024-03-01T00:00:00-00:00" },
                { "identifier": "MID", "sent": "2024-02-01T00:00:00-00:00" },
            ] }
        });

        let records = Normalizer::new()
            .with_order(FeedOrder::SentDesc)
            .normalize(&tree)
            .expect("normalize");

        assert_eq!(records[0].identifier(), Some("NEW"));
        assert_eq!(records[1].identifier(), Some("MID"));
    }

    #[test]
    fn test_sent_desc_sorts_missing_sent_last() {
        let tree = json!({
            "alerts": { "alert": [
                { "identifier": "NO-SENT" },
                { "identifier": "DATED", "sent": "2024-01-01T00:00:00-00:00" },
            ] }
        });

        let records = Normalizer::new()
            .with_order(FeedOrder::SentDesc)
            .normalize(&tree)
            .expect("normalize");

        assert_eq!(records[0].identifier(), Some("DATED"));
        assert_eq!(records[1].identifier(), Some("NO-SENT"));
    }

    #[test]
    fn test_synthetic_alerts_are_appended_after_truncation() {
        let extra = AlertRecord::from_value(&alert("SYNTHETIC")).expect("object");
        let tree = json!({
            "alerts": { "alert": [alert("A0"), alert("A1"), alert("A2")] }
        });

        let records = Normalizer::new()
            .with_synthetic(vec![extra])
            .normalize(&tree)
            .expect("normalize");

        assert_eq!(records.len(), 3);
        assert_eq!(records[2].identifier(), Some("SYNTHETIC"));
    }

    #[test]
    fn test_normalization_is_idempotent_on_a_raw_payload() {
        let raw = "<alerts>\
            <alert><identifier>A1</identifier><sent>2024-01-05T00:00:00-00:00</sent></alert>\
            <alert><identifier>A2</identifier><sent>2024-01-04T00:00:00-00:00</sent></alert>\
            <alert><identifier>A3</identifier><sent>2024-01-03T00:00:00-00:00</sent></alert>\
        </alerts>";

        let normalizer = Normalizer::new();
        let first = normalizer
            .normalize(&decode(raw).expect("decode"))
            .expect("normalize");
        let second = normalizer
            .normalize(&decode(raw).expect("decode"))
            .expect("normalize");

        assert_eq!(first, second);
    }
}
