//! The normalized representation of a single upstream alert.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One upstream alert entry: an ordered mapping from field name to value.
///
/// Values are scalar strings, nested mappings (`info`, `area`, `geocode`),
/// or sequences of nested mappings (`parameter`, `resource`). The schema is
/// owned by the upstream provider; whatever appears in the feed passes
/// through unchanged. `identifier` is only special in that it is pulled out
/// for logging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertRecord(pub Map<String, Value>);

impl AlertRecord {
    /// The alert's `identifier` field, if it is a scalar string.
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        self.0.get("identifier").and_then(Value::as_str)
    }

    /// The alert's `sent` timestamp field, if it is a scalar string.
    #[must_use]
    pub fn sent(&self) -> Option<&str> {
        self.0.get("sent").and_then(Value::as_str)
    }

    /// Wrap a JSON value, returning `None` unless it is an object.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_object().cloned().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_identifier_and_sent() {
        let record = AlertRecord::from_value(&json!({
            "identifier": "IPAWS-TEST-001",
            "sent": "2024-01-05T12:00:00-00:00",
            "info": { "event": "Flood Warning" },
        }))
        .expect("object");

        assert_eq!(record.identifier(), Some("IPAWS-TEST-001"));
        assert_eq!(record.sent(), Some("2024-01-05T12:00:00-00:00"));
    }

    #[test]
    fn test_missing_fields_are_none() {
        let record = AlertRecord::from_value(&json!({ "status": "Actual" })).expect("object");

        assert_eq!(record.identifier(), None);
        assert_eq!(record.sent(), None);
    }

    #[test]
    fn test_from_value_rejects_non_objects() {
        assert!(AlertRecord::from_value(&json!("scalar")).is_none());
        assert!(AlertRecord::from_value(&json!(["a", "b"])).is_none());
    }

    #[test]
    fn test_transparent_serialization() {
        let record = AlertRecord::from_value(&json!({ "identifier": "X1" })).expect("object");
        let raw = serde_json::to_string(&record).expect("serialize");

        assert_eq!(raw, r#"{"identifier":"X1"}"#);

        let back: AlertRecord = serde_json::from_str(&raw).expect("deserialize");
        assert_eq!(back, record);
    }
}
