//! Error types for the eas-cache crate.

use thiserror::Error;

/// Errors from the durable cache tier.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing storage failed.
    #[error("durable store I/O failed: {0}")]
    Io(String),

    /// A value could not be serialized or deserialized.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = StoreError::from(io);

        assert!(matches!(err, StoreError::Io(_)));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_from_serde_error() {
        let serde_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let err = StoreError::from(serde_err);

        assert!(matches!(err, StoreError::Serialization(_)));
    }
}
