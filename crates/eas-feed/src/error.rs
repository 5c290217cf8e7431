//! Error types for the eas-feed crate.

use thiserror::Error;

/// Errors produced while decoding or normalizing a feed payload.
///
/// All variants are recoverable from the pipeline's point of view: the
/// refresh cycle that hits one logs it and leaves the cached state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    /// The payload was not well-formed XML.
    #[error("malformed XML: {0}")]
    Decode(String),

    /// The decoded tree has no `alerts.alert` path.
    #[error("feed contains no alerts.alert element")]
    NoAlerts,

    /// The alert list was empty after normalization.
    #[error("feed alert list is empty")]
    EmptyFeed,
}
