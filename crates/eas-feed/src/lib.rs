//! # eas-feed
//!
//! XML decoding and alert normalization for the EAS feed proxy.
//!
//! This crate is the pure, I/O-free half of the fetch pipeline: it turns a
//! raw upstream XML payload into a generic JSON tree ([`decode`]) and then
//! extracts a bounded, ordered list of alert records from that tree
//! ([`Normalizer`]). Fetching, scheduling, and caching live in the server
//! crate.
//!
//! The upstream schema is externally defined and may change without notice,
//! so nothing here rejects an alert for missing fields. Every failure mode
//! maps to a [`FeedError`] that the caller treats as "no update this cycle".

#![forbid(unsafe_code)]

pub mod decode;
pub mod error;
pub mod normalize;
pub mod record;

pub use decode::decode;
pub use error::FeedError;
pub use normalize::{FeedOrder, Normalizer};
pub use record::AlertRecord;
