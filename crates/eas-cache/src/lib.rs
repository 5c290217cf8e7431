//! # eas-cache
//!
//! Two-tier cache for the EAS feed proxy: a fast in-process cell holding
//! the current [`CacheEntry`], backed by a durable key-value store that
//! survives restarts.
//!
//! The refresh scheduler is the only writer; HTTP handlers only read. A
//! durable-tier failure never blocks or rolls back the in-memory tier, so
//! readers may briefly observe the two tiers out of sync — that is by
//! contract, not a bug to fix here.

#![forbid(unsafe_code)]

pub mod cache;
pub mod entry;
pub mod error;
pub mod store;

pub use cache::{AlertCache, CacheDebug};
pub use entry::CacheEntry;
pub use error::StoreError;
pub use store::{ALERT_KEY, DurableStore, JsonFileStore, MemoryStore, UPDATED_KEY};
