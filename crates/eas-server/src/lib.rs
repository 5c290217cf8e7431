//! # eas-server
//!
//! Refresh scheduler and HTTP API for the EAS feed proxy.
//!
//! The proxy polls a remote XML feed of emergency alert messages on a
//! fixed interval, runs each payload through `eas-feed`, and replaces the
//! state held in `eas-cache` when a cycle succeeds. A small axum API
//! serves the cached state to downstream consumers (dashboards, signage,
//! broadcast triggers), so readers never wait on the slow upstream.
//!
//! ## API Endpoints
//!
//! | Endpoint | Method | Description |
//! |----------|--------|-------------|
//! | `/json-feed` | GET | Current cached alert state (503 until the first successful fetch) |
//! | `/debug` | GET | Raw status of both cache tiers |
//! | `/ping` | GET | Liveness check, returns `pong` |

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod fetch;
pub mod handlers;
pub mod routes;
pub mod scheduler;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{RefreshError, ServerError, ServerResult};
pub use fetch::FeedFetcher;
pub use scheduler::{RefreshOutcome, RefreshScheduler};
pub use server::ProxyServer;
pub use state::AppState;
