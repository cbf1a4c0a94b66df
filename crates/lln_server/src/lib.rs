//! Browser dashboard and REST API for the law of large numbers simulator
//!
//! Serves an HTML dashboard (probability slider, seed field, large-n
//! checkbox, preset selector) that calls `POST /api/v1/simulate` and draws
//! the returned Chart.js definitions, plus health and readiness probes.

pub mod config;
pub mod routes;
pub mod server;

pub use lln_core;

/// Server version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
