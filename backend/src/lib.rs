//! # Airport Operations Analytics Backend
//!
//! Analytical core for an airport operations dashboard: loads the operational
//! datasets (queue compliance, security lanes, passenger volumes, movements,
//! baggage, gates, biometrics, customer feedback, on-time performance, safety)
//! into an immutable snapshot and answers analysis queries over it.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`config`]: TOML configuration and the analysis policy
//! - [`models`]: Typed dataset rows and categorical labels
//! - [`store`]: Dataset Store, loading parquet/CSV files via polars
//! - [`aggregation`]: Filter, group, rank, pivot and summary statistics
//! - [`algorithms`]: Metrics and anomaly detection
//! - [`services`]: Reasoning Engine and dashboard read models
//! - [`routes`]: Result types per dashboard area
//! - [`api`]: Re-export surface of the result types
//! - [`chat`]: Chat context, prompt catalogue and rule-based responder
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! Every analysis is a pure function of `(snapshot, policy, arguments)`: the
//! same query against the same snapshot always yields the same result.

// StoreError carries a structured context for every failure
#![allow(clippy::result_large_err)]

pub mod aggregation;
pub mod algorithms;
pub mod api;
pub mod chat;
pub mod config;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

#[cfg(feature = "http-server")]
pub mod http;
