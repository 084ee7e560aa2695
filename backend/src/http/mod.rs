//! HTTP server module.
//!
//! This module exposes the reasoning engine, dashboard read models and chat
//! as a REST API. Handlers only parse parameters and serialize results; all
//! analysis lives in [`crate::services`].
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Query parsing against configured defaults              │
//! │  - JSON and SSE responses                                 │
//! │  - CORS, compression, error handling                      │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │ spawn_blocking
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Reasoning Engine (services/)                             │
//! │  - Analyses and read models                               │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │ Arc<DatasetStore>
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Dataset Store (store/)                                   │
//! │  - Immutable in-memory snapshot                           │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::AppError;
pub use router::create_router;
pub use state::AppState;
