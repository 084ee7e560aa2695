//! Airport operations HTTP server.
//!
//! Loads the configured dataset snapshot into memory, builds the reasoning
//! engine and serves the REST API.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin ops-server
//!
//! OPS_DATA_DIR=/srv/ops/data OPS_PORT=9000 cargo run --bin ops-server
//! ```
//!
//! # Environment Variables
//!
//! - `OPS_DATA_DIR`: dataset directory (default from `ops.toml`, else `data/generated`)
//! - `OPS_REPORT_DATE`: default analysis date, `YYYY-MM-DD`
//! - `OPS_HOST`: Server host (default: 0.0.0.0)
//! - `OPS_PORT`: Server port (default: 8080)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use airport_ops::config::DashboardConfig;
use airport_ops::http::{create_router, AppState};
use airport_ops::services::ReasoningEngine;
use airport_ops::store::DatasetLoader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting airport operations server");

    let config = DashboardConfig::from_default_location()
        .context("Failed to load configuration")?
        .apply_env_overrides()
        .context("Invalid environment override")?;

    let loader = DatasetLoader::new(config.data.dir.clone()).with_format(config.data.format);
    let store = tokio::task::spawn_blocking(move || loader.load())
        .await
        .context("Dataset loader task failed")?
        .context("Failed to load datasets")?;
    let store = Arc::new(store);
    info!(
        "Dataset snapshot loaded from {} (report date {})",
        config.data.dir.display(),
        config.data.report_date
    );

    let engine = ReasoningEngine::new(store, config.policy.clone());
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let app = create_router(AppState::new(engine, config));

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
