//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Chat bodies carry the conversation history; nothing else has a body.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // Dashboard frontends are served from other origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let overview = Router::new()
        .route("/kpis", get(handlers::get_kpis))
        .route("/executive-summary", get(handlers::get_executive_summary))
        .route("/executive-summary/text", get(handlers::get_executive_summary_text))
        .route("/pax-trend", get(handlers::get_pax_trend))
        .route("/atm-trend", get(handlers::get_atm_trend))
        .route("/terminal-breakdown", get(handlers::get_terminal_breakdown))
        .route("/zone-compliance-summary", get(handlers::get_zone_compliance_summary))
        .route("/alerts", get(handlers::get_alerts));

    let queue = Router::new()
        .route("/status", get(handlers::get_queue_status))
        .route("/zones", get(handlers::get_zones))
        .route("/analysis", get(handlers::get_queue_analysis))
        .route("/root-cause", get(handlers::get_root_cause))
        .route("/zone-detail", get(handlers::get_zone_detail))
        .route("/heatmap", get(handlers::get_queue_heatmap))
        .route("/table", get(handlers::get_queue_table));

    let security = Router::new()
        .route("/summary", get(handlers::get_security_summary))
        .route("/lanes", get(handlers::get_lanes))
        .route("/analysis", get(handlers::get_security_analysis))
        .route("/high-reject", get(handlers::get_high_reject))
        .route("/baggage", get(handlers::get_baggage))
        .route("/gates", get(handlers::get_gates));

    let trends = Router::new()
        .route("/passenger", get(handlers::get_passenger_trends))
        .route("/biometric", get(handlers::get_biometric_trends))
        .route("/voc", get(handlers::get_voc_trends));

    let chat = Router::new()
        .route("/non-streaming", post(handlers::chat_non_streaming))
        .route("/demo-prompts", get(handlers::get_demo_prompts))
        .route("/quick-queries", get(handlers::get_quick_queries));

    let api_v1 = Router::new()
        .nest("/overview", overview)
        .nest("/queue", queue)
        .nest("/security", security)
        .route("/passengers/analysis", get(handlers::get_passenger_analysis))
        .route("/passengers/airlines", get(handlers::get_airline_concentration))
        .route("/voc/analysis", get(handlers::get_voc_analysis))
        .nest("/trends", trends)
        .route("/compliance/summary", get(handlers::get_compliance_summary))
        .route("/compliance/upcoming-tasks", get(handlers::get_upcoming_tasks))
        .route("/filters/options", get(handlers::get_filter_options))
        .route("/chat", post(handlers::chat_stream))
        .nest("/chat", chat);

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
