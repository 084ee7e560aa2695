//! HTTP handlers for the REST API.
//!
//! Each handler resolves its query parameters against the configured
//! defaults, then runs the analysis on the blocking pool.

use axum::{
    extract::{Query, State},
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::stream::Stream;
use serde::Serialize;
use std::convert::Infallible;
use std::time::Duration;

use super::dto::{
    AirlineQuery, ChatRequest, ChatResponseBody, DateQuery, DemoPromptsResponse, HealthResponse,
    HighRejectQuery, ListResponse, QueueTableQuery, QuickQueriesResponse, RootCauseQuery,
    SliceQuery, WindowQuery, ZoneDetailQuery, DEFAULT_OVERVIEW_TREND_DAYS,
    DEFAULT_ROOT_CAUSE_WINDOW, DEFAULT_ROOT_CAUSE_ZONE, DEFAULT_TREND_DAYS,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::*;
use crate::chat::{ChatReply, ReplySource, DEMO_PROMPTS, QUICK_QUERIES};
use crate::services::{filter_options, upcoming_tasks, ReasoningEngine};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

const DEFAULT_AIRLINE_LIMIT: usize = 10;

/// Run `f` against the engine on the blocking pool.
async fn analyze<F, T>(state: &AppState, f: F) -> HandlerResult<T>
where
    F: FnOnce(&ReasoningEngine) -> T + Send + 'static,
    T: Serialize + Send + 'static,
{
    let engine = state.engine.clone();
    let data = tokio::task::spawn_blocking(move || f(&engine))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?;
    Ok(Json(data))
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        snapshot: state.fingerprint.to_string(),
    }))
}

/// Fallback for unknown paths.
pub async fn not_found(uri: axum::http::Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

// =============================================================================
// Overview
// =============================================================================

/// GET /v1/overview/kpis
pub async fn get_kpis(
    State(state): State<AppState>,
    Query(query): Query<SliceQuery>,
) -> HandlerResult<Kpis> {
    let date = state.date(query.date.as_deref())?;
    let terminals = state.terminals(query.terminals.as_deref());
    analyze(&state, move |engine| engine.kpis(date, &terminals)).await
}

/// GET /v1/overview/executive-summary
pub async fn get_executive_summary(
    State(state): State<AppState>,
    Query(query): Query<SliceQuery>,
) -> HandlerResult<ExecutiveOverview> {
    let date = state.date(query.date.as_deref())?;
    let terminals = state.terminals(query.terminals.as_deref());
    analyze(&state, move |engine| engine.executive_overview(date, &terminals)).await
}

/// GET /v1/overview/executive-summary/text
///
/// Markdown rendition of the summary, as used by the chat fallback.
pub async fn get_executive_summary_text(
    State(state): State<AppState>,
    Query(query): Query<SliceQuery>,
) -> HandlerResult<ExecutiveSummaryText> {
    let date = state.date(query.date.as_deref())?;
    let terminals = state.terminals(query.terminals.as_deref());
    analyze(&state, move |engine| {
        engine.generate_executive_summary(date, &terminals)
    })
    .await
}

/// GET /v1/overview/pax-trend
pub async fn get_pax_trend(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> HandlerResult<ListResponse<DailySplit>> {
    let end = state.date(query.end_date.as_deref())?;
    let terminals = state.terminals(query.terminals.as_deref());
    let days = query.days.unwrap_or(DEFAULT_OVERVIEW_TREND_DAYS);
    analyze(&state, move |engine| {
        ListResponse::from(engine.pax_trend(days, end, &terminals))
    })
    .await
}

/// GET /v1/overview/atm-trend
pub async fn get_atm_trend(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> HandlerResult<ListResponse<DailySplit>> {
    let end = state.date(query.end_date.as_deref())?;
    let terminals = state.terminals(query.terminals.as_deref());
    let days = query.days.unwrap_or(DEFAULT_OVERVIEW_TREND_DAYS);
    analyze(&state, move |engine| {
        ListResponse::from(engine.atm_trend(days, end, &terminals))
    })
    .await
}

/// GET /v1/overview/terminal-breakdown
pub async fn get_terminal_breakdown(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> HandlerResult<ListResponse<TerminalFlowPax>> {
    let date = state.date(query.date.as_deref())?;
    analyze(&state, move |engine| {
        ListResponse::from(engine.terminal_breakdown(date))
    })
    .await
}

/// GET /v1/overview/zone-compliance-summary
pub async fn get_zone_compliance_summary(
    State(state): State<AppState>,
    Query(query): Query<SliceQuery>,
) -> HandlerResult<ListResponse<ZoneMean>> {
    let date = state.date(query.date.as_deref())?;
    let terminals = state.terminals(query.terminals.as_deref());
    analyze(&state, move |engine| {
        ListResponse::from(engine.zone_compliance_summary(date, &terminals))
    })
    .await
}

/// GET /v1/overview/alerts
pub async fn get_alerts(
    State(state): State<AppState>,
    Query(query): Query<SliceQuery>,
) -> HandlerResult<Alerts> {
    let date = state.date(query.date.as_deref())?;
    let terminals = state.terminals(query.terminals.as_deref());
    analyze(&state, move |engine| engine.alerts(date, &terminals)).await
}

// =============================================================================
// Queue
// =============================================================================

/// GET /v1/queue/status
pub async fn get_queue_status(
    State(state): State<AppState>,
    Query(query): Query<SliceQuery>,
) -> HandlerResult<QueueStatus> {
    let date = state.date(query.date.as_deref())?;
    let terminals = state.terminals(query.terminals.as_deref());
    analyze(&state, move |engine| engine.queue_status(date, &terminals)).await
}

/// GET /v1/queue/zones
pub async fn get_zones(
    State(state): State<AppState>,
    Query(query): Query<SliceQuery>,
) -> HandlerResult<ListResponse<String>> {
    let date = state.date(query.date.as_deref())?;
    let terminals = state.terminals(query.terminals.as_deref());
    analyze(&state, move |engine| {
        ListResponse::from(engine.zones(date, &terminals))
    })
    .await
}

/// GET /v1/queue/analysis
pub async fn get_queue_analysis(
    State(state): State<AppState>,
    Query(query): Query<SliceQuery>,
) -> HandlerResult<QueueComplianceAnalysis> {
    let date = state.date(query.date.as_deref())?;
    let terminals = state.terminals(query.terminals.as_deref());
    analyze(&state, move |engine| {
        engine.analyze_queue_compliance(date, &terminals)
    })
    .await
}

/// GET /v1/queue/root-cause
pub async fn get_root_cause(
    State(state): State<AppState>,
    Query(query): Query<RootCauseQuery>,
) -> HandlerResult<RootCauseReport> {
    let date = state.date(query.date.as_deref())?;
    let terminals = state.terminals(query.terminals.as_deref());
    let zone = query
        .zone
        .unwrap_or_else(|| DEFAULT_ROOT_CAUSE_ZONE.to_string());
    let time_window = query
        .time_window
        .unwrap_or_else(|| DEFAULT_ROOT_CAUSE_WINDOW.to_string());
    analyze(&state, move |engine| {
        engine.generate_root_cause_analysis(date, &zone, &time_window, &terminals)
    })
    .await
}

/// GET /v1/queue/zone-detail
pub async fn get_zone_detail(
    State(state): State<AppState>,
    Query(query): Query<ZoneDetailQuery>,
) -> HandlerResult<ZoneDetail> {
    let date = state.date(query.date.as_deref())?;
    let terminals = state.terminals(query.terminals.as_deref());
    let zone = query
        .zone
        .unwrap_or_else(|| DEFAULT_ROOT_CAUSE_ZONE.to_string());
    analyze(&state, move |engine| engine.zone_detail(date, &zone, &terminals)).await
}

/// GET /v1/queue/heatmap
pub async fn get_queue_heatmap(
    State(state): State<AppState>,
    Query(query): Query<SliceQuery>,
) -> HandlerResult<QueueHeatmap> {
    let date = state.date(query.date.as_deref())?;
    let terminals = state.terminals(query.terminals.as_deref());
    analyze(&state, move |engine| engine.queue_heatmap(date, &terminals)).await
}

/// GET /v1/queue/table
pub async fn get_queue_table(
    State(state): State<AppState>,
    Query(query): Query<QueueTableQuery>,
) -> HandlerResult<ListResponse<QueueTableRow>> {
    let date = state.date(query.date.as_deref())?;
    let terminals = state.terminals(query.terminals.as_deref());
    let violations_only = query.violations_only;
    analyze(&state, move |engine| {
        ListResponse::from(engine.queue_table(date, &terminals, violations_only))
    })
    .await
}

// =============================================================================
// Security, baggage and gates
// =============================================================================

/// GET /v1/security/summary
pub async fn get_security_summary(
    State(state): State<AppState>,
    Query(query): Query<SliceQuery>,
) -> HandlerResult<SecuritySummary> {
    let date = state.date(query.date.as_deref())?;
    let terminals = state.terminals(query.terminals.as_deref());
    analyze(&state, move |engine| engine.security_summary(date, &terminals)).await
}

/// GET /v1/security/lanes
pub async fn get_lanes(
    State(state): State<AppState>,
    Query(query): Query<SliceQuery>,
) -> HandlerResult<ListResponse<LaneView>> {
    let date = state.date(query.date.as_deref())?;
    let terminals = state.terminals(query.terminals.as_deref());
    analyze(&state, move |engine| {
        ListResponse::from(engine.lanes(date, &terminals))
    })
    .await
}

/// GET /v1/security/analysis
pub async fn get_security_analysis(
    State(state): State<AppState>,
    Query(query): Query<SliceQuery>,
) -> HandlerResult<SecurityLaneAnalysis> {
    let date = state.date(query.date.as_deref())?;
    let terminals = state.terminals(query.terminals.as_deref());
    analyze(&state, move |engine| {
        engine.analyze_security_lanes(date, &terminals)
    })
    .await
}

/// GET /v1/security/high-reject
pub async fn get_high_reject(
    State(state): State<AppState>,
    Query(query): Query<HighRejectQuery>,
) -> HandlerResult<ListResponse<HighRejectLane>> {
    let date = state.date(query.date.as_deref())?;
    let terminals = state.terminals(query.terminals.as_deref());
    let threshold = match query.threshold {
        Some(t) if !t.is_finite() => {
            return Err(AppError::BadRequest(format!("Invalid threshold {}", t)))
        }
        Some(t) => t,
        None => state.config.policy.high_reject_threshold,
    };
    analyze(&state, move |engine| {
        ListResponse::from(engine.high_reject(date, &terminals, threshold))
    })
    .await
}

/// GET /v1/security/baggage
pub async fn get_baggage(
    State(state): State<AppState>,
    Query(query): Query<SliceQuery>,
) -> HandlerResult<BaggageView> {
    let date = state.date(query.date.as_deref())?;
    let terminals = state.terminals(query.terminals.as_deref());
    analyze(&state, move |engine| engine.baggage(date, &terminals)).await
}

/// GET /v1/security/gates
pub async fn get_gates(
    State(state): State<AppState>,
    Query(query): Query<SliceQuery>,
) -> HandlerResult<GatesView> {
    let date = state.date(query.date.as_deref())?;
    let terminals = state.terminals(query.terminals.as_deref());
    analyze(&state, move |engine| engine.gates(date, &terminals)).await
}

// =============================================================================
// Passengers and customer feedback
// =============================================================================

/// GET /v1/passengers/analysis
pub async fn get_passenger_analysis(
    State(state): State<AppState>,
    Query(query): Query<SliceQuery>,
) -> HandlerResult<PassengerVolumeAnalysis> {
    let date = state.date(query.date.as_deref())?;
    let terminals = state.terminals(query.terminals.as_deref());
    analyze(&state, move |engine| {
        engine.analyze_passenger_volumes(date, &terminals)
    })
    .await
}

/// GET /v1/passengers/airlines
pub async fn get_airline_concentration(
    State(state): State<AppState>,
    Query(query): Query<AirlineQuery>,
) -> HandlerResult<ListResponse<AirlineShare>> {
    let date = state.date(query.date.as_deref())?;
    let limit = query.limit.unwrap_or(DEFAULT_AIRLINE_LIMIT);
    analyze(&state, move |engine| {
        ListResponse::from(engine.airline_concentration(date, limit))
    })
    .await
}

/// GET /v1/voc/analysis
pub async fn get_voc_analysis(
    State(state): State<AppState>,
    Query(query): Query<SliceQuery>,
) -> HandlerResult<VocSentimentAnalysis> {
    let date = state.date(query.date.as_deref())?;
    let terminals = state.terminals(query.terminals.as_deref());
    analyze(&state, move |engine| {
        engine.analyze_voc_sentiment(date, &terminals)
    })
    .await
}

// =============================================================================
// Trends
// =============================================================================

/// GET /v1/trends/passenger
pub async fn get_passenger_trends(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> HandlerResult<PassengerTrends> {
    let end = state.date(query.end_date.as_deref())?;
    let terminals = state.terminals(query.terminals.as_deref());
    let days = query.days.unwrap_or(DEFAULT_TREND_DAYS);
    let group_by = query.group_by();
    analyze(&state, move |engine| {
        engine.passenger_trends(days, end, &terminals, group_by)
    })
    .await
}

/// GET /v1/trends/biometric
pub async fn get_biometric_trends(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> HandlerResult<BiometricTrends> {
    let end = state.date(query.end_date.as_deref())?;
    let terminals = state.terminals(query.terminals.as_deref());
    let days = query.days.unwrap_or(DEFAULT_TREND_DAYS);
    analyze(&state, move |engine| engine.biometric_trends(days, end, &terminals)).await
}

/// GET /v1/trends/voc
pub async fn get_voc_trends(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> HandlerResult<VocTrends> {
    let end = state.date(query.end_date.as_deref())?;
    let terminals = state.terminals(query.terminals.as_deref());
    let days = query.days.unwrap_or(DEFAULT_TREND_DAYS);
    analyze(&state, move |engine| engine.voc_trends(days, end, &terminals)).await
}

// =============================================================================
// Compliance and filters
// =============================================================================

/// GET /v1/compliance/summary
pub async fn get_compliance_summary(
    State(state): State<AppState>,
    Query(query): Query<SliceQuery>,
) -> HandlerResult<ComplianceSummary> {
    let date = state.date(query.date.as_deref())?;
    let terminals = state.terminals(query.terminals.as_deref());
    analyze(&state, move |engine| engine.compliance_summary(date, &terminals)).await
}

/// GET /v1/compliance/upcoming-tasks
pub async fn get_upcoming_tasks(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> HandlerResult<ListResponse<UpcomingTask>> {
    let date = state.date(query.date.as_deref())?;
    Ok(Json(ListResponse::from(upcoming_tasks(date))))
}

/// GET /v1/filters/options
pub async fn get_filter_options(State(state): State<AppState>) -> HandlerResult<FilterOptions> {
    Ok(Json(filter_options(&state.config, state.engine.store())))
}

// =============================================================================
// Chat
// =============================================================================

async fn chat_reply(state: &AppState, body: &ChatRequest) -> Result<ChatReply, AppError> {
    if body.query.trim().is_empty() {
        return Err(AppError::BadRequest("query must not be empty".to_string()));
    }
    let date = state.date(body.date.as_deref())?;
    let terminals = state.terminals(body.terminals.as_deref());
    let reply = state
        .chat
        .respond(&body.query, date, &terminals, &body.conversation_history)
        .await?;
    Ok(reply)
}

/// POST /v1/chat
///
/// Streams the reply as Server-Sent Events: one `{"token"}` event per line,
/// then a closing `{"done", "full_response"}` event.
pub async fn chat_stream(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    let reply = chat_reply(&state, &body).await?;
    let tokens: Vec<String> = reply
        .response
        .split_inclusive('\n')
        .map(str::to_string)
        .collect();

    let stream = async_stream::stream! {
        for token in tokens {
            let event = serde_json::json!({ "token": token });
            yield Ok(Event::default().data(event.to_string()));
        }
        let done = serde_json::json!({ "done": true, "full_response": reply.response });
        yield Ok(Event::default().data(done.to_string()));
    };

    Ok(Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(1))
            .text("keep-alive"),
    ))
}

/// POST /v1/chat/non-streaming
pub async fn chat_non_streaming(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> HandlerResult<ChatResponseBody> {
    let reply = chat_reply(&state, &body).await?;
    let mode = match reply.source {
        ReplySource::Generator => "generator",
        ReplySource::RuleBased => "fallback",
    };
    Ok(Json(ChatResponseBody {
        response: reply.response,
        mode: mode.to_string(),
    }))
}

/// GET /v1/chat/demo-prompts
pub async fn get_demo_prompts() -> Json<DemoPromptsResponse> {
    Json(DemoPromptsResponse {
        prompts: DEMO_PROMPTS.to_vec(),
    })
}

/// GET /v1/chat/quick-queries
pub async fn get_quick_queries() -> Json<QuickQueriesResponse> {
    Json(QuickQueriesResponse {
        queries: QUICK_QUERIES.to_vec(),
    })
}
