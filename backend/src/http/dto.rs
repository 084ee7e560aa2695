//! Query parameters and envelopes for the HTTP API.
//!
//! Result payloads are the route types re-exported from [`crate::api`]; they
//! already derive `Serialize`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::AppError;
use crate::aggregation::TerminalFilter;
use crate::chat::ChatTurn;
use crate::routes::trends::PassengerGroupBy;

pub const DEFAULT_OVERVIEW_TREND_DAYS: u32 = 15;
pub const DEFAULT_TREND_DAYS: u32 = 30;
pub const DEFAULT_ROOT_CAUSE_ZONE: &str = "Check-in 34-86";
pub const DEFAULT_ROOT_CAUSE_WINDOW: &str = "1400-1600";

/// Parse an optional `YYYY-MM-DD` value, falling back to `default`.
pub fn parse_date(raw: Option<&str>, default: NaiveDate) -> Result<NaiveDate, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(default),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|e| AppError::BadRequest(format!("Invalid date '{}': {}", s, e))),
    }
}

/// Parse an optional comma-separated terminal list, falling back to `default`.
pub fn parse_terminals(raw: Option<&str>, default: &[String]) -> TerminalFilter {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(csv) => TerminalFilter::from_csv(csv),
        None => TerminalFilter::parse(default),
    }
}

/// `date` and `terminals`, shared by most endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SliceQuery {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub terminals: Option<String>,
}

/// Query for endpoints that take a date only.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DateQuery {
    #[serde(default)]
    pub date: Option<String>,
}

/// Query parameters for multi-day windows ending at `end_date`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WindowQuery {
    #[serde(default)]
    pub days: Option<u32>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub terminals: Option<String>,
    /// Passenger trends only: passenger_type, terminal, flow or none.
    #[serde(default)]
    pub group_by: Option<String>,
}

impl WindowQuery {
    pub fn group_by(&self) -> PassengerGroupBy {
        self.group_by
            .as_deref()
            .map(PassengerGroupBy::parse)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RootCauseQuery {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub terminals: Option<String>,
    #[serde(default)]
    pub zone: Option<String>,
    #[serde(default)]
    pub time_window: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ZoneDetailQuery {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub terminals: Option<String>,
    #[serde(default)]
    pub zone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct QueueTableQuery {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub terminals: Option<String>,
    #[serde(default)]
    pub violations_only: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighRejectQuery {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub terminals: Option<String>,
    /// Reject rate in percent; defaults to the configured policy threshold.
    #[serde(default)]
    pub threshold: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AirlineQuery {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Request body for both chat endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub query: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub terminals: Option<String>,
    #[serde(default)]
    pub conversation_history: Vec<ChatTurn>,
}

/// List payloads are wrapped so the envelope can grow without breaking clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Digest of the loaded dataset snapshot.
    pub snapshot: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponseBody {
    pub response: String,
    /// `generator` or `fallback`.
    pub mode: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DemoPromptsResponse {
    pub prompts: Vec<crate::chat::DemoPrompt>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuickQueriesResponse {
    pub queries: Vec<&'static str>,
}
