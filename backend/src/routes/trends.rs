use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Terminal;

use super::voc::TerminalFeedback;

// =========================================================
// Trends types
// =========================================================

/// Dimension a passenger trend is split by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassengerGroupBy {
    #[default]
    PassengerType,
    Terminal,
    Flow,
    None,
}

impl PassengerGroupBy {
    /// Parse a query value; unrecognised dimensions mean no split.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "passenger_type" => PassengerGroupBy::PassengerType,
            "terminal" => PassengerGroupBy::Terminal,
            "flow" => PassengerGroupBy::Flow,
            _ => PassengerGroupBy::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerTrendPoint {
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub pax_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassengerTrends {
    pub group_by: PassengerGroupBy,
    pub data: Vec<PassengerTrendPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiometricDaily {
    pub date: NaiveDate,
    pub terminal: Terminal,
    pub adoption_pct: f64,
    pub success_rate: f64,
    pub total_eligible: i64,
    pub registrations: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRegistrations {
    pub channel: String,
    pub registrations: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiometricTrends {
    pub daily: Vec<BiometricDaily>,
    /// Registrations per channel on the last day of the window.
    pub channels: Vec<ChannelRegistrations>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocDaily {
    pub date: NaiveDate,
    pub complaints: i64,
    pub compliments: i64,
    pub ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaFeedback {
    pub media_type: String,
    pub total_feedback: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentMessage {
    pub terminal: Terminal,
    pub department: String,
    pub media: String,
    pub message: String,
    pub sentiment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocTrends {
    pub daily: Vec<VocDaily>,
    pub by_terminal: Vec<TerminalFeedback>,
    pub by_media: Vec<MediaFeedback>,
    pub recent_messages: Vec<RecentMessage>,
}
