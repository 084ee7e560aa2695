use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::algorithms::{Sentiment, Severity, VocRatio};
use crate::models::{Flow, Terminal};

// =========================================================
// Executive overview types
// =========================================================

/// Headline KPI cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    pub date: NaiveDate,
    pub total_pax: i64,
    pub domestic_pax: i64,
    pub international_pax: i64,
    pub pax_vs_7day_pct: f64,
    pub total_atm: i64,
    /// Zone rows behind `queue_compliance_pct`; zero means no data.
    pub queue_rows: usize,
    pub queue_compliance_pct: f64,
    pub compliance_delta: f64,
    pub voc_ratio: VocRatio,
    pub total_complaints: i64,
    pub total_compliments: i64,
    pub otp_pct: f64,
    pub baggage_delivery_pct: f64,
    pub first_bag_minutes: f64,
    pub last_bag_minutes: f64,
    pub safety_issues: usize,
    pub slot_adherence_pct: f64,
}

/// Overall report status. Ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutiveStatus {
    OnTrack,
    Attention,
    Critical,
}

impl ExecutiveStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ExecutiveStatus::OnTrack => "On Track",
            ExecutiveStatus::Attention => "Attention Needed",
            ExecutiveStatus::Critical => "Action Required",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionPriority {
    Immediate,
    Today,
    #[serde(rename = "This Week")]
    ThisWeek,
}

impl ActionPriority {
    pub fn label(&self) -> &'static str {
        match self {
            ActionPriority::Immediate => "Immediate",
            ActionPriority::Today => "Today",
            ActionPriority::ThisWeek => "This Week",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityAction {
    pub priority: ActionPriority,
    pub action: String,
}

/// Structured executive summary for the overview page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveOverview {
    /// Long-form date, e.g. `January 24, 2026`.
    pub date: String,
    pub status: ExecutiveStatus,
    pub status_label: String,
    pub status_detail: String,
    pub total_pax: i64,
    pub domestic_pax: i64,
    pub international_pax: i64,
    pub pax_vs_7day_pct: f64,
    pub queue_compliance: f64,
    pub zones_below_target: usize,
    pub otp_pct: f64,
    pub baggage_delivery_pct: f64,
    pub voc_ratio: VocRatio,
    pub voc_sentiment: Sentiment,
    pub total_complaints: i64,
    pub total_compliments: i64,
    pub actions: Vec<PriorityAction>,
}

/// Markdown executive summary plus the status it was graded with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveSummaryText {
    pub date: NaiveDate,
    pub status: ExecutiveStatus,
    pub text: String,
}

/// Daily total with its domestic/international split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySplit {
    pub date: NaiveDate,
    pub total: i64,
    pub domestic: i64,
    pub international: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalFlowPax {
    pub terminal: Terminal,
    pub flow: Flow,
    pub pax_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneMean {
    pub zone: String,
    pub actual_compliance_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueAlert {
    pub zone: String,
    pub time_window: String,
    pub compliance: f64,
    pub pax_affected: i64,
    pub variance: f64,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyAlert {
    pub category: String,
    pub terminal: Terminal,
    pub severity: String,
    pub resolved: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alerts {
    pub queue_alerts: Vec<QueueAlert>,
    pub safety_alerts: Vec<SafetyAlert>,
}
