//! Public API surface for the analytics backend.
//!
//! This file consolidates the result types served over HTTP.
//! All types derive Serialize for JSON serialization.

pub use crate::routes::compliance::ComplianceCategory;
pub use crate::routes::compliance::ComplianceSummary;
pub use crate::routes::compliance::TaskPriority;
pub use crate::routes::compliance::TaskStatus;
pub use crate::routes::compliance::UpcomingTask;
pub use crate::routes::filters::FilterOptions;
pub use crate::routes::filters::TimeWindow;
pub use crate::routes::overview::ActionPriority;
pub use crate::routes::overview::Alerts;
pub use crate::routes::overview::DailySplit;
pub use crate::routes::overview::ExecutiveOverview;
pub use crate::routes::overview::ExecutiveStatus;
pub use crate::routes::overview::ExecutiveSummaryText;
pub use crate::routes::overview::Kpis;
pub use crate::routes::overview::PriorityAction;
pub use crate::routes::overview::QueueAlert;
pub use crate::routes::overview::SafetyAlert;
pub use crate::routes::overview::TerminalFlowPax;
pub use crate::routes::overview::ZoneMean;
pub use crate::routes::passengers::AirlineShare;
pub use crate::routes::passengers::HourlyVolume;
pub use crate::routes::passengers::PassengerVolumeAnalysis;
pub use crate::routes::queue::QueueComplianceAnalysis;
pub use crate::routes::queue::QueueHeatmap;
pub use crate::routes::queue::QueueStatus;
pub use crate::routes::queue::QueueTableRow;
pub use crate::routes::queue::RootCauseReport;
pub use crate::routes::queue::WorstHour;
pub use crate::routes::queue::ZoneDetail;
pub use crate::routes::queue::ZonePerformanceSummary;
pub use crate::routes::queue::ZoneWindowPoint;
pub use crate::routes::security::BaggageSummary;
pub use crate::routes::security::BaggageView;
pub use crate::routes::security::BeltView;
pub use crate::routes::security::BoardingModeEntry;
pub use crate::routes::security::GateView;
pub use crate::routes::security::GatesView;
pub use crate::routes::security::HighRejectLane;
pub use crate::routes::security::LaneView;
pub use crate::routes::security::SecurityLaneAnalysis;
pub use crate::routes::security::SecuritySummary;
pub use crate::routes::trends::BiometricDaily;
pub use crate::routes::trends::BiometricTrends;
pub use crate::routes::trends::ChannelRegistrations;
pub use crate::routes::trends::MediaFeedback;
pub use crate::routes::trends::PassengerGroupBy;
pub use crate::routes::trends::PassengerTrendPoint;
pub use crate::routes::trends::PassengerTrends;
pub use crate::routes::trends::RecentMessage;
pub use crate::routes::trends::VocDaily;
pub use crate::routes::trends::VocTrends;
pub use crate::routes::voc::TerminalFeedback;
pub use crate::routes::voc::VocSentimentAnalysis;

// Value types that appear inside the results above.
pub use crate::aggregation::Cell;
pub use crate::algorithms::{
    AnomalyReason, AnomalyRecord, ComplianceStatus, Sentiment, Severity, UtilizationStatus,
    VocRatio,
};
pub use crate::models::Terminal;

#[cfg(test)]
#[path = "api_tests.rs"]
mod api_tests;
