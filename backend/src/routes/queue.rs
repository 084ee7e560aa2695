use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aggregation::Cell;
use crate::algorithms::{AnomalyRecord, ComplianceStatus, Severity};
use crate::models::{Terminal, ZoneComplianceRow};

// =========================================================
// Queue compliance types
// =========================================================

/// Per-zone rollup of one day's compliance rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZonePerformanceSummary {
    pub zone: String,
    pub mean_compliance: f64,
    pub mean_variance: f64,
    pub total_pax: i64,
}

/// The hour with the lowest compliance in the hourly dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorstHour {
    pub hour: u32,
    pub zone: String,
    pub terminal: Terminal,
    pub actual_compliance_pct: f64,
    pub pax_total: i64,
}

/// Queue compliance analysis for one date and terminal selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueComplianceAnalysis {
    pub date: NaiveDate,
    /// Zone rows in the slice; zero means the aggregates below are "no data".
    pub row_count: usize,
    pub overall_compliance: f64,
    pub target: f64,
    pub zones_below_target: usize,
    /// Up to three zones, lowest mean compliance first.
    pub worst_zones: Vec<ZonePerformanceSummary>,
    /// Up to five rows under the worst-window threshold, ascending.
    pub worst_time_windows: Vec<ZoneComplianceRow>,
    pub anomalies: Vec<AnomalyRecord<ZoneComplianceRow>>,
    pub total_pax_affected: i64,
    pub worst_hour: Option<WorstHour>,
}

/// Structured root-cause report for one zone and time window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootCauseReport {
    pub zone: String,
    pub time_window: String,
    pub primary_issue: String,
    pub factors: Vec<String>,
    pub impact: String,
    pub recommendations: Vec<String>,
    pub severity: Severity,
}

/// Headline queue numbers for the status cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueStatus {
    pub row_count: usize,
    pub overall_compliance: f64,
    pub zones_below_target: usize,
    pub total_zones: usize,
    pub pax_affected: i64,
    pub target_achievement_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneWindowPoint {
    pub time_window: String,
    pub actual_compliance_pct: f64,
    pub pax_total: i64,
    pub avg_wait_time_min: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneDetail {
    pub zone: String,
    pub row_count: usize,
    pub avg_compliance: f64,
    pub threshold_minutes: i64,
    pub total_pax: i64,
    pub avg_wait_time: f64,
    pub time_series: Vec<ZoneWindowPoint>,
}

/// Zone x time-window mean compliance. Missing combinations are `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueueHeatmap {
    pub zones: Vec<String>,
    pub time_windows: Vec<String>,
    pub values: Vec<Vec<Cell>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueTableRow {
    pub zone: String,
    pub terminal: Terminal,
    pub time_window: String,
    pub actual_compliance_pct: f64,
    pub target_compliance_pct: f64,
    pub variance_from_target: f64,
    pub pax_total: i64,
    pub avg_wait_time_min: f64,
    pub status: ComplianceStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_cause_serializes_severity_label() {
        let report = RootCauseReport {
            zone: "Check-in 34-86".to_string(),
            time_window: "1400-1600".to_string(),
            primary_issue: "Queue compliance dropped to 80.0% (Target: 95%)".to_string(),
            factors: vec![],
            impact: "0 passengers experienced extended wait times".to_string(),
            recommendations: vec![],
            severity: Severity::High,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["severity"], "High");
        assert_eq!(json["zone"], "Check-in 34-86");
    }

    #[test]
    fn test_heatmap_null_cells() {
        let heatmap = QueueHeatmap {
            zones: vec!["Zone A".to_string()],
            time_windows: vec!["0600-0800".to_string(), "0800-1000".to_string()],
            values: vec![vec![Cell::Value(97.5), Cell::NoData]],
        };
        let json = serde_json::to_value(&heatmap).unwrap();
        assert_eq!(json["values"], serde_json::json!([[97.5, null]]));
    }
}
