use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::algorithms::{AnomalyRecord, UtilizationStatus};
use crate::models::{LaneGroup, SecurityLaneRow, Terminal};

// =========================================================
// Security lane types
// =========================================================

/// Security lane analysis for one date and terminal selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityLaneAnalysis {
    pub date: NaiveDate,
    pub row_count: usize,
    pub total_cleared: i64,
    /// Mean reject rate over lanes, two decimals.
    pub avg_reject_rate: f64,
    /// Up to five lanes by cleared volume, highest first.
    pub top_performing_lanes: Vec<SecurityLaneRow>,
    /// Lanes above the reject threshold, highest rate first.
    pub high_reject_lanes: Vec<SecurityLaneRow>,
    pub anomalies: Vec<AnomalyRecord<SecurityLaneRow>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecuritySummary {
    pub row_count: usize,
    pub total_cleared: i64,
    pub avg_reject_rate: f64,
    pub high_reject_lanes_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneView {
    pub lane: String,
    pub terminal: Terminal,
    pub lane_group: LaneGroup,
    pub cleared_volume: i64,
    pub reject_count: i64,
    pub reject_rate_pct: f64,
    pub total_scanned: i64,
    pub avg_throughput_per_hour: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighRejectLane {
    pub lane: String,
    pub terminal: Terminal,
    pub reject_rate_pct: f64,
    pub reject_count: i64,
    pub cleared_volume: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaggageSummary {
    pub row_count: usize,
    pub total_flights: i64,
    pub total_pax: i64,
    pub avg_pax_per_flight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeltView {
    pub belt: String,
    pub terminal: Terminal,
    pub belt_type: String,
    pub utilization_pct: f64,
    pub utilization_status: UtilizationStatus,
    pub flights: i64,
    pub pax: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaggageView {
    pub summary: BaggageSummary,
    pub belts: Vec<BeltView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardingModeEntry {
    pub boarding_mode: String,
    pub flights: i64,
    pub pax: i64,
    pub pax_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateView {
    pub gate: String,
    pub terminal: Terminal,
    pub boarding_mode: String,
    pub flights: i64,
    pub pax: i64,
    pub pax_per_flight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatesView {
    /// Boarding-mode mix keyed by terminal label.
    pub boarding_mix: BTreeMap<String, Vec<BoardingModeEntry>>,
    /// Gates by passenger count, busiest first.
    pub gates: Vec<GateView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gates_view_keys_by_terminal() {
        let mut boarding_mix = BTreeMap::new();
        boarding_mix.insert(
            "T2".to_string(),
            vec![BoardingModeEntry {
                boarding_mode: "Bus".to_string(),
                flights: 4,
                pax: 600,
                pax_pct: 100.0,
            }],
        );
        let view = GatesView {
            boarding_mix,
            gates: vec![],
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["boarding_mix"]["T2"][0]["boarding_mode"], "Bus");
    }
}
