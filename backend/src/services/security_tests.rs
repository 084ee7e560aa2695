use super::*;
use crate::algorithms::{AnomalyReason, Severity};
use crate::services::fixtures::*;
use crate::store::DatasetStore;

fn lanes_store() -> DatasetStore {
    DatasetStore::builder()
        .security_lanes(vec![
            lane(24, "Lane 1", "T1", 4000, 3.0),
            lane(24, "Lane 2", "T1", 3000, 5.0),
            lane(24, "Lane 3", "T2", 2000, 9.0),
            lane(24, "Lane 4", "T2", 1000, 12.0),
            lane(23, "Lane 4", "T2", 1000, 40.0),
        ])
        .baggage_belts(vec![
            belt(24, "Belt 1", "T1", 50.0, 10, 1500),
            belt(24, "Belt 2", "T2", 90.0, 8, 1300),
        ])
        .gates(vec![
            gate(24, "G1", "T1", "Contact", 10, 1500),
            gate(24, "G2", "T1", "Bus", 5, 500),
            gate(24, "G3", "T2", "Contact", 4, 900),
        ])
        .build()
}

#[test]
fn test_high_reject_lanes_sorted_descending() {
    let engine = engine(lanes_store());
    let analysis = engine.analyze_security_lanes(d(24), &TerminalFilter::All);

    let rates: Vec<f64> = analysis
        .high_reject_lanes
        .iter()
        .map(|r| r.reject_rate_pct)
        .collect();
    assert_eq!(rates, vec![12.0, 9.0]);
    assert_eq!(analysis.avg_reject_rate, 7.25);
    assert_eq!(analysis.total_cleared, 10000);
    assert_eq!(analysis.row_count, 4);
}

#[test]
fn test_top_lanes_by_cleared_volume() {
    let engine = engine(lanes_store());
    let analysis = engine.analyze_security_lanes(d(24), &TerminalFilter::All);
    let names: Vec<&str> = analysis
        .top_performing_lanes
        .iter()
        .map(|r| r.lane.as_str())
        .collect();
    assert_eq!(names, vec!["Lane 1", "Lane 2", "Lane 3", "Lane 4"]);
}

#[test]
fn test_lane_anomalies_graded_by_condition_count() {
    let engine = engine(lanes_store());
    let analysis = engine.analyze_security_lanes(d(24), &TerminalFilter::All);

    assert_eq!(analysis.anomalies.len(), 2);
    let lane3 = &analysis.anomalies[0];
    assert_eq!(lane3.source_row.lane, "Lane 3");
    assert_eq!(lane3.severity, Severity::Medium);
    assert_eq!(lane3.reasons, vec![AnomalyReason::HighReject]);

    let lane4 = &analysis.anomalies[1];
    assert_eq!(lane4.severity, Severity::High);
    assert!(lane4.reasons.contains(&AnomalyReason::LowThroughput));
}

#[test]
fn test_empty_day() {
    let engine = engine(lanes_store());
    let analysis = engine.analyze_security_lanes(d(2), &TerminalFilter::All);
    assert_eq!(analysis.row_count, 0);
    assert_eq!(analysis.avg_reject_rate, 0.0);
    assert!(analysis.high_reject_lanes.is_empty());
    assert!(analysis.anomalies.is_empty());
}

#[test]
fn test_summary_and_lane_views() {
    let engine = engine(lanes_store());
    let summary = engine.security_summary(d(24), &TerminalFilter::All);
    assert_eq!(summary.high_reject_lanes_count, 2);
    assert_eq!(summary.total_cleared, 10000);

    let lanes = engine.lanes(d(24), &TerminalFilter::from_csv("T2"));
    assert_eq!(lanes.len(), 2);
    assert_eq!(lanes[0].lane, "Lane 3");
    assert_eq!(lanes[0].cleared_volume, 2000);
}

#[test]
fn test_high_reject_custom_threshold() {
    let engine = engine(lanes_store());
    let lanes = engine.high_reject(d(24), &TerminalFilter::All, 4.0);
    let names: Vec<&str> = lanes.iter().map(|l| l.lane.as_str()).collect();
    assert_eq!(names, vec!["Lane 4", "Lane 3", "Lane 2"]);
    assert!(engine.high_reject(d(24), &TerminalFilter::All, 50.0).is_empty());
}

#[test]
fn test_baggage_view() {
    let engine = engine(lanes_store());
    let view = engine.baggage(d(24), &TerminalFilter::All);
    assert_eq!(view.summary.total_flights, 18);
    assert_eq!(view.summary.total_pax, 2800);
    assert_eq!(view.summary.avg_pax_per_flight, 156.0);
    assert_eq!(view.belts[0].utilization_status, UtilizationStatus::UnderUtilized);
    assert_eq!(view.belts[1].utilization_status, UtilizationStatus::NearCapacity);

    let empty = engine.baggage(d(3), &TerminalFilter::All);
    assert_eq!(empty.summary.row_count, 0);
    assert_eq!(empty.summary.avg_pax_per_flight, 0.0);
}

#[test]
fn test_gates_mix_and_order() {
    let engine = engine(lanes_store());
    let view = engine.gates(d(24), &TerminalFilter::All);

    let t1 = &view.boarding_mix["T1"];
    assert_eq!(t1.len(), 2);
    assert_eq!(t1[0].boarding_mode, "Bus");
    assert_eq!(t1[0].pax_pct, 25.0);
    assert_eq!(t1[1].pax_pct, 75.0);
    assert_eq!(view.boarding_mix["T2"][0].pax_pct, 100.0);

    let order: Vec<&str> = view.gates.iter().map(|g| g.gate.as_str()).collect();
    assert_eq!(order, vec!["G1", "G3", "G2"]);
    assert_eq!(view.gates[2].pax_per_flight, 100.0);
}

#[test]
fn test_gates_mix_keys_follow_filter() {
    let engine = engine(lanes_store());
    let view = engine.gates(d(24), &TerminalFilter::from_csv("T2"));
    assert_eq!(view.boarding_mix.len(), 1);
    assert!(view.boarding_mix.contains_key("T2"));

    let empty = engine.gates(d(5), &TerminalFilter::All);
    assert!(empty.boarding_mix["T1"].is_empty());
    assert!(empty.gates.is_empty());
}
