use super::*;
use crate::aggregation::Cell;
use crate::algorithms::{ComplianceStatus, Severity};
use crate::models::Terminal;
use crate::services::fixtures::*;
use crate::store::DatasetStore;

fn checkin_drop_store() -> DatasetStore {
    DatasetStore::builder()
        .zone_compliance(vec![
            zone(24, "Check-in 34-86", "T2", "1400-1600", 80.0, 1200),
            zone(24, "Check-in 34-86", "T2", "1500-1700", 82.0, 1100),
            zone(24, "Check-in 34-86", "T2", "1600-1800", 84.0, 900),
            zone(24, "Entry Gate 1", "T1", "1400-1600", 98.0, 700),
            zone(24, "Entry Gate 1", "T1", "1600-1800", 96.0, 650),
            zone(24, "Security Domestic", "T2", "1400-1600", 93.0, 1500),
            zone(23, "Check-in 34-86", "T2", "1400-1600", 60.0, 5000),
        ])
        .hourly_compliance(vec![
            hourly(24, 14, "Check-in 34-86", "T2", 78.0),
            hourly(24, 15, "Check-in 34-86", "T2", 71.5),
            hourly(24, 16, "Security Domestic", "T2", 71.5),
        ])
        .build()
}

#[test]
fn test_checkin_drop_is_reported() {
    let engine = engine(checkin_drop_store());
    let analysis = engine.analyze_queue_compliance(d(24), &TerminalFilter::only(Terminal::T2));

    assert_eq!(analysis.row_count, 4);
    assert!(analysis.zones_below_target >= 1);
    assert_eq!(analysis.zones_below_target, 2);
    assert_eq!(analysis.worst_zones[0].zone, "Check-in 34-86");
    assert_eq!(analysis.worst_zones[0].total_pax, 3200);
    assert!((analysis.worst_zones[0].mean_compliance - 82.0).abs() < 1e-9);
    assert!((analysis.worst_zones[0].mean_variance + 13.0).abs() < 1e-9);
    assert_eq!(analysis.total_pax_affected, 1200 + 1100 + 900 + 1500);
}

#[test]
fn test_pax_affected_counts_only_breaching_rows() {
    let engine = engine(checkin_drop_store());
    let both = TerminalFilter::from_csv("T1,T2");
    let analysis = engine.analyze_queue_compliance(d(24), &both);

    assert_eq!(analysis.row_count, 6);
    assert_eq!(analysis.total_pax_affected, 4700);
    assert_eq!(analysis.anomalies.len(), 4);
    assert_eq!(analysis.anomalies[0].severity, Severity::High);
    assert_eq!(analysis.anomalies[3].source_row.zone, "Security Domestic");
    assert_eq!(analysis.anomalies[3].severity, Severity::Low);
}

#[test]
fn test_worst_windows_sorted_and_thresholded() {
    let engine = engine(checkin_drop_store());
    let analysis = engine.analyze_queue_compliance(d(24), &TerminalFilter::All);
    let windows: Vec<f64> = analysis
        .worst_time_windows
        .iter()
        .map(|r| r.actual_compliance_pct)
        .collect();
    assert_eq!(windows, vec![80.0, 82.0, 84.0]);
}

#[test]
fn test_worst_hour_first_row_wins_tie() {
    let engine = engine(checkin_drop_store());
    let worst = engine.worst_hour(d(24), &TerminalFilter::All).unwrap();
    assert_eq!(worst.hour, 15);
    assert_eq!(worst.zone, "Check-in 34-86");
}

#[test]
fn test_empty_slice_yields_zeroes_with_row_count() {
    let engine = engine(checkin_drop_store());
    let analysis = engine.analyze_queue_compliance(d(1), &TerminalFilter::All);
    assert_eq!(analysis.row_count, 0);
    assert_eq!(analysis.overall_compliance, 0.0);
    assert!(analysis.worst_zones.is_empty());
    assert!(analysis.worst_hour.is_none());

    let unknown = engine.analyze_queue_compliance(d(24), &TerminalFilter::from_csv("T9"));
    assert_eq!(unknown.row_count, 0);
    assert_eq!(unknown.total_pax_affected, 0);
}

#[test]
fn test_queue_status() {
    let engine = engine(checkin_drop_store());
    let status = engine.queue_status(d(24), &TerminalFilter::All);
    assert_eq!(status.total_zones, 3);
    assert_eq!(status.zones_below_target, 2);
    assert_eq!(status.target_achievement_pct, 33.0);
    assert_eq!(status.overall_compliance, 88.8);

    let empty = engine.queue_status(d(2), &TerminalFilter::All);
    assert_eq!(empty.target_achievement_pct, 100.0);
    assert_eq!(empty.row_count, 0);
}

#[test]
fn test_zone_list_and_detail() {
    let engine = engine(checkin_drop_store());
    assert_eq!(
        engine.zones(d(24), &TerminalFilter::All),
        vec!["Check-in 34-86", "Entry Gate 1", "Security Domestic"]
    );

    let detail = engine.zone_detail(d(24), "Check-in 34-86", &TerminalFilter::All);
    assert_eq!(detail.row_count, 3);
    assert_eq!(detail.avg_compliance, 82.0);
    assert_eq!(detail.threshold_minutes, 10);
    assert_eq!(detail.total_pax, 3200);
    assert_eq!(detail.time_series.len(), 3);
    assert_eq!(detail.time_series[1].time_window, "1500-1700");

    let missing = engine.zone_detail(d(24), "Nowhere", &TerminalFilter::All);
    assert_eq!(missing.row_count, 0);
    assert!(missing.time_series.is_empty());
}

#[test]
fn test_heatmap_marks_missing_cells() {
    let engine = engine(checkin_drop_store());
    let heatmap = engine.queue_heatmap(d(24), &TerminalFilter::All);
    assert_eq!(heatmap.zones.len(), 3);
    assert_eq!(
        heatmap.time_windows,
        vec!["1400-1600", "1500-1700", "1600-1800"]
    );
    let entry = heatmap.zones.iter().position(|z| z == "Entry Gate 1").unwrap();
    assert_eq!(heatmap.values[entry][0], Cell::Value(98.0));
    assert_eq!(heatmap.values[entry][1], Cell::NoData);
}

#[test]
fn test_queue_table_violations_only() {
    let engine = engine(checkin_drop_store());
    let all = engine.queue_table(d(24), &TerminalFilter::All, false);
    assert_eq!(all.len(), 6);
    assert_eq!(all[0].actual_compliance_pct, 80.0);
    assert_eq!(all[5].status, ComplianceStatus::OnTarget);

    let violations = engine.queue_table(d(24), &TerminalFilter::All, true);
    assert_eq!(violations.len(), 4);
    assert_eq!(violations[3].status, ComplianceStatus::NearTarget);
    assert_eq!(violations[0].status, ComplianceStatus::BelowTarget);
}

#[test]
fn test_analysis_is_idempotent() {
    let engine = engine(checkin_drop_store());
    let first = serde_json::to_string(&engine.analyze_queue_compliance(d(24), &TerminalFilter::All)).unwrap();
    let second = serde_json::to_string(&engine.analyze_queue_compliance(d(24), &TerminalFilter::All)).unwrap();
    assert_eq!(first, second);
}
