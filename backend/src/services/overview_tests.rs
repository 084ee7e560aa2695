use super::*;
use crate::algorithms::Severity;
use crate::services::fixtures::*;
use crate::store::DatasetStore;

fn overview_store() -> DatasetStore {
    DatasetStore::builder()
        .zone_compliance(vec![
            zone(24, "Check-in 34-86", "T2", "1400-1600", 80.0, 1200),
            zone(24, "Check-in 34-86", "T2", "1600-1800", 90.0, 900),
            zone(24, "Entry Gate 1", "T1", "0600-0800", 93.5, 700),
            zone(24, "Entry Gate 1", "T1", "1400-1600", 99.0, 500),
        ])
        .pax_daily(vec![
            pax(22, "T1", "Departure", "Domestic", 1000, None),
            pax(23, "T1", "Departure", "Domestic", 2000, Some(2.0)),
            pax(23, "T1", "Arrival", "International", 500, None),
            pax(24, "T1", "Departure", "Domestic", 3000, Some(4.0)),
            pax(24, "T2", "Departure", "International", 1500, Some(-1.0)),
            pax(24, "T2", "Arrival", "Domestic", 700, None),
        ])
        .atm(vec![
            atm(23, "T1", "Domestic", 40),
            atm(24, "T1", "Domestic", 50),
            atm(24, "T2", "International", 20),
        ])
        .voc_feedback(vec![feedback(24, "T1", "Twitter", 0, 9)])
        .otp(vec![otp(24, "T1", 86.0), otp(24, "T2", 83.0)])
        .baggage_delivery(vec![bag_delivery(24, "T1", 92.0)])
        .slot_adherence(vec![slot(24, "T1", 4, 97.5), slot(24, "T2", 10, 92.0)])
        .safety(vec![
            safety(24, "T1", "FOD", true),
            safety(24, "T2", "Spill", false),
        ])
        .build()
}

#[test]
fn test_kpis() {
    let engine = engine(overview_store());
    let kpis = engine.kpis(d(24), &TerminalFilter::from_csv("T1,T2"));

    assert_eq!(kpis.total_pax, 5200);
    assert_eq!(kpis.domestic_pax, 3700);
    assert_eq!(kpis.international_pax, 1500);
    assert_eq!(kpis.pax_vs_7day_pct, 1.5);
    assert_eq!(kpis.total_atm, 70);
    assert_eq!(kpis.queue_rows, 4);
    assert_eq!(kpis.queue_compliance_pct, 90.6);
    assert_eq!(kpis.compliance_delta, -4.4);
    assert_eq!(kpis.voc_ratio, VocRatio::Unbounded);
    assert_eq!(kpis.otp_pct, 84.5);
    assert_eq!(kpis.baggage_delivery_pct, 92.0);
    assert_eq!(kpis.first_bag_minutes, 9.0);
    assert_eq!(kpis.last_bag_minutes, 31.0);
    assert_eq!(kpis.safety_issues, 2);
    assert_eq!(kpis.slot_adherence_pct, 94.8);
}

#[test]
fn test_kpis_empty_day() {
    let engine = engine(overview_store());
    let kpis = engine.kpis(d(5), &TerminalFilter::All);
    assert_eq!(kpis.queue_rows, 0);
    assert_eq!(kpis.queue_compliance_pct, 0.0);
    assert_eq!(kpis.voc_ratio, VocRatio::NoFeedback);
    assert_eq!(kpis.otp_pct, 0.0);
}

#[test]
fn test_pax_trend_window_is_inclusive() {
    let engine = engine(overview_store());
    let trend = engine.pax_trend(2, d(24), &TerminalFilter::All);
    assert_eq!(trend.len(), 2);
    assert_eq!(
        trend[0],
        DailySplit {
            date: d(23),
            total: 2500,
            domestic: 2000,
            international: 500,
        }
    );
    assert_eq!(trend[1].total, 5200);

    assert_eq!(engine.pax_trend(3, d(24), &TerminalFilter::All).len(), 3);
    assert_eq!(engine.pax_trend(0, d(24), &TerminalFilter::All).len(), 1);
}

#[test]
fn test_atm_trend_splits_by_movement_type() {
    let engine = engine(overview_store());
    let trend = engine.atm_trend(7, d(24), &TerminalFilter::All);
    assert_eq!(trend.len(), 2);
    assert_eq!(trend[1].domestic, 50);
    assert_eq!(trend[1].international, 20);

    let t2 = engine.atm_trend(7, d(24), &TerminalFilter::from_csv("T2"));
    assert_eq!(t2.len(), 1);
    assert_eq!(t2[0].total, 20);
}

#[test]
fn test_terminal_breakdown() {
    let engine = engine(overview_store());
    let breakdown = engine.terminal_breakdown(d(24));
    let rows: Vec<(&str, &str, i64)> = breakdown
        .iter()
        .map(|r| (r.terminal.as_str(), r.flow.as_str(), r.pax_count))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("T1", "Departure", 3000),
            ("T2", "Arrival", 700),
            ("T2", "Departure", 1500),
        ]
    );
}

#[test]
fn test_zone_compliance_summary_ascending() {
    let engine = engine(overview_store());
    let summary = engine.zone_compliance_summary(d(24), &TerminalFilter::All);
    assert_eq!(summary.len(), 2);
    assert_eq!(summary[0].zone, "Check-in 34-86");
    assert_eq!(summary[0].actual_compliance_pct, 85.0);
    assert_eq!(summary[1].actual_compliance_pct, 96.3);
}

#[test]
fn test_alerts() {
    let engine = engine(overview_store());
    let alerts = engine.alerts(d(24), &TerminalFilter::All);

    assert_eq!(alerts.queue_alerts.len(), 3);
    assert_eq!(alerts.queue_alerts[0].compliance, 80.0);
    assert_eq!(alerts.queue_alerts[0].variance, -15.0);
    assert_eq!(alerts.queue_alerts[0].severity, Severity::High);
    assert_eq!(alerts.queue_alerts[1].severity, Severity::Medium);
    assert_eq!(alerts.queue_alerts[2].zone, "Entry Gate 1");
    assert_eq!(alerts.queue_alerts[2].severity, Severity::Low);

    assert_eq!(alerts.safety_alerts.len(), 2);
    assert!(!alerts.safety_alerts[1].resolved);
}
