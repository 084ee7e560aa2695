use super::*;
use crate::services::fixtures::*;
use crate::store::DatasetStore;

fn incident_store() -> DatasetStore {
    DatasetStore::builder()
        .zone_compliance(vec![
            zone(24, "Check-in 34-86", "T2", "1400-1600", 80.0, 1200),
            zone(24, "Check-in 34-86", "T2", "1500-1700", 82.0, 1100),
            zone(24, "Check-in 34-86", "T2", "1600-1800", 84.0, 900),
            zone(24, "Entry Gate 1", "T1", "1400-1600", 99.0, 700),
            zone(24, "Entry Gate 2", "T1", "1400-1600", 96.0, 500),
            zone(24, "Entry Gate 3", "T1", "1400-1600", 100.0, 400),
        ])
        .security_lanes(vec![
            lane(24, "L3", "T2", 2000, 9.5),
            lane(24, "L6", "T2", 1800, 14.0),
            lane(24, "L1", "T1", 2500, 2.0),
            lane(24, "L7", "T2", 1500, 8.5),
            lane(24, "L8", "T1", 1600, 11.0),
        ])
        .pax_hourly(vec![
            showup(24, 13, "T2", 9000),
            showup(24, 14, "T2", 2400),
            showup(24, 15, "T2", 2600),
            showup(24, 15, "T1", 400),
        ])
        .build()
}

#[test]
fn test_zone_in_worst_zones_gets_checkin_factor() {
    let engine = engine(incident_store());
    let report = engine.generate_root_cause_analysis(
        d(24),
        "Check-in 34-86",
        "1400-1600",
        &TerminalFilter::All,
    );

    assert!(report
        .factors
        .contains(&"Check-in processing delays at Check-in 34-86".to_string()));
    assert_eq!(
        report.primary_issue,
        "Queue compliance dropped to 82.0% (Target: 95%)"
    );
    assert_eq!(report.impact, "3,200 passengers experienced extended wait times");
}

#[test]
fn test_zone_outside_worst_zones_has_no_checkin_factor() {
    let engine = engine(incident_store());
    let report = engine.generate_root_cause_analysis(
        d(24),
        "Entry Gate 3",
        "1400-1600",
        &TerminalFilter::All,
    );
    assert!(report
        .factors
        .iter()
        .all(|f| !f.starts_with("Check-in processing delays")));
}

#[test]
fn test_factor_order_and_content() {
    let engine = engine(incident_store());
    let report = engine.generate_root_cause_analysis(
        d(24),
        "Check-in 34-86",
        "1400-1600",
        &TerminalFilter::All,
    );

    assert_eq!(report.factors.len(), 3);
    assert_eq!(
        report.factors[0],
        "High passenger volumes during 1400-1600: ~2,700 pax/hour"
    );
    assert_eq!(
        report.factors[1],
        "High reject rates at security lanes: L6, L8, L3"
    );
}

#[test]
fn test_volume_factor_needs_observed_hours() {
    let engine = engine(incident_store());
    let report = engine.generate_root_cause_analysis(
        d(24),
        "Check-in 34-86",
        "0200-0400",
        &TerminalFilter::All,
    );
    assert!(report.factors.iter().all(|f| !f.starts_with("High passenger volumes")));

    let unparsed = engine.generate_root_cause_analysis(
        d(24),
        "Check-in 34-86",
        "afternoon",
        &TerminalFilter::All,
    );
    assert_eq!(unparsed.factors.len(), 2);
}

#[test]
fn test_severity_and_recommendations() {
    let engine = engine(incident_store());
    let report = engine.generate_root_cause_analysis(
        d(24),
        "Check-in 34-86",
        "1400-1600",
        &TerminalFilter::All,
    );
    // mean of 80, 82, 84, 99, 96, 100
    assert_eq!(report.severity, Severity::Medium);
    assert_eq!(report.recommendations.len(), 4);
    assert!(report.recommendations[0].starts_with("Open additional security lanes"));

    let t2 = engine.generate_root_cause_analysis(
        d(24),
        "Check-in 34-86",
        "1400-1600",
        &TerminalFilter::from_csv("T2"),
    );
    assert_eq!(t2.severity, Severity::High);
}

#[test]
fn test_empty_day_report() {
    let engine = engine(incident_store());
    let report =
        engine.generate_root_cause_analysis(d(2), "Check-in 34-86", "1400-1600", &TerminalFilter::All);
    assert!(report.factors.is_empty());
    assert_eq!(report.primary_issue, "Queue compliance dropped to 0.0% (Target: 95%)");
    assert_eq!(report.impact, "0 passengers experienced extended wait times");
    assert_eq!(report.severity, Severity::High);
}

#[test]
fn test_custom_recommendation_table() {
    let table = RecommendationTable::default().with(
        IssueType::QueueCompliance,
        vec!["Deploy floor walkers".to_string()],
    );
    let engine = engine(incident_store()).with_recommendations(table);
    let report = engine.generate_root_cause_analysis(
        d(24),
        "Check-in 34-86",
        "1400-1600",
        &TerminalFilter::All,
    );
    assert_eq!(report.recommendations, vec!["Deploy floor walkers"]);
    assert!(RecommendationTable::empty()
        .for_issue(IssueType::SecurityRejects)
        .is_empty());
}
