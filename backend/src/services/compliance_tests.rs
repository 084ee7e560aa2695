use super::*;
use crate::services::fixtures::*;
use crate::store::DatasetStore;

fn compliance_store() -> DatasetStore {
    let mut zones: Vec<_> = (0..7)
        .map(|i| zone(24, &format!("Zone {}", i), "T1", "1400-1600", 90.0, 100))
        .collect();
    zones.push(zone(24, "Entry Gate 1", "T2", "1400-1600", 97.0, 100));

    DatasetStore::builder()
        .zone_compliance(zones)
        .safety(vec![
            safety(24, "T1", "FOD", false),
            safety(24, "T1", "Spill", false),
            safety(24, "T2", "Fire alarm", false),
            safety(24, "T2", "Trip hazard", true),
        ])
        .otp(vec![otp(24, "T1", 78.0), otp(24, "T2", 90.0)])
        .slot_adherence(vec![slot(24, "T1", 4, 96.0), slot(24, "T2", 3, 97.0)])
        .build()
}

#[test]
fn test_category_counts_and_severities() {
    let engine = engine(compliance_store());
    let summary = engine.compliance_summary(d(24), &TerminalFilter::All);

    assert_eq!(summary.queue_violations, 7);
    assert_eq!(summary.otp_violations, 1);
    assert_eq!(summary.slot_violations, 7);
    assert_eq!(summary.unresolved_safety, 3);

    let by_name: Vec<(&str, usize, Severity)> = summary
        .categories
        .iter()
        .map(|c| (c.category.as_str(), c.issues, c.severity))
        .collect();
    assert_eq!(
        by_name,
        vec![
            ("Operational", 8, Severity::High),
            ("Regulatory", 5, Severity::High),
            ("Legal", 0, Severity::Low),
            ("Internal SOPs", 5, Severity::Medium),
        ]
    );
    assert_eq!(summary.total_issues, 18);
    assert_eq!(
        summary.categories[0].description,
        "7 queue compliance breaches, 1 OTP violations"
    );
}

#[test]
fn test_quiet_day_has_no_issues() {
    let engine = engine(compliance_store());
    let summary = engine.compliance_summary(d(2), &TerminalFilter::All);
    assert_eq!(summary.total_issues, 0);
    assert!(summary.categories.iter().all(|c| c.severity == Severity::Low));
}

#[test]
fn test_terminal_filter_applies() {
    let engine = engine(compliance_store());
    let summary = engine.compliance_summary(d(24), &TerminalFilter::from_csv("T2"));
    assert_eq!(summary.queue_violations, 0);
    assert_eq!(summary.safety_issues, 2);
    assert_eq!(summary.otp_violations, 0);
    assert_eq!(summary.categories[1].issues, 2);
    assert_eq!(summary.categories[3].issues, 1);
}

#[test]
fn test_upcoming_tasks_sorted_by_deadline() {
    let tasks = upcoming_tasks(d(24));
    assert_eq!(tasks.len(), 8);
    assert_eq!(tasks[0].id, 7);
    assert_eq!(tasks[0].deadline, d(26));
    assert_eq!(tasks[0].status, TaskStatus::Confirmed);
    assert_eq!(tasks[7].days_remaining, 30);
    assert!(tasks.windows(2).all(|w| w[0].days_remaining <= w[1].days_remaining));
}
