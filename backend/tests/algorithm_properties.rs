//! Properties of the metrics calculator, anomaly detector and ranking.

mod support;

use airport_ops::aggregation::{rank, Direction};
use airport_ops::algorithms::*;
use proptest::prelude::*;

use support::{lane_row, zone_row};

#[test]
fn test_compliance_status_boundaries() {
    assert_eq!(compliance_status(95.0, 95.0), ComplianceStatus::OnTarget);
    assert_eq!(compliance_status(94.9, 95.0), ComplianceStatus::NearTarget);
    assert_eq!(compliance_status(92.0, 95.0), ComplianceStatus::NearTarget);
    assert_eq!(compliance_status(91.999, 95.0), ComplianceStatus::BelowTarget);
}

#[test]
fn test_voc_ratio_sentinels_are_distinct() {
    let unbounded = voc_ratio(10, 0);
    let empty = voc_ratio(0, 0);

    assert_eq!(unbounded.ratio, VocRatio::Unbounded);
    assert_eq!(unbounded.sentiment, Sentiment::Excellent);
    assert_eq!(empty.ratio, VocRatio::NoFeedback);
    assert_ne!(unbounded.ratio, empty.ratio);
}

#[test]
fn test_queue_severity_escalates_across_bands() {
    let variances = [-3.0, -3.01, -7.0, -7.01];
    let rows: Vec<_> = variances
        .iter()
        .map(|v| zone_row("Check-in 34-86", "T2", "1400-1600", 95.0 + v, 500))
        .collect();
    let severities: Vec<Severity> = queue_anomalies(&rows, 95.0)
        .into_iter()
        .map(|a| a.severity)
        .collect();

    assert_eq!(
        severities,
        vec![Severity::Low, Severity::Medium, Severity::Medium, Severity::High]
    );
}

#[test]
fn test_low_throughput_is_slice_relative() {
    let slice_a: Vec<_> = [100, 100, 100, 100, 10]
        .iter()
        .enumerate()
        .map(|(i, v)| lane_row(&format!("A{}", i), "T1", *v, 2.0))
        .collect();
    let flagged: Vec<String> = security_lane_anomalies(&slice_a, 8.0, 0.25)
        .into_iter()
        .map(|a| a.source_row.lane)
        .collect();
    assert_eq!(flagged, vec!["A4".to_string()]);

    let slice_b: Vec<_> = [5, 8, 10, 200, 300]
        .iter()
        .enumerate()
        .map(|(i, v)| lane_row(&format!("B{}", i), "T1", *v, 2.0))
        .collect();
    let flagged = security_lane_anomalies(&slice_b, 8.0, 0.25);
    assert!(flagged.iter().all(|a| a.source_row.cleared_volume != 10));
}

#[test]
fn test_rank_keeps_ties_in_input_order() {
    let items = vec![("a", 3.0), ("b", 1.0), ("c", 3.0), ("d", 2.0)];
    let ranked: Vec<(usize, &str)> = rank(&items, |i| i.1, Direction::Descending)
        .into_iter()
        .map(|r| (r.rank, r.item.0))
        .collect();
    assert_eq!(ranked, vec![(1, "a"), (1, "c"), (2, "d"), (3, "b")]);
}

proptest! {
    #[test]
    fn prop_trend_against_zero_is_flat(current in -1.0e9f64..1.0e9) {
        let t = trend(current, 0.0);
        prop_assert_eq!(t.direction, TrendDirection::Flat);
        prop_assert_eq!(t.pct_change, 0.0);
        prop_assert_eq!(t.color, ColorHint::Gray);
    }

    #[test]
    fn prop_severity_never_regresses(a in -40.0f64..0.0, b in -40.0f64..0.0) {
        let (higher, lower) = if a >= b { (a, b) } else { (b, a) };
        let bands = SeverityBands::default();
        prop_assert!(bands.classify(lower) >= bands.classify(higher));
    }

    #[test]
    fn prop_dense_ranks_start_at_one_without_gaps(values in proptest::collection::vec(0u8..8, 1..30)) {
        let ranked = rank(&values, |v| *v as f64, Direction::Ascending);
        prop_assert_eq!(ranked[0].rank, 1);
        for pair in ranked.windows(2) {
            let step = pair[1].rank - pair[0].rank;
            prop_assert!(step <= 1);
            prop_assert_eq!(step == 0, pair[0].item == pair[1].item);
        }
    }
}
