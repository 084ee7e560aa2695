//! Queue compliance analyses.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::aggregation::{
    bottom_n, filter, filter_segmented, group_and_aggregate, mean, pivot, round_to,
    sort_by_measure, Aggregation, Direction, TerminalFilter,
};
use crate::algorithms::{compliance_status_with_band, queue_anomalies_with_bands, SeverityBands};
use crate::models::ZoneComplianceRow;
use crate::routes::queue::*;

use super::ReasoningEngine;

const WORST_ZONE_COUNT: usize = 3;
const WORST_WINDOW_COUNT: usize = 5;

/// Per-zone means and pax totals, lowest mean compliance first. Zones with
/// equal means keep the order they first appear in.
pub(crate) fn zone_performance<'a, I>(rows: I) -> Vec<ZonePerformanceSummary>
where
    I: IntoIterator<Item = &'a ZoneComplianceRow>,
{
    let groups = group_and_aggregate(
        rows,
        |r: &ZoneComplianceRow| r.zone.clone(),
        &[
            Aggregation::mean(|r: &ZoneComplianceRow| r.actual_compliance_pct),
            Aggregation::mean(|r: &ZoneComplianceRow| r.variance_from_target),
            Aggregation::sum(|r: &ZoneComplianceRow| r.pax_total as f64),
        ],
    );

    let mut zones: Vec<ZonePerformanceSummary> = groups
        .into_iter()
        .map(|g| ZonePerformanceSummary {
            mean_compliance: g.value(0),
            mean_variance: g.value(1),
            total_pax: g.value(2) as i64,
            zone: g.key,
        })
        .collect();
    sort_by_measure(&mut zones, |z| z.mean_compliance, Direction::Ascending);
    zones
}

fn mean_compliance(rows: &[&ZoneComplianceRow]) -> Option<f64> {
    let values: Vec<f64> = rows.iter().map(|r| r.actual_compliance_pct).collect();
    mean(&values)
}

impl ReasoningEngine {
    fn zone_rows(&self, date: NaiveDate, terminals: &TerminalFilter) -> Vec<&ZoneComplianceRow> {
        let predicate = self.day(date, terminals);
        filter(self.store.zone_compliance(), &predicate).collect()
    }

    pub fn analyze_queue_compliance(
        &self,
        date: NaiveDate,
        terminals: &TerminalFilter,
    ) -> QueueComplianceAnalysis {
        let target = self.policy.compliance_target;
        let rows = self.zone_rows(date, terminals);

        let zones = zone_performance(rows.iter().copied());
        let zones_below_target = zones.iter().filter(|z| z.mean_compliance < target).count();
        let worst_zones: Vec<ZonePerformanceSummary> =
            zones.into_iter().take(WORST_ZONE_COUNT).collect();

        let mut worst_time_windows: Vec<ZoneComplianceRow> = rows
            .iter()
            .filter(|r| r.actual_compliance_pct < self.policy.worst_window_threshold)
            .map(|r| (*r).clone())
            .collect();
        sort_by_measure(
            &mut worst_time_windows,
            |r| r.actual_compliance_pct,
            Direction::Ascending,
        );
        worst_time_windows.truncate(WORST_WINDOW_COUNT);

        let anomalies = queue_anomalies_with_bands(
            rows.iter().copied(),
            target,
            SeverityBands::from(&self.policy),
        );

        let total_pax_affected = rows
            .iter()
            .filter(|r| r.actual_compliance_pct < target)
            .map(|r| r.pax_total)
            .sum();

        if rows.is_empty() {
            log::debug!("No queue compliance rows for {} ({})", date, terminals.label());
        }

        QueueComplianceAnalysis {
            date,
            row_count: rows.len(),
            overall_compliance: mean_compliance(&rows).unwrap_or(0.0),
            target,
            zones_below_target,
            worst_zones,
            worst_time_windows,
            anomalies,
            total_pax_affected,
            worst_hour: self.worst_hour(date, terminals),
        }
    }

    /// Lowest-compliance hour from the hourly dataset; the first such row wins ties.
    pub fn worst_hour(&self, date: NaiveDate, terminals: &TerminalFilter) -> Option<WorstHour> {
        let predicate = self.day(date, terminals);
        let hourly: Vec<_> = filter(self.store.hourly_compliance(), &predicate).collect();
        bottom_n(&hourly, |r| r.actual_compliance_pct, 1)
            .into_iter()
            .next()
            .map(|r| WorstHour {
                hour: r.hour,
                zone: r.zone.clone(),
                terminal: r.terminal.clone(),
                actual_compliance_pct: r.actual_compliance_pct,
                pax_total: r.pax_total,
            })
    }

    pub fn queue_status(&self, date: NaiveDate, terminals: &TerminalFilter) -> QueueStatus {
        let target = self.policy.compliance_target;
        let rows = self.zone_rows(date, terminals);
        let zones = zone_performance(rows.iter().copied());
        let total_zones = zones.len();
        let zones_below_target = zones.iter().filter(|z| z.mean_compliance < target).count();

        let target_achievement_pct = if total_zones > 0 {
            round_to(
                (total_zones - zones_below_target) as f64 / total_zones as f64 * 100.0,
                0,
            )
        } else {
            100.0
        };

        QueueStatus {
            row_count: rows.len(),
            overall_compliance: round_to(mean_compliance(&rows).unwrap_or(0.0), 1),
            zones_below_target,
            total_zones,
            pax_affected: rows
                .iter()
                .filter(|r| r.actual_compliance_pct < target)
                .map(|r| r.pax_total)
                .sum(),
            target_achievement_pct,
        }
    }

    /// Distinct zone names in the slice, sorted.
    pub fn zones(&self, date: NaiveDate, terminals: &TerminalFilter) -> Vec<String> {
        let names: BTreeSet<&str> = self
            .zone_rows(date, terminals)
            .into_iter()
            .map(|r| r.zone.as_str())
            .collect();
        names.into_iter().map(str::to_string).collect()
    }

    pub fn zone_detail(&self, date: NaiveDate, zone: &str, terminals: &TerminalFilter) -> ZoneDetail {
        let predicate = self.day(date, terminals).with_segment(zone);
        let rows: Vec<&ZoneComplianceRow> =
            filter_segmented(self.store.zone_compliance(), &predicate).collect();

        let Some(first) = rows.first() else {
            return ZoneDetail {
                zone: zone.to_string(),
                row_count: 0,
                avg_compliance: 0.0,
                threshold_minutes: 0,
                total_pax: 0,
                avg_wait_time: 0.0,
                time_series: Vec::new(),
            };
        };

        let waits: Vec<f64> = rows.iter().map(|r| r.avg_wait_time_min).collect();
        ZoneDetail {
            zone: zone.to_string(),
            row_count: rows.len(),
            avg_compliance: round_to(mean_compliance(&rows).unwrap_or(0.0), 1),
            threshold_minutes: first.threshold_minutes,
            total_pax: rows.iter().map(|r| r.pax_total).sum(),
            avg_wait_time: round_to(mean(&waits).unwrap_or(0.0), 1),
            time_series: rows
                .iter()
                .map(|r| ZoneWindowPoint {
                    time_window: r.time_window.clone(),
                    actual_compliance_pct: round_to(r.actual_compliance_pct, 1),
                    pax_total: r.pax_total,
                    avg_wait_time_min: round_to(r.avg_wait_time_min, 1),
                })
                .collect(),
        }
    }

    pub fn queue_heatmap(&self, date: NaiveDate, terminals: &TerminalFilter) -> QueueHeatmap {
        let rows = self.zone_rows(date, terminals);
        let table = pivot(
            rows.iter().copied(),
            |r: &ZoneComplianceRow| r.zone.clone(),
            |r: &ZoneComplianceRow| r.time_window.clone(),
            |r: &ZoneComplianceRow| r.actual_compliance_pct,
        )
        .rounded(1);

        QueueHeatmap {
            zones: table.row_keys,
            time_windows: table.col_keys,
            values: table.cells,
        }
    }

    /// Zone rows lowest compliance first, optionally only those under target.
    pub fn queue_table(
        &self,
        date: NaiveDate,
        terminals: &TerminalFilter,
        violations_only: bool,
    ) -> Vec<QueueTableRow> {
        let target = self.policy.compliance_target;
        let mut rows = self.zone_rows(date, terminals);
        if violations_only {
            rows.retain(|r| r.actual_compliance_pct < target);
        }
        sort_by_measure(&mut rows, |r| r.actual_compliance_pct, Direction::Ascending);

        rows.into_iter()
            .map(|r| QueueTableRow {
                zone: r.zone.clone(),
                terminal: r.terminal.clone(),
                time_window: r.time_window.clone(),
                actual_compliance_pct: round_to(r.actual_compliance_pct, 1),
                target_compliance_pct: round_to(r.target_compliance_pct, 1),
                variance_from_target: round_to(r.variance_from_target, 1),
                pax_total: r.pax_total,
                avg_wait_time_min: round_to(r.avg_wait_time_min, 1),
                status: compliance_status_with_band(
                    r.actual_compliance_pct,
                    r.target_compliance_pct,
                    self.policy.near_target_band,
                ),
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod queue_tests;
