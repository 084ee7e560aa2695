//! Security lane, baggage belt and gate analyses.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::aggregation::{filter, mean, round_to, sort_by_measure, top_n, Direction, TerminalFilter};
use crate::algorithms::{boarding_mode_mix, security_lane_anomalies, UtilizationStatus};
use crate::models::{SecurityLaneRow, Terminal};
use crate::routes::security::*;

use super::ReasoningEngine;

const TOP_LANE_COUNT: usize = 5;

fn avg_reject_rate(rows: &[SecurityLaneRow]) -> Option<f64> {
    let rates: Vec<f64> = rows.iter().map(|r| r.reject_rate_pct).collect();
    mean(&rates)
}

impl ReasoningEngine {
    fn lane_rows(&self, date: NaiveDate, terminals: &TerminalFilter) -> Vec<SecurityLaneRow> {
        let predicate = self.day(date, terminals);
        filter(self.store.security_lanes(), &predicate).cloned().collect()
    }

    /// Lanes above `threshold` percent rejects, highest first.
    fn lanes_above(rows: &[SecurityLaneRow], threshold: f64) -> Vec<SecurityLaneRow> {
        let mut high: Vec<SecurityLaneRow> = rows
            .iter()
            .filter(|r| r.reject_rate_pct > threshold)
            .cloned()
            .collect();
        sort_by_measure(&mut high, |r| r.reject_rate_pct, Direction::Descending);
        high
    }

    pub fn analyze_security_lanes(
        &self,
        date: NaiveDate,
        terminals: &TerminalFilter,
    ) -> SecurityLaneAnalysis {
        let rows = self.lane_rows(date, terminals);

        // low-throughput quantile is taken over this slice only
        let anomalies = security_lane_anomalies(
            &rows,
            self.policy.high_reject_threshold,
            self.policy.low_throughput_percentile,
        );

        SecurityLaneAnalysis {
            date,
            row_count: rows.len(),
            total_cleared: rows.iter().map(|r| r.cleared_volume).sum(),
            avg_reject_rate: round_to(avg_reject_rate(&rows).unwrap_or(0.0), 2),
            top_performing_lanes: top_n(&rows, |r| r.cleared_volume as f64, TOP_LANE_COUNT),
            high_reject_lanes: Self::lanes_above(&rows, self.policy.high_reject_threshold),
            anomalies,
        }
    }

    pub fn security_summary(&self, date: NaiveDate, terminals: &TerminalFilter) -> SecuritySummary {
        let rows = self.lane_rows(date, terminals);
        let threshold = self.policy.high_reject_threshold;
        SecuritySummary {
            row_count: rows.len(),
            total_cleared: rows.iter().map(|r| r.cleared_volume).sum(),
            avg_reject_rate: round_to(avg_reject_rate(&rows).unwrap_or(0.0), 1),
            high_reject_lanes_count: rows.iter().filter(|r| r.reject_rate_pct > threshold).count(),
        }
    }

    /// Every lane in the slice, busiest first.
    pub fn lanes(&self, date: NaiveDate, terminals: &TerminalFilter) -> Vec<LaneView> {
        let mut rows = self.lane_rows(date, terminals);
        sort_by_measure(&mut rows, |r| r.cleared_volume as f64, Direction::Descending);
        rows.into_iter()
            .map(|r| LaneView {
                reject_rate_pct: round_to(r.reject_rate_pct, 1),
                avg_throughput_per_hour: round_to(r.avg_throughput_per_hour, 1),
                lane: r.lane,
                terminal: r.terminal,
                lane_group: r.lane_group,
                cleared_volume: r.cleared_volume,
                reject_count: r.reject_count,
                total_scanned: r.total_scanned,
            })
            .collect()
    }

    pub fn high_reject(
        &self,
        date: NaiveDate,
        terminals: &TerminalFilter,
        threshold: f64,
    ) -> Vec<HighRejectLane> {
        let rows = self.lane_rows(date, terminals);
        Self::lanes_above(&rows, threshold)
            .into_iter()
            .map(|r| HighRejectLane {
                reject_rate_pct: round_to(r.reject_rate_pct, 1),
                lane: r.lane,
                terminal: r.terminal,
                reject_count: r.reject_count,
                cleared_volume: r.cleared_volume,
            })
            .collect()
    }

    pub fn baggage(&self, date: NaiveDate, terminals: &TerminalFilter) -> BaggageView {
        let predicate = self.day(date, terminals);
        let rows: Vec<_> = filter(self.store.baggage_belts(), &predicate).collect();

        let per_flight: Vec<f64> = rows.iter().map(|r| r.pax_per_flight).collect();
        let summary = BaggageSummary {
            row_count: rows.len(),
            total_flights: rows.iter().map(|r| r.flights).sum(),
            total_pax: rows.iter().map(|r| r.pax).sum(),
            avg_pax_per_flight: round_to(mean(&per_flight).unwrap_or(0.0), 0),
        };

        let belts = rows
            .iter()
            .map(|r| BeltView {
                belt: r.belt.clone(),
                terminal: r.terminal.clone(),
                belt_type: r.belt_type.clone(),
                utilization_pct: round_to(r.utilization_pct, 1),
                utilization_status: UtilizationStatus::from_pct(r.utilization_pct),
                flights: r.flights,
                pax: r.pax,
            })
            .collect();

        BaggageView { summary, belts }
    }

    /// Boarding-mode mix per terminal and gates by passenger count.
    ///
    /// The mix always has an entry for each selected terminal (T1 and T2 when
    /// unfiltered), empty when the terminal has no gate rows.
    pub fn gates(&self, date: NaiveDate, terminals: &TerminalFilter) -> GatesView {
        let predicate = self.day(date, terminals);
        let rows: Vec<_> = filter(self.store.gates(), &predicate).collect();

        let mut boarding_mix: BTreeMap<String, Vec<BoardingModeEntry>> = terminals
            .terminals()
            .iter()
            .map(|t| (t.to_string(), Vec::new()))
            .collect();

        let shares = boarding_mode_mix(rows.iter().copied());
        let mut terminal_pax: BTreeMap<&Terminal, i64> = BTreeMap::new();
        for share in &shares {
            *terminal_pax.entry(&share.terminal).or_insert(0) += share.pax;
        }
        for share in &shares {
            let Some(entries) = boarding_mix.get_mut(share.terminal.as_str()) else {
                continue;
            };
            let total = terminal_pax.get(&share.terminal).copied().unwrap_or(0);
            entries.push(BoardingModeEntry {
                boarding_mode: share.boarding_mode.clone(),
                flights: share.flights,
                pax: share.pax,
                pax_pct: if total > 0 {
                    round_to(share.pax as f64 / total as f64 * 100.0, 1)
                } else {
                    0.0
                },
            });
        }

        let mut gates: Vec<GateView> = rows
            .iter()
            .map(|r| GateView {
                gate: r.gate.clone(),
                terminal: r.terminal.clone(),
                boarding_mode: r.boarding_mode.clone(),
                flights: r.flights,
                pax: r.pax,
                pax_per_flight: round_to(r.pax_per_flight, 0),
            })
            .collect();
        sort_by_measure(&mut gates, |g| g.pax as f64, Direction::Descending);

        GatesView { boarding_mix, gates }
    }
}

#[cfg(test)]
#[path = "security_tests.rs"]
mod security_tests;
