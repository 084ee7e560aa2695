//! Rule-based root-cause reports for a queue compliance drop.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aggregation::TerminalFilter;
use crate::algorithms::Severity;
use crate::routes::queue::RootCauseReport;

use super::format::{thousands, window_hours};
use super::ReasoningEngine;

const NAMED_LANE_LIMIT: usize = 3;

/// Kind of operational issue a recommendation set addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    QueueCompliance,
    SecurityRejects,
    CustomerSentiment,
}

/// Standard mitigations per issue type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationTable {
    entries: BTreeMap<IssueType, Vec<String>>,
}

impl Default for RecommendationTable {
    fn default() -> Self {
        let queue = [
            "Open additional security lanes (minimum 2) during 1400-1800 window",
            "Assign senior screeners to lanes with high reject rates (L6, L3)",
            "Implement queue marshaling at T2 check-in banks during peak hours",
            "Promote biometric fast-track lanes via digital signage",
        ];
        Self::empty().with(
            IssueType::QueueCompliance,
            queue.iter().map(|s| s.to_string()).collect(),
        )
    }
}

impl RecommendationTable {
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Replace the recommendations for `issue`.
    pub fn with(mut self, issue: IssueType, recommendations: Vec<String>) -> Self {
        self.entries.insert(issue, recommendations);
        self
    }

    /// Recommendations for `issue`, empty when none are registered.
    pub fn for_issue(&self, issue: IssueType) -> &[String] {
        self.entries.get(&issue).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl ReasoningEngine {
    /// Explain a compliance drop at `zone` during `time_window`.
    ///
    /// Factors are emitted in a fixed order: passenger volume in the window,
    /// high-reject security lanes, then check-in delays when `zone` is among
    /// the worst zones of the slice.
    pub fn generate_root_cause_analysis(
        &self,
        date: NaiveDate,
        zone: &str,
        time_window: &str,
        terminals: &TerminalFilter,
    ) -> RootCauseReport {
        let queue = self.analyze_queue_compliance(date, terminals);
        let security = self.analyze_security_lanes(date, terminals);
        let pax = self.analyze_passenger_volumes(date, terminals);

        let mut factors = Vec::new();

        match window_hours(time_window) {
            Some((start, end)) => {
                let observed: Vec<i64> = pax
                    .hourly_distribution
                    .iter()
                    .filter(|h| (start..=end).contains(&h.hour) && h.observations > 0)
                    .map(|h| h.volume)
                    .collect();
                if !observed.is_empty() {
                    let avg = observed.iter().sum::<i64>() / observed.len() as i64;
                    factors.push(format!(
                        "High passenger volumes during {}: ~{} pax/hour",
                        time_window,
                        thousands(avg)
                    ));
                }
            }
            None => log::debug!("Unrecognised time window '{}'", time_window),
        }

        if !security.high_reject_lanes.is_empty() {
            let lanes: Vec<&str> = security
                .high_reject_lanes
                .iter()
                .take(NAMED_LANE_LIMIT)
                .map(|l| l.lane.as_str())
                .collect();
            factors.push(format!(
                "High reject rates at security lanes: {}",
                lanes.join(", ")
            ));
        }

        if queue.worst_zones.iter().any(|z| z.zone == zone) {
            factors.push(format!("Check-in processing delays at {}", zone));
        }

        let worst_compliance = queue
            .worst_zones
            .first()
            .map(|z| z.mean_compliance)
            .unwrap_or(0.0);

        RootCauseReport {
            zone: zone.to_string(),
            time_window: time_window.to_string(),
            primary_issue: format!(
                "Queue compliance dropped to {:.1}% (Target: {}%)",
                worst_compliance, queue.target
            ),
            factors,
            impact: format!(
                "{} passengers experienced extended wait times",
                thousands(queue.total_pax_affected)
            ),
            recommendations: self
                .recommendations
                .for_issue(IssueType::QueueCompliance)
                .to_vec(),
            severity: if queue.overall_compliance < self.policy.worst_window_threshold {
                Severity::High
            } else {
                Severity::Medium
            },
        }
    }
}

#[cfg(test)]
#[path = "root_cause_tests.rs"]
mod root_cause_tests;
