//! Executive overview read models: KPI cards, trends and alerts.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};

use crate::aggregation::{
    filter, mean, round_to, sort_by_measure, Direction, SliceFilter, TerminalFilter,
};
use crate::algorithms::{SeverityBands, VocRatio};
use crate::models::{BaggageDeliveryRow, Flow, PassengerType, Terminal};
use crate::routes::overview::*;

use super::queue::zone_performance;
use super::ReasoningEngine;

const ALERT_LIMIT: usize = 5;

/// Mean of `values` rounded to one decimal, 0.0 for an empty slice.
fn mean_1dp(values: &[f64]) -> f64 {
    round_to(mean(values).unwrap_or(0.0), 1)
}

/// Fold `(date, type, count)` triples into per-date totals.
fn daily_split<I>(rows: I) -> Vec<DailySplit>
where
    I: IntoIterator<Item = (NaiveDate, PassengerType, i64)>,
{
    let mut by_date: BTreeMap<NaiveDate, DailySplit> = BTreeMap::new();
    for (date, kind, count) in rows {
        let day = by_date.entry(date).or_insert(DailySplit {
            date,
            total: 0,
            domestic: 0,
            international: 0,
        });
        day.total += count;
        match kind {
            PassengerType::Domestic => day.domestic += count,
            PassengerType::International => day.international += count,
            PassengerType::Other(_) => {}
        }
    }
    by_date.into_values().collect()
}

/// Window of `days` calendar days ending at `end`, inclusive.
fn trailing_window(days: u32, end: NaiveDate, terminals: &TerminalFilter) -> SliceFilter {
    let back = u64::from(days.max(1) - 1);
    let start = end.checked_sub_days(Days::new(back)).unwrap_or(end);
    SliceFilter::between(start, end, terminals)
}

impl ReasoningEngine {
    /// Mean on-time performance, one decimal.
    pub fn otp_pct(&self, date: NaiveDate, terminals: &TerminalFilter) -> f64 {
        let predicate = self.day(date, terminals);
        let values: Vec<f64> = filter(self.store.otp(), &predicate).map(|r| r.otp_pct).collect();
        mean_1dp(&values)
    }

    /// Mean share of bags delivered within target, one decimal.
    pub fn baggage_delivery_pct(&self, date: NaiveDate, terminals: &TerminalFilter) -> f64 {
        let predicate = self.day(date, terminals);
        let values: Vec<f64> = filter(self.store.baggage_delivery(), &predicate)
            .map(|r| r.delivery_pct)
            .collect();
        mean_1dp(&values)
    }

    pub fn kpis(&self, date: NaiveDate, terminals: &TerminalFilter) -> Kpis {
        let predicate = self.day(date, terminals);

        let pax: Vec<_> = filter(self.store.pax_daily(), &predicate).collect();
        let pax_of = |kind: PassengerType| -> i64 {
            pax.iter()
                .filter(|r| r.passenger_type == kind)
                .map(|r| r.pax_count)
                .sum()
        };
        let deltas: Vec<f64> = pax.iter().filter_map(|r| r.vs_7day_pct).collect();

        let compliance: Vec<f64> = filter(self.store.zone_compliance(), &predicate)
            .map(|r| r.actual_compliance_pct)
            .collect();
        let queue_compliance_pct = mean_1dp(&compliance);

        let feedback: Vec<_> = filter(self.store.voc_feedback(), &predicate).collect();
        let total_complaints: i64 = feedback.iter().map(|r| r.complaints).sum();
        let total_compliments: i64 = feedback.iter().map(|r| r.compliments).sum();

        let bags: Vec<_> = filter(self.store.baggage_delivery(), &predicate).collect();
        let bag_mean = |measure: fn(&BaggageDeliveryRow) -> f64| {
            let values: Vec<f64> = bags.iter().map(|r| measure(r)).collect();
            mean_1dp(&values)
        };

        let adherence: Vec<f64> = filter(self.store.slot_adherence(), &predicate)
            .map(|r| r.adherence_pct)
            .collect();

        Kpis {
            date,
            total_pax: pax.iter().map(|r| r.pax_count).sum(),
            domestic_pax: pax_of(PassengerType::Domestic),
            international_pax: pax_of(PassengerType::International),
            pax_vs_7day_pct: mean_1dp(&deltas),
            total_atm: filter(self.store.atm(), &predicate).map(|r| r.atm_count).sum(),
            queue_rows: compliance.len(),
            queue_compliance_pct,
            compliance_delta: round_to(queue_compliance_pct - self.policy.compliance_target, 1),
            voc_ratio: VocRatio::new(total_compliments, total_complaints),
            total_complaints,
            total_compliments,
            otp_pct: self.otp_pct(date, terminals),
            baggage_delivery_pct: bag_mean(|r| r.delivery_pct),
            first_bag_minutes: bag_mean(|r| r.first_bag_minutes),
            last_bag_minutes: bag_mean(|r| r.last_bag_minutes),
            safety_issues: filter(self.store.safety(), &predicate).count(),
            slot_adherence_pct: mean_1dp(&adherence),
        }
    }

    /// Daily passenger totals for the `days` days ending at `end`.
    pub fn pax_trend(&self, days: u32, end: NaiveDate, terminals: &TerminalFilter) -> Vec<DailySplit> {
        let window = trailing_window(days, end, terminals);
        daily_split(
            filter(self.store.pax_daily(), &window)
                .map(|r| (r.date, r.passenger_type.clone(), r.pax_count)),
        )
    }

    /// Daily air traffic movements for the `days` days ending at `end`.
    pub fn atm_trend(&self, days: u32, end: NaiveDate, terminals: &TerminalFilter) -> Vec<DailySplit> {
        let window = trailing_window(days, end, terminals);
        daily_split(
            filter(self.store.atm(), &window)
                .map(|r| (r.date, r.movement_type.clone(), r.atm_count)),
        )
    }

    /// Passengers per terminal and flow across every terminal.
    pub fn terminal_breakdown(&self, date: NaiveDate) -> Vec<TerminalFlowPax> {
        let predicate = self.day(date, &TerminalFilter::All);
        let mut totals: BTreeMap<(Terminal, Flow), i64> = BTreeMap::new();
        for row in filter(self.store.pax_daily(), &predicate) {
            *totals
                .entry((row.terminal.clone(), row.flow.clone()))
                .or_insert(0) += row.pax_count;
        }
        totals
            .into_iter()
            .map(|((terminal, flow), pax_count)| TerminalFlowPax {
                terminal,
                flow,
                pax_count,
            })
            .collect()
    }

    pub fn zone_compliance_summary(&self, date: NaiveDate, terminals: &TerminalFilter) -> Vec<ZoneMean> {
        let predicate = self.day(date, terminals);
        zone_performance(filter(self.store.zone_compliance(), &predicate))
            .into_iter()
            .map(|z| ZoneMean {
                zone: z.zone,
                actual_compliance_pct: round_to(z.mean_compliance, 1),
            })
            .collect()
    }

    /// The worst below-target zone windows and every safety event of the day.
    pub fn alerts(&self, date: NaiveDate, terminals: &TerminalFilter) -> Alerts {
        let predicate = self.day(date, terminals);
        let target = self.policy.compliance_target;
        let bands = SeverityBands::from(&self.policy);

        let mut below: Vec<_> = filter(self.store.zone_compliance(), &predicate)
            .filter(|r| r.actual_compliance_pct < target)
            .collect();
        sort_by_measure(&mut below, |r| r.actual_compliance_pct, Direction::Ascending);

        let queue_alerts = below
            .into_iter()
            .take(ALERT_LIMIT)
            .map(|r| QueueAlert {
                zone: r.zone.clone(),
                time_window: r.time_window.clone(),
                compliance: round_to(r.actual_compliance_pct, 1),
                pax_affected: r.pax_total,
                variance: round_to(r.variance_from_target, 1),
                severity: bands.classify(r.variance_from_target),
            })
            .collect();

        let safety_alerts = filter(self.store.safety(), &predicate)
            .map(|r| SafetyAlert {
                category: r.category.clone(),
                terminal: r.terminal.clone(),
                severity: r.severity.clone(),
                resolved: r.resolved,
            })
            .collect();

        Alerts {
            queue_alerts,
            safety_alerts,
        }
    }
}

#[cfg(test)]
#[path = "overview_tests.rs"]
mod overview_tests;
