//! Executive summaries, as markdown text and as a structured overview.

use chrono::NaiveDate;

use crate::aggregation::{round_to, TerminalFilter};
use crate::routes::overview::*;

use super::format::{long_date, thousands};
use super::ReasoningEngine;

const PEAK_HOURS_LISTED: usize = 3;

impl ReasoningEngine {
    /// Queue-only status used by the text summary.
    fn queue_status_level(&self, overall_compliance: f64) -> ExecutiveStatus {
        if overall_compliance >= self.policy.compliance_target {
            ExecutiveStatus::OnTrack
        } else if overall_compliance >= self.policy.worst_window_threshold {
            ExecutiveStatus::Attention
        } else {
            ExecutiveStatus::Critical
        }
    }

    /// Status requiring both queue compliance and on-time performance for OnTrack.
    fn combined_status_level(&self, overall_compliance: f64, otp_pct: f64) -> ExecutiveStatus {
        if overall_compliance >= self.policy.compliance_target && otp_pct >= self.policy.otp_target {
            ExecutiveStatus::OnTrack
        } else if overall_compliance >= self.policy.worst_window_threshold {
            ExecutiveStatus::Attention
        } else {
            ExecutiveStatus::Critical
        }
    }

    /// Markdown executive summary with findings, actions and status sections.
    pub fn generate_executive_summary(
        &self,
        date: NaiveDate,
        terminals: &TerminalFilter,
    ) -> ExecutiveSummaryText {
        let queue = self.analyze_queue_compliance(date, terminals);
        let security = self.analyze_security_lanes(date, terminals);
        let pax = self.analyze_passenger_volumes(date, terminals);
        let voc = self.analyze_voc_sentiment(date, terminals);

        let mut findings = vec![
            format!(
                "**Total Passengers:** {} ({} Domestic, {} International)",
                thousands(pax.total_pax),
                thousands(pax.domestic_pax),
                thousands(pax.international_pax)
            ),
            format!(
                "**Overall Queue Compliance:** {:.1}% (Target: {}%)",
                queue.overall_compliance, queue.target
            ),
            format!("**Zones Below Target:** {} zones", queue.zones_below_target),
        ];
        if !pax.peak_hours.is_empty() {
            let hours: Vec<String> = pax
                .peak_hours
                .iter()
                .take(PEAK_HOURS_LISTED)
                .map(|h| format!("{:02}:00", h.hour))
                .collect();
            findings.push(format!("**Peak Hours:** {}", hours.join(", ")));
        }
        findings.push(format!(
            "**Security Reject Rate:** {}%",
            security.avg_reject_rate
        ));
        findings.push(format!(
            "**VOC Sentiment:** {} (Ratio: {})",
            voc.sentiment, voc.ratio
        ));

        let mut actions = Vec::new();
        if let Some(worst) = queue.worst_zones.first().filter(|_| queue.zones_below_target > 0) {
            actions.push(format!(
                "1. **Immediate:** Address queue delays at {}",
                worst.zone
            ));
        }
        if !security.high_reject_lanes.is_empty() {
            actions.push("2. **Today:** Retrain staff on lanes with high rejects".to_string());
        }
        actions.push("3. **This Week:** Review staffing allocation during peak hours".to_string());

        let status = self.queue_status_level(queue.overall_compliance);
        let status_line = match status {
            ExecutiveStatus::OnTrack => "**On Track** - All major KPIs meeting targets",
            ExecutiveStatus::Attention => "**Attention Needed** - Some zones below target",
            ExecutiveStatus::Critical => {
                "**Action Required** - Multiple zones significantly below target"
            }
        };

        let findings: Vec<String> = findings.iter().map(|f| format!("- {}", f)).collect();
        let text = format!(
            "## Executive Summary - {}\n\n### Key Findings:\n{}\n\n### Priority Actions:\n{}\n\n### Overall Status:\n{}\n",
            long_date(date),
            findings.join("\n"),
            actions.join("\n"),
            status_line
        );

        ExecutiveSummaryText { date, status, text }
    }

    /// Structured executive overview with prioritized actions.
    pub fn executive_overview(&self, date: NaiveDate, terminals: &TerminalFilter) -> ExecutiveOverview {
        let queue = self.analyze_queue_compliance(date, terminals);
        let security = self.analyze_security_lanes(date, terminals);
        let pax = self.analyze_passenger_volumes(date, terminals);
        let voc = self.analyze_voc_sentiment(date, terminals);
        let otp_pct = self.otp_pct(date, terminals);
        let baggage_delivery_pct = self.baggage_delivery_pct(date, terminals);

        let status = self.combined_status_level(queue.overall_compliance, otp_pct);
        let status_detail = match status {
            ExecutiveStatus::OnTrack => "All major KPIs meeting targets",
            ExecutiveStatus::Attention => "Some KPIs need monitoring",
            ExecutiveStatus::Critical => "Multiple zones significantly below target",
        };

        let label = terminals.label();
        let mut actions = Vec::new();
        let mut push = |priority: ActionPriority, action: String| {
            actions.push(PriorityAction { priority, action })
        };

        if let Some(worst) = queue.worst_zones.first().filter(|_| queue.zones_below_target > 0) {
            push(
                ActionPriority::Immediate,
                format!("Address queue delays at {} ({})", worst.zone, label),
            );
        }
        if otp_pct < self.policy.otp_target {
            push(
                ActionPriority::Today,
                format!(
                    "Review on-time performance ({:.1}%), coordinate with ATC and airlines ({})",
                    otp_pct, label
                ),
            );
        }
        if baggage_delivery_pct < self.policy.baggage_delivery_target {
            push(
                ActionPriority::Today,
                format!(
                    "Baggage delivery at {:.1}%, review belt allocation ({})",
                    baggage_delivery_pct, label
                ),
            );
        }
        if let Some(lane) = security.high_reject_lanes.first() {
            push(
                ActionPriority::Today,
                format!("Review {} ({:.1}% reject rate)", lane.lane, lane.reject_rate_pct),
            );
        }
        if let Some(ratio) = voc
            .ratio
            .finite()
            .filter(|r| *r < self.policy.voc_sentiment_threshold)
        {
            push(
                ActionPriority::Today,
                format!(
                    "Customer sentiment needs attention: VOC ratio {}:1 ({})",
                    ratio, label
                ),
            );
        }
        push(
            ActionPriority::ThisWeek,
            format!("Review staffing allocation during peak hours ({})", label),
        );

        ExecutiveOverview {
            date: long_date(date),
            status,
            status_label: status.label().to_string(),
            status_detail: status_detail.to_string(),
            total_pax: pax.total_pax,
            domestic_pax: pax.domestic_pax,
            international_pax: pax.international_pax,
            pax_vs_7day_pct: pax.vs_7day_pct,
            queue_compliance: round_to(queue.overall_compliance, 1),
            zones_below_target: queue.zones_below_target,
            otp_pct,
            baggage_delivery_pct,
            voc_ratio: voc.ratio,
            voc_sentiment: voc.sentiment,
            total_complaints: voc.total_complaints,
            total_compliments: voc.total_compliments,
            actions,
        }
    }
}

#[cfg(test)]
#[path = "summary_tests.rs"]
mod summary_tests;
