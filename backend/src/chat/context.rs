//! Keyword-routed data context for chat queries.

use chrono::NaiveDate;

use crate::aggregation::TerminalFilter;
use crate::services::format::{long_date, thousands};
use crate::services::ReasoningEngine;

use super::prompts::DATA_CONTEXT;

const QUEUE_KEYWORDS: &[&str] =
    &["queue", "wait", "compliance", "entry", "check-in", "security"];
const SECURITY_KEYWORDS: &[&str] = &["security", "lane", "reject", "screening"];
const PASSENGER_KEYWORDS: &[&str] = &["passenger", "pax", "volume", "traffic", "peak"];
const VOC_KEYWORDS: &[&str] = &["complaint", "feedback", "customer", "voc", "sentiment"];

const HIGH_REJECT_LISTED: usize = 3;

/// Case-insensitive substring match against any keyword.
pub(crate) fn mentions(query: &str, keywords: &[&str]) -> bool {
    let query = query.to_lowercase();
    keywords.iter().any(|k| query.contains(k))
}

/// Renders the analyses relevant to a query as a markdown context block.
pub struct ContextBuilder<'a> {
    engine: &'a ReasoningEngine,
}

impl<'a> ContextBuilder<'a> {
    pub fn new(engine: &'a ReasoningEngine) -> Self {
        Self { engine }
    }

    /// A query may match several groups; each contributes one section. When
    /// none match, a one-line-per-domain overview is rendered instead.
    pub fn build(&self, query: &str, date: NaiveDate, terminals: &TerminalFilter) -> String {
        let mut sections: Vec<String> = Vec::new();

        if mentions(query, QUEUE_KEYWORDS) {
            sections.push(self.queue_section(date, terminals));
        }
        if mentions(query, SECURITY_KEYWORDS) {
            sections.push(self.security_section(date, terminals));
        }
        if mentions(query, PASSENGER_KEYWORDS) {
            sections.push(self.passenger_section(date, terminals));
        }
        if mentions(query, VOC_KEYWORDS) {
            sections.push(self.voc_section(date, terminals));
        }
        if sections.is_empty() {
            sections.push(self.overview_section(date, terminals));
        }

        format!(
            "{}\n\n**Analyzing data for:** {} ({})\n\n{}",
            DATA_CONTEXT,
            long_date(date),
            terminals.label(),
            sections.join("\n\n")
        )
    }

    fn queue_section(&self, date: NaiveDate, terminals: &TerminalFilter) -> String {
        let queue = self.engine.analyze_queue_compliance(date, terminals);
        let mut lines = vec![
            "### Current Queue Compliance Status:".to_string(),
            format!("- Overall Compliance: {:.1}%", queue.overall_compliance),
            format!("- Zones Below Target: {}", queue.zones_below_target),
            format!("- Passengers Affected: {}", thousands(queue.total_pax_affected)),
        ];
        if let Some(hour) = &queue.worst_hour {
            lines.push(format!(
                "- Worst Hour: {:02}:00 at {} ({}), {:.1}%",
                hour.hour, hour.zone, hour.terminal, hour.actual_compliance_pct
            ));
        }
        if !queue.worst_zones.is_empty() {
            lines.push(String::new());
            lines.push("Worst Performing Zones:".to_string());
            for zone in &queue.worst_zones {
                lines.push(format!(
                    "  - {}: {:.1}% (Target: {}%)",
                    zone.zone, zone.mean_compliance, queue.target
                ));
            }
        }
        lines.join("\n")
    }

    fn security_section(&self, date: NaiveDate, terminals: &TerminalFilter) -> String {
        let security = self.engine.analyze_security_lanes(date, terminals);
        let mut lines = vec![
            "### Security Lane Performance:".to_string(),
            format!("- Total Cleared: {}", thousands(security.total_cleared)),
            format!("- Average Reject Rate: {}%", security.avg_reject_rate),
        ];
        if !security.high_reject_lanes.is_empty() {
            lines.push(String::new());
            lines.push("High Reject Rate Lanes:".to_string());
            for lane in security.high_reject_lanes.iter().take(HIGH_REJECT_LISTED) {
                lines.push(format!("  - {}: {}% reject rate", lane.lane, lane.reject_rate_pct));
            }
        }
        lines.join("\n")
    }

    fn passenger_section(&self, date: NaiveDate, terminals: &TerminalFilter) -> String {
        let pax = self.engine.analyze_passenger_volumes(date, terminals);
        [
            "### Passenger Volumes:".to_string(),
            format!("- Total: {}", thousands(pax.total_pax)),
            format!("- Domestic: {}", thousands(pax.domestic_pax)),
            format!("- International: {}", thousands(pax.international_pax)),
            format!("- vs 7-day avg: {:+.1}%", pax.vs_7day_pct),
        ]
        .join("\n")
    }

    fn voc_section(&self, date: NaiveDate, terminals: &TerminalFilter) -> String {
        let voc = self.engine.analyze_voc_sentiment(date, terminals);
        [
            "### Voice of Customer:".to_string(),
            format!("- Compliments: {}", voc.total_compliments),
            format!("- Complaints: {}", voc.total_complaints),
            format!("- Ratio: {} (Sentiment: {})", voc.ratio, voc.sentiment),
        ]
        .join("\n")
    }

    fn overview_section(&self, date: NaiveDate, terminals: &TerminalFilter) -> String {
        let queue = self.engine.analyze_queue_compliance(date, terminals);
        let security = self.engine.analyze_security_lanes(date, terminals);
        let pax = self.engine.analyze_passenger_volumes(date, terminals);
        let voc = self.engine.analyze_voc_sentiment(date, terminals);
        [
            "### Overview:".to_string(),
            format!("- Total PAX: {}", thousands(pax.total_pax)),
            format!("- Queue Compliance: {:.1}%", queue.overall_compliance),
            format!("- Avg Reject Rate: {}%", security.avg_reject_rate),
            format!("- VOC Ratio: {}", voc.ratio),
        ]
        .join("\n")
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod context_tests;
