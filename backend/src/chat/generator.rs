//! Text generation seam and the deterministic rule-based responder.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aggregation::TerminalFilter;
use crate::services::format::{short_date, thousands};
use crate::services::ReasoningEngine;

use super::context::mentions;

const QUEUE_KEYWORDS: &[&str] = &["queue", "compliance", "wait"];
const SECURITY_KEYWORDS: &[&str] = &["security", "lane", "reject"];

const ZONES_LISTED: usize = 3;

/// Errors raised while producing a chat response.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Text generation failed: {0}")]
    Generation(String),

    #[error("Chat task failed: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One prior message of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

/// External text generator, typically a hosted language model.
///
/// Implementations receive the system prompt, the rendered data context, the
/// truncated conversation history and the user query, and return the full
/// response text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(
        &self,
        system: &str,
        context: &str,
        history: &[ChatTurn],
        query: &str,
    ) -> Result<String, ChatError>;
}

/// Keyword-routed markdown reports built straight from the analyses.
pub struct RuleBasedGenerator<'a> {
    engine: &'a ReasoningEngine,
}

impl<'a> RuleBasedGenerator<'a> {
    pub fn new(engine: &'a ReasoningEngine) -> Self {
        Self { engine }
    }

    /// Queue keywords win over security keywords; anything else gets the
    /// executive summary.
    pub fn respond(&self, query: &str, date: NaiveDate, terminals: &TerminalFilter) -> String {
        if mentions(query, QUEUE_KEYWORDS) {
            self.queue_report(date, terminals)
        } else if mentions(query, SECURITY_KEYWORDS) {
            self.security_report(date, terminals)
        } else {
            self.engine.generate_executive_summary(date, terminals).text
        }
    }

    fn queue_report(&self, date: NaiveDate, terminals: &TerminalFilter) -> String {
        let queue = self.engine.analyze_queue_compliance(date, terminals);
        let mut out = format!(
            "## Queue Compliance Analysis - {}\n\n**Overall Compliance:** {:.1}% (Target: {}%)\n\n",
            short_date(date),
            queue.overall_compliance,
            queue.target
        );
        if !queue.worst_zones.is_empty() {
            out.push_str("### Worst Performing Zones:\n");
            for (i, zone) in queue.worst_zones.iter().take(ZONES_LISTED).enumerate() {
                out.push_str(&format!(
                    "{}. **{}**: {:.1}% compliance\n   - Variance: {:.1}%\n   - Passengers: {}\n\n",
                    i + 1,
                    zone.zone,
                    zone.mean_compliance,
                    zone.mean_variance,
                    thousands(zone.total_pax)
                ));
            }
        }
        out
    }

    fn security_report(&self, date: NaiveDate, terminals: &TerminalFilter) -> String {
        let security = self.engine.analyze_security_lanes(date, terminals);
        let mut out = format!(
            "## Security Lane Performance - {}\n\n**Total Cleared:** {}\n**Average Reject Rate:** {}%\n\n",
            short_date(date),
            thousands(security.total_cleared),
            security.avg_reject_rate
        );
        if !security.high_reject_lanes.is_empty() {
            out.push_str("### High Reject Rate Lanes:\n");
            for lane in &security.high_reject_lanes {
                out.push_str(&format!(
                    "- **{}**: {}% ({} rejections)\n",
                    lane.lane, lane.reject_rate_pct, lane.reject_count
                ));
            }
        }
        out
    }
}
