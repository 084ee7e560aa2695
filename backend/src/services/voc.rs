//! Voice-of-customer sentiment.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::aggregation::{filter, round_to, TerminalFilter};
use crate::algorithms::{guarded_ratio, voc_anomalies, voc_ratio, Sentiment, VocRatio};
use crate::models::{Terminal, VocFeedbackRow};
use crate::routes::voc::*;

use super::ReasoningEngine;

const NEGATIVE_MESSAGE_LIMIT: usize = 10;

/// Complaint and compliment totals per terminal, in terminal order.
pub(crate) fn terminal_feedback<'a, I>(rows: I) -> Vec<TerminalFeedback>
where
    I: IntoIterator<Item = &'a VocFeedbackRow>,
{
    let mut totals: BTreeMap<Terminal, (i64, i64)> = BTreeMap::new();
    for row in rows {
        let entry = totals.entry(row.terminal.clone()).or_insert((0, 0));
        entry.0 += row.complaints;
        entry.1 += row.compliments;
    }
    totals
        .into_iter()
        .map(|(terminal, (complaints, compliments))| TerminalFeedback {
            terminal,
            complaints,
            compliments,
            ratio: round_to(guarded_ratio(compliments as f64, complaints as f64), 2),
        })
        .collect()
}

impl ReasoningEngine {
    /// Binary sentiment against the policy threshold.
    ///
    /// Compliments without complaints count as meeting it; a slice with no
    /// feedback at all is `NoData`.
    pub(crate) fn threshold_sentiment(&self, ratio: VocRatio) -> Sentiment {
        match ratio {
            VocRatio::Finite(r) if r >= self.policy.voc_sentiment_threshold => Sentiment::Good,
            VocRatio::Finite(_) => Sentiment::NeedsAttention,
            VocRatio::Unbounded => Sentiment::Good,
            VocRatio::NoFeedback => Sentiment::NoData,
        }
    }

    pub fn analyze_voc_sentiment(
        &self,
        date: NaiveDate,
        terminals: &TerminalFilter,
    ) -> VocSentimentAnalysis {
        let predicate = self.day(date, terminals);
        let feedback: Vec<&VocFeedbackRow> =
            filter(self.store.voc_feedback(), &predicate).collect();

        let total_complaints: i64 = feedback.iter().map(|r| r.complaints).sum();
        let total_compliments: i64 = feedback.iter().map(|r| r.compliments).sum();
        let assessment = voc_ratio(total_compliments, total_complaints);

        let negative_messages = filter(self.store.voc_messages(), &predicate)
            .filter(|m| m.is_negative())
            .take(NEGATIVE_MESSAGE_LIMIT)
            .cloned()
            .collect();

        VocSentimentAnalysis {
            date,
            row_count: feedback.len(),
            total_complaints,
            total_compliments,
            ratio: assessment.ratio,
            sentiment: self.threshold_sentiment(assessment.ratio),
            sentiment_band: assessment.sentiment,
            terminal_breakdown: terminal_feedback(feedback.iter().copied()),
            negative_messages,
            anomalies: voc_anomalies(feedback.iter().copied(), self.policy.voc_anomaly_ratio),
        }
    }
}

#[cfg(test)]
#[path = "voc_tests.rs"]
mod voc_tests;
