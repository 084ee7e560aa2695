use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::algorithms::{AnomalyRecord, Sentiment, VocRatio};
use crate::models::{Terminal, VocFeedbackRow, VocMessageRow};

// =========================================================
// Voice-of-customer types
// =========================================================

/// Feedback totals for one terminal label. `ratio` floors complaints at one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminalFeedback {
    pub terminal: Terminal,
    pub complaints: i64,
    pub compliments: i64,
    pub ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocSentimentAnalysis {
    pub date: NaiveDate,
    pub row_count: usize,
    pub total_complaints: i64,
    pub total_compliments: i64,
    pub ratio: VocRatio,
    /// Two-way call: Good at or above the sentiment threshold, else NeedsAttention.
    pub sentiment: Sentiment,
    /// Four-band classification of the same ratio.
    pub sentiment_band: Sentiment,
    pub terminal_breakdown: Vec<TerminalFeedback>,
    /// First ten negative messages in input order.
    pub negative_messages: Vec<VocMessageRow>,
    pub anomalies: Vec<AnomalyRecord<VocFeedbackRow>>,
}
