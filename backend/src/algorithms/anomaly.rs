//! Anomaly Detector: threshold- and distribution-based row flags.
//!
//! Every detector keeps the input order of the rows it flags. Percentile and
//! z-score thresholds are computed over exactly the rows passed in, so callers
//! pre-filter to the comparison population they mean.

use serde::{Deserialize, Serialize};

use crate::aggregation::{mean, quantile, sample_std_dev};
use crate::config::PolicyConfig;
use crate::models::{SecurityLaneRow, VocFeedbackRow, ZoneComplianceRow};

use super::metrics::guarded_ratio;

/// Anomaly severity. Ordered, so `max` picks the most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variance floors separating queue severities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeverityBands {
    /// Variance at or above this is Low.
    pub low_floor: f64,
    /// Variance at or above this (and below `low_floor`) is Medium; below is High.
    pub medium_floor: f64,
}

impl Default for SeverityBands {
    fn default() -> Self {
        Self {
            low_floor: -3.0,
            medium_floor: -7.0,
        }
    }
}

impl From<&PolicyConfig> for SeverityBands {
    fn from(policy: &PolicyConfig) -> Self {
        Self {
            low_floor: policy.low_severity_floor,
            medium_floor: policy.medium_severity_floor,
        }
    }
}

impl SeverityBands {
    pub fn classify(&self, variance_from_target: f64) -> Severity {
        if variance_from_target >= self.low_floor {
            Severity::Low
        } else if variance_from_target >= self.medium_floor {
            Severity::Medium
        } else {
            Severity::High
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyReason {
    BelowTarget,
    HighReject,
    LowThroughput,
    LowSentimentRatio,
}

/// A flagged source row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyRecord<R> {
    #[serde(flatten)]
    pub source_row: R,
    pub is_anomaly: bool,
    pub severity: Severity,
    pub reasons: Vec<AnomalyReason>,
}

impl<R> AnomalyRecord<R> {
    fn flagged(source_row: R, severity: Severity, reasons: Vec<AnomalyReason>) -> Self {
        Self {
            source_row,
            is_anomaly: true,
            severity,
            reasons,
        }
    }
}

/// Zone rows below `target`, graded by the default severity bands.
pub fn queue_anomalies<'a, I>(rows: I, target: f64) -> Vec<AnomalyRecord<ZoneComplianceRow>>
where
    I: IntoIterator<Item = &'a ZoneComplianceRow>,
{
    queue_anomalies_with_bands(rows, target, SeverityBands::default())
}

pub fn queue_anomalies_with_bands<'a, I>(
    rows: I,
    target: f64,
    bands: SeverityBands,
) -> Vec<AnomalyRecord<ZoneComplianceRow>>
where
    I: IntoIterator<Item = &'a ZoneComplianceRow>,
{
    rows.into_iter()
        .filter(|row| row.actual_compliance_pct < target)
        .map(|row| {
            AnomalyRecord::flagged(
                row.clone(),
                bands.classify(row.variance_from_target),
                vec![AnomalyReason::BelowTarget],
            )
        })
        .collect()
}

/// Lanes with a reject rate above `reject_threshold`, or cleared volume
/// strictly below the given quantile of the same rows.
///
/// One condition grades Medium, both grade High.
pub fn security_lane_anomalies(
    rows: &[SecurityLaneRow],
    reject_threshold: f64,
    low_throughput_quantile: f64,
) -> Vec<AnomalyRecord<SecurityLaneRow>> {
    let volumes: Vec<f64> = rows.iter().map(|r| r.cleared_volume as f64).collect();
    let Some(volume_floor) = quantile(&volumes, low_throughput_quantile) else {
        return Vec::new();
    };

    rows.iter()
        .filter_map(|row| {
            let mut reasons = Vec::new();
            if row.reject_rate_pct > reject_threshold {
                reasons.push(AnomalyReason::HighReject);
            }
            if (row.cleared_volume as f64) < volume_floor {
                reasons.push(AnomalyReason::LowThroughput);
            }
            let severity = match reasons.len() {
                0 => return None,
                1 => Severity::Medium,
                _ => Severity::High,
            };
            Some(AnomalyRecord::flagged(row.clone(), severity, reasons))
        })
        .collect()
}

/// Feedback rows whose compliments-per-complaint ratio is below
/// `ratio_threshold`. A zero complaint count counts as one.
///
/// More complaints than compliments grades High, otherwise Medium.
pub fn voc_anomalies<'a, I>(rows: I, ratio_threshold: f64) -> Vec<AnomalyRecord<VocFeedbackRow>>
where
    I: IntoIterator<Item = &'a VocFeedbackRow>,
{
    rows.into_iter()
        .filter_map(|row| {
            let ratio = guarded_ratio(row.compliments as f64, row.complaints as f64);
            if ratio >= ratio_threshold {
                return None;
            }
            let severity = if ratio < 1.0 {
                Severity::High
            } else {
                Severity::Medium
            };
            Some(AnomalyRecord::flagged(
                row.clone(),
                severity,
                vec![AnomalyReason::LowSentimentRatio],
            ))
        })
        .collect()
}

/// Standard score of one value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZScore {
    pub index: usize,
    pub value: f64,
    pub z_score: f64,
    pub is_anomaly: bool,
}

/// Score every value against the sample mean and standard deviation; values
/// more than `threshold_std` deviations away are anomalies. With fewer than
/// two values or zero spread nothing is flagged and every score is zero.
pub fn zscore_anomalies(values: &[f64], threshold_std: f64) -> Vec<ZScore> {
    let center = mean(values).unwrap_or(0.0);
    let spread = sample_std_dev(values).filter(|s| *s > 0.0);

    values
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            let z_score = spread.map_or(0.0, |s| (value - center) / s);
            ZScore {
                index,
                value,
                z_score,
                is_anomaly: spread.is_some() && z_score.abs() > threshold_std,
            }
        })
        .collect()
}
