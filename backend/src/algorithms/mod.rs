//! Metrics Calculator and Anomaly Detector.

pub mod anomaly;
pub mod metrics;

pub use anomaly::{
    queue_anomalies, queue_anomalies_with_bands, security_lane_anomalies, voc_anomalies,
    zscore_anomalies, AnomalyReason, AnomalyRecord, Severity, SeverityBands, ZScore,
};
pub use metrics::{
    boarding_mode_mix, compliance_status, compliance_status_with_band, guarded_ratio,
    peak_periods, trend, utilization_status, voc_ratio, BoardingModeShare, ColorHint,
    ComplianceStatus, Sentiment, TimeBucket, Trend, TrendDirection, Utilization,
    UtilizationStatus, VocAssessment, VocRatio, NEAR_TARGET_BAND,
};
