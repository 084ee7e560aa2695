//! Typed rows for each operational dataset.
//!
//! Rows are immutable once loaded; every analysis derives fresh views from them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Flow, LaneGroup, PassengerType, Terminal, ZoneType};
use crate::impl_record;

/// Queue-time compliance for one zone and time window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneComplianceRow {
    pub date: NaiveDate,
    pub zone: String,
    pub terminal: Terminal,
    pub zone_type: ZoneType,
    /// Window label such as `"1400-1600"`.
    pub time_window: String,
    pub threshold_minutes: i64,
    pub target_compliance_pct: f64,
    pub actual_compliance_pct: f64,
    pub pax_total: i64,
    pub pax_meeting_threshold: i64,
    pub avg_wait_time_min: f64,
    /// Always `actual_compliance_pct - target_compliance_pct`.
    pub variance_from_target: f64,
}

impl ZoneComplianceRow {
    /// Re-derives `variance_from_target` from the actual and target percentages.
    pub fn with_recomputed_variance(mut self) -> Self {
        self.variance_from_target = self.actual_compliance_pct - self.target_compliance_pct;
        self
    }
}

/// Hourly queue-time compliance per zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyComplianceRow {
    pub date: NaiveDate,
    pub hour: u32,
    pub zone: String,
    pub terminal: Terminal,
    pub threshold_minutes: i64,
    pub target_compliance_pct: f64,
    pub actual_compliance_pct: f64,
    pub pax_total: i64,
    pub pax_meeting_threshold: i64,
}

/// Daily screening performance of one security lane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityLaneRow {
    pub date: NaiveDate,
    pub lane: String,
    pub terminal: Terminal,
    pub lane_group: LaneGroup,
    pub cleared_volume: i64,
    pub reject_count: i64,
    pub total_scanned: i64,
    pub reject_rate_pct: f64,
    pub avg_throughput_per_hour: f64,
}

impl SecurityLaneRow {
    /// Reject rate over everything scanned; zero when nothing was scanned.
    pub fn computed_reject_rate(cleared_volume: i64, reject_count: i64) -> f64 {
        let scanned = cleared_volume + reject_count;
        if scanned <= 0 {
            0.0
        } else {
            reject_count as f64 / scanned as f64 * 100.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassengerVolumeRow {
    pub date: NaiveDate,
    pub terminal: Terminal,
    pub flow: Flow,
    pub passenger_type: PassengerType,
    pub pax_count: i64,
    /// Change against the trailing 7-day average; absent in older dataset versions.
    pub vs_7day_pct: Option<f64>,
}

/// Passengers showing up at a checkpoint during one hour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyShowupRow {
    pub date: NaiveDate,
    pub hour: u32,
    pub terminal: Terminal,
    pub passenger_type: PassengerType,
    pub checkpoint: String,
    pub volume: i64,
}

/// Passengers per airline. Airline rows are not split by terminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirlinePaxRow {
    pub date: NaiveDate,
    pub airline: String,
    pub passenger_type: PassengerType,
    pub pax_count: i64,
    pub flight_count: i64,
}

/// Air traffic movements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtmRow {
    pub date: NaiveDate,
    pub terminal: Terminal,
    pub flow: Flow,
    pub movement_type: PassengerType,
    pub atm_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaggageBeltRow {
    pub date: NaiveDate,
    pub belt: String,
    pub terminal: Terminal,
    pub belt_type: String,
    pub flights: i64,
    pub pax: i64,
    pub pax_per_flight: f64,
    pub utilization_pct: f64,
    pub primary_airlines: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateRow {
    pub date: NaiveDate,
    pub gate: String,
    pub terminal: Terminal,
    pub boarding_mode: String,
    pub flights: i64,
    pub pax: i64,
    pub pax_per_flight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiometricRow {
    pub date: NaiveDate,
    pub terminal: Terminal,
    pub channel: String,
    pub total_eligible_pax: i64,
    pub biometric_registrations: i64,
    pub successful_boardings: i64,
    pub success_rate_pct: f64,
    pub adoption_pct: f64,
}

/// Voice-of-customer feedback counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocFeedbackRow {
    pub date: NaiveDate,
    pub terminal: Terminal,
    pub department: String,
    pub media_type: String,
    pub complaints: i64,
    pub compliments: i64,
    pub total_feedback: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocMessageRow {
    pub date: NaiveDate,
    pub terminal: Terminal,
    pub department: String,
    pub sentiment: String,
    pub message: String,
    pub media: String,
}

impl VocMessageRow {
    pub fn is_negative(&self) -> bool {
        self.sentiment.eq_ignore_ascii_case("negative")
    }
}

/// On-time performance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtpRow {
    pub date: NaiveDate,
    pub terminal: Terminal,
    pub passenger_type: PassengerType,
    pub total_flights: i64,
    pub on_time_flights: i64,
    pub delayed_flights: i64,
    pub otp_pct: f64,
    pub avg_delay_minutes: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaggageDeliveryRow {
    pub date: NaiveDate,
    pub terminal: Terminal,
    pub total_bags: i64,
    pub delivered_within_target: i64,
    pub delivery_pct: f64,
    pub first_bag_minutes: f64,
    pub last_bag_minutes: f64,
    pub mishandled_bags: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotAdherenceRow {
    pub date: NaiveDate,
    pub terminal: Terminal,
    pub total_slots: i64,
    pub adhered_slots: i64,
    pub early_slots: i64,
    pub late_slots: i64,
    pub adherence_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyIssueRow {
    pub date: NaiveDate,
    pub terminal: Terminal,
    pub category: String,
    pub severity: String,
    pub resolved: bool,
}

impl_record!(
    ZoneComplianceRow,
    HourlyComplianceRow,
    SecurityLaneRow,
    PassengerVolumeRow,
    HourlyShowupRow,
    AtmRow,
    BaggageBeltRow,
    GateRow,
    BiometricRow,
    VocFeedbackRow,
    VocMessageRow,
    OtpRow,
    BaggageDeliveryRow,
    SlotAdherenceRow,
    SafetyIssueRow,
);

impl_record!(dated: AirlinePaxRow);
