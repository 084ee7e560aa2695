//! Row builders for service tests.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::config::PolicyConfig;
use crate::models::*;
use crate::store::DatasetStore;

use super::ReasoningEngine;

pub fn d(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, day).unwrap()
}

pub fn engine(store: DatasetStore) -> ReasoningEngine {
    ReasoningEngine::new(Arc::new(store), PolicyConfig::default())
}

pub fn zone(day: u32, zone: &str, terminal: &str, window: &str, actual: f64, pax: i64) -> ZoneComplianceRow {
    ZoneComplianceRow {
        date: d(day),
        zone: zone.to_string(),
        terminal: Terminal::from(terminal),
        zone_type: ZoneType::Checkin,
        time_window: window.to_string(),
        threshold_minutes: 10,
        target_compliance_pct: 95.0,
        actual_compliance_pct: actual,
        pax_total: pax,
        pax_meeting_threshold: (pax as f64 * actual / 100.0) as i64,
        avg_wait_time_min: 8.0,
        variance_from_target: 0.0,
    }
    .with_recomputed_variance()
}

pub fn hourly(day: u32, hour: u32, zone: &str, terminal: &str, actual: f64) -> HourlyComplianceRow {
    HourlyComplianceRow {
        date: d(day),
        hour,
        zone: zone.to_string(),
        terminal: Terminal::from(terminal),
        threshold_minutes: 10,
        target_compliance_pct: 95.0,
        actual_compliance_pct: actual,
        pax_total: 400,
        pax_meeting_threshold: 300,
    }
}

pub fn lane(day: u32, lane: &str, terminal: &str, cleared: i64, reject_rate: f64) -> SecurityLaneRow {
    let reject_count = (cleared as f64 * reject_rate / 100.0).round() as i64;
    SecurityLaneRow {
        date: d(day),
        lane: lane.to_string(),
        terminal: Terminal::from(terminal),
        lane_group: LaneGroup::Left,
        cleared_volume: cleared,
        reject_count,
        total_scanned: cleared + reject_count,
        reject_rate_pct: reject_rate,
        avg_throughput_per_hour: cleared as f64 / 18.0,
    }
}

pub fn pax(day: u32, terminal: &str, flow: &str, kind: &str, count: i64, vs_7day: Option<f64>) -> PassengerVolumeRow {
    PassengerVolumeRow {
        date: d(day),
        terminal: Terminal::from(terminal),
        flow: Flow::from(flow),
        passenger_type: PassengerType::from(kind),
        pax_count: count,
        vs_7day_pct: vs_7day,
    }
}

pub fn showup(day: u32, hour: u32, terminal: &str, volume: i64) -> HourlyShowupRow {
    HourlyShowupRow {
        date: d(day),
        hour,
        terminal: Terminal::from(terminal),
        passenger_type: PassengerType::Domestic,
        checkpoint: "Entry".to_string(),
        volume,
    }
}

pub fn feedback(day: u32, terminal: &str, media: &str, complaints: i64, compliments: i64) -> VocFeedbackRow {
    VocFeedbackRow {
        date: d(day),
        terminal: Terminal::from(terminal),
        department: "All".to_string(),
        media_type: media.to_string(),
        complaints,
        compliments,
        total_feedback: complaints + compliments,
    }
}

pub fn message(day: u32, terminal: &str, sentiment: &str, text: &str) -> VocMessageRow {
    VocMessageRow {
        date: d(day),
        terminal: Terminal::from(terminal),
        department: "Security".to_string(),
        sentiment: sentiment.to_string(),
        message: text.to_string(),
        media: "Twitter".to_string(),
    }
}

pub fn otp(day: u32, terminal: &str, otp_pct: f64) -> OtpRow {
    OtpRow {
        date: d(day),
        terminal: Terminal::from(terminal),
        passenger_type: PassengerType::Domestic,
        total_flights: 100,
        on_time_flights: otp_pct as i64,
        delayed_flights: 100 - otp_pct as i64,
        otp_pct,
        avg_delay_minutes: 12.0,
    }
}

pub fn bag_delivery(day: u32, terminal: &str, delivery_pct: f64) -> BaggageDeliveryRow {
    BaggageDeliveryRow {
        date: d(day),
        terminal: Terminal::from(terminal),
        total_bags: 1000,
        delivered_within_target: (delivery_pct * 10.0) as i64,
        delivery_pct,
        first_bag_minutes: 9.0,
        last_bag_minutes: 31.0,
        mishandled_bags: 2,
    }
}

pub fn slot(day: u32, terminal: &str, late: i64, adherence: f64) -> SlotAdherenceRow {
    SlotAdherenceRow {
        date: d(day),
        terminal: Terminal::from(terminal),
        total_slots: 200,
        adhered_slots: 200 - late,
        early_slots: 0,
        late_slots: late,
        adherence_pct: adherence,
    }
}

pub fn safety(day: u32, terminal: &str, category: &str, resolved: bool) -> SafetyIssueRow {
    SafetyIssueRow {
        date: d(day),
        terminal: Terminal::from(terminal),
        category: category.to_string(),
        severity: "Medium".to_string(),
        resolved,
    }
}

pub fn gate(day: u32, gate: &str, terminal: &str, mode: &str, flights: i64, pax: i64) -> GateRow {
    GateRow {
        date: d(day),
        gate: gate.to_string(),
        terminal: Terminal::from(terminal),
        boarding_mode: mode.to_string(),
        flights,
        pax,
        pax_per_flight: if flights > 0 { pax as f64 / flights as f64 } else { 0.0 },
    }
}

pub fn belt(day: u32, belt: &str, terminal: &str, utilization: f64, flights: i64, pax: i64) -> BaggageBeltRow {
    BaggageBeltRow {
        date: d(day),
        belt: belt.to_string(),
        terminal: Terminal::from(terminal),
        belt_type: "Domestic".to_string(),
        flights,
        pax,
        pax_per_flight: if flights > 0 { pax as f64 / flights as f64 } else { 0.0 },
        utilization_pct: utilization,
        primary_airlines: "6E".to_string(),
    }
}

pub fn biometric(day: u32, terminal: &str, channel: &str, eligible: i64, registrations: i64, boardings: i64) -> BiometricRow {
    BiometricRow {
        date: d(day),
        terminal: Terminal::from(terminal),
        channel: channel.to_string(),
        total_eligible_pax: eligible,
        biometric_registrations: registrations,
        successful_boardings: boardings,
        success_rate_pct: 0.0,
        adoption_pct: 0.0,
    }
}

pub fn atm(day: u32, terminal: &str, kind: &str, count: i64) -> AtmRow {
    AtmRow {
        date: d(day),
        terminal: Terminal::from(terminal),
        flow: Flow::Departure,
        movement_type: PassengerType::from(kind),
        atm_count: count,
    }
}

pub fn airline(day: u32, airline: &str, pax: i64, flights: i64) -> AirlinePaxRow {
    AirlinePaxRow {
        date: d(day),
        airline: airline.to_string(),
        passenger_type: PassengerType::Domestic,
        pax_count: pax,
        flight_count: flights,
    }
}
