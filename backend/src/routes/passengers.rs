use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// =========================================================
// Passenger volume types
// =========================================================

/// Summed show-up volume for one hour of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyVolume {
    pub hour: u32,
    pub volume: i64,
    /// Source rows that fell into this hour.
    pub observations: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassengerVolumeAnalysis {
    pub date: NaiveDate,
    pub row_count: usize,
    pub hourly_row_count: usize,
    pub total_pax: i64,
    pub domestic_pax: i64,
    pub international_pax: i64,
    /// Mean 7-day delta over rows that carry it; 0.0 when none do.
    pub vs_7day_pct: f64,
    /// Up to three busiest hours.
    pub peak_hours: Vec<HourlyVolume>,
    /// Exactly 24 buckets, hour 0 first.
    pub hourly_distribution: Vec<HourlyVolume>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirlineShare {
    pub airline: String,
    pub pax_count: i64,
    pub flight_count: i64,
    pub share_pct: f64,
}
