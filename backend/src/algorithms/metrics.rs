//! Metrics Calculator: pure scalar classifications over aggregated values.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::aggregation::{round_to, sort_by_measure, Direction};
use crate::models::{GateRow, Terminal};

/// Default width of the near-target band, in percentage points.
pub const NEAR_TARGET_BAND: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    OnTarget,
    NearTarget,
    BelowTarget,
}

impl ComplianceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ComplianceStatus::OnTarget => "On Target",
            ComplianceStatus::NearTarget => "Near Target",
            ComplianceStatus::BelowTarget => "Below Target",
        }
    }
}

/// Classify compliance against a target with the default 3-point band.
pub fn compliance_status(actual_pct: f64, target_pct: f64) -> ComplianceStatus {
    compliance_status_with_band(actual_pct, target_pct, NEAR_TARGET_BAND)
}

pub fn compliance_status_with_band(actual_pct: f64, target_pct: f64, band: f64) -> ComplianceStatus {
    if actual_pct >= target_pct {
        ComplianceStatus::OnTarget
    } else if actual_pct >= target_pct - band {
        ComplianceStatus::NearTarget
    } else {
        ComplianceStatus::BelowTarget
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

/// Display colour hint for a trend arrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorHint {
    Green,
    Red,
    Gray,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub direction: TrendDirection,
    pub pct_change: f64,
    pub color: ColorHint,
}

/// Period-over-period trend. A zero `previous` yields `(Flat, 0.0, Gray)`;
/// changes under one percent in magnitude are Flat but keep their value.
pub fn trend(current: f64, previous: f64) -> Trend {
    if previous == 0.0 {
        return Trend {
            direction: TrendDirection::Flat,
            pct_change: 0.0,
            color: ColorHint::Gray,
        };
    }

    let pct_change = (current - previous) / previous * 100.0;
    let (direction, color) = if pct_change.abs() < 1.0 {
        (TrendDirection::Flat, ColorHint::Gray)
    } else if pct_change > 0.0 {
        (TrendDirection::Up, ColorHint::Green)
    } else {
        (TrendDirection::Down, ColorHint::Red)
    };

    Trend {
        direction,
        pct_change,
        color,
    }
}

/// Top `top_n` periods by summed measure. Ties go to the lower period key.
pub fn peak_periods<'a, R, I, K, FK, FV>(rows: I, value: FV, period: FK, top_n: usize) -> Vec<(K, f64)>
where
    R: 'a,
    I: IntoIterator<Item = &'a R>,
    K: Ord + Clone,
    FK: Fn(&R) -> K,
    FV: Fn(&R) -> f64,
{
    let mut totals: BTreeMap<K, f64> = BTreeMap::new();
    for row in rows {
        *totals.entry(period(row)).or_insert(0.0) += value(row);
    }
    let mut totals: Vec<(K, f64)> = totals.into_iter().collect();
    sort_by_measure(&mut totals, |(_, total)| *total, Direction::Descending);
    totals.truncate(top_n);
    totals
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UtilizationStatus {
    UnderUtilized,
    Optimal,
    NearCapacity,
    OverUtilized,
}

impl UtilizationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            UtilizationStatus::UnderUtilized => "Under-utilized",
            UtilizationStatus::Optimal => "Optimal",
            UtilizationStatus::NearCapacity => "Near Capacity",
            UtilizationStatus::OverUtilized => "Over-utilized",
        }
    }

    /// Band for a percentage: <60, <=85, <=95, above.
    pub fn from_pct(pct: f64) -> Self {
        if pct < 60.0 {
            UtilizationStatus::UnderUtilized
        } else if pct <= 85.0 {
            UtilizationStatus::Optimal
        } else if pct <= 95.0 {
            UtilizationStatus::NearCapacity
        } else {
            UtilizationStatus::OverUtilized
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Utilization {
    pub pct: f64,
    pub status: UtilizationStatus,
}

/// Utilization of `capacity`, rounded to one decimal. Zero capacity is UnderUtilized at 0%.
pub fn utilization_status(actual: f64, capacity: f64) -> Utilization {
    let pct = if capacity > 0.0 {
        actual / capacity * 100.0
    } else {
        0.0
    };
    Utilization {
        pct: round_to(pct, 1),
        status: UtilizationStatus::from_pct(pct),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    NeedsAttention,
    Fair,
    Good,
    Excellent,
    /// No feedback of either kind was recorded.
    NoData,
}

impl Sentiment {
    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Excellent => "Excellent",
            Sentiment::Good => "Good",
            Sentiment::Fair => "Fair",
            Sentiment::NeedsAttention => "Needs Attention",
            Sentiment::NoData => "No Data",
        }
    }

    /// Four-band classification of a finite ratio.
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= 3.0 {
            Sentiment::Excellent
        } else if ratio >= 2.0 {
            Sentiment::Good
        } else if ratio >= 1.0 {
            Sentiment::Fair
        } else {
            Sentiment::NeedsAttention
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Compliments-per-complaint ratio.
///
/// `Unbounded` marks compliments with no complaints; `NoFeedback` marks a slice
/// with neither. Both are explicit so a zero denominator never becomes a number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum VocRatio {
    Finite(f64),
    Unbounded,
    NoFeedback,
}

impl VocRatio {
    pub fn new(compliments: i64, complaints: i64) -> Self {
        if complaints > 0 {
            VocRatio::Finite(round_to(compliments as f64 / complaints as f64, 2))
        } else if compliments > 0 {
            VocRatio::Unbounded
        } else {
            VocRatio::NoFeedback
        }
    }

    pub fn finite(&self) -> Option<f64> {
        match self {
            VocRatio::Finite(r) => Some(*r),
            _ => None,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, VocRatio::Unbounded)
    }
}

impl fmt::Display for VocRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VocRatio::Finite(r) => write!(f, "{:.2}", r),
            VocRatio::Unbounded => f.write_str("unbounded"),
            VocRatio::NoFeedback => f.write_str("n/a"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VocAssessment {
    pub ratio: VocRatio,
    pub sentiment: Sentiment,
}

pub fn voc_ratio(compliments: i64, complaints: i64) -> VocAssessment {
    let ratio = VocRatio::new(compliments, complaints);
    let sentiment = match ratio {
        VocRatio::Finite(r) => Sentiment::from_ratio(r),
        VocRatio::Unbounded => Sentiment::Excellent,
        VocRatio::NoFeedback => Sentiment::NoData,
    };
    VocAssessment { ratio, sentiment }
}

/// Ratio with the denominator floored at one, for trend lines and breakdowns.
pub fn guarded_ratio(numerator: f64, denominator: f64) -> f64 {
    numerator / denominator.max(1.0)
}

/// Named reporting window ending at an anchor date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeBucket {
    L7D,
    L30D,
    MTD,
    YTD,
}

impl TimeBucket {
    pub const ALL: [TimeBucket; 4] = [
        TimeBucket::L7D,
        TimeBucket::L30D,
        TimeBucket::MTD,
        TimeBucket::YTD,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeBucket::L7D => "L7D",
            TimeBucket::L30D => "L30D",
            TimeBucket::MTD => "MTD",
            TimeBucket::YTD => "YTD",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|b| b.as_str().eq_ignore_ascii_case(raw.trim()))
    }

    /// First date of the window (inclusive).
    pub fn start(&self, anchor: NaiveDate) -> NaiveDate {
        match self {
            TimeBucket::L7D => anchor.checked_sub_days(Days::new(7)).unwrap_or(anchor),
            TimeBucket::L30D => anchor.checked_sub_days(Days::new(30)).unwrap_or(anchor),
            TimeBucket::MTD => anchor.with_day(1).unwrap_or(anchor),
            TimeBucket::YTD => NaiveDate::from_ymd_opt(anchor.year(), 1, 1).unwrap_or(anchor),
        }
    }
}

/// Share of flights and passengers per boarding mode within one terminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardingModeShare {
    pub terminal: Terminal,
    pub boarding_mode: String,
    pub flights: i64,
    pub pax: i64,
    pub flights_pct: f64,
    pub pax_pct: f64,
}

/// Boarding-mode mix per terminal, ordered by terminal then mode.
pub fn boarding_mode_mix<'a, I>(rows: I) -> Vec<BoardingModeShare>
where
    I: IntoIterator<Item = &'a GateRow>,
{
    let mut by_mode: BTreeMap<(Terminal, String), (i64, i64)> = BTreeMap::new();
    let mut by_terminal: BTreeMap<Terminal, (i64, i64)> = BTreeMap::new();
    for row in rows {
        let mode = by_mode
            .entry((row.terminal.clone(), row.boarding_mode.clone()))
            .or_insert((0, 0));
        mode.0 += row.flights;
        mode.1 += row.pax;
        let terminal = by_terminal.entry(row.terminal.clone()).or_insert((0, 0));
        terminal.0 += row.flights;
        terminal.1 += row.pax;
    }

    let share = |part: i64, whole: i64| {
        if whole > 0 {
            round_to(part as f64 / whole as f64 * 100.0, 2)
        } else {
            0.0
        }
    };

    by_mode
        .into_iter()
        .map(|((terminal, boarding_mode), (flights, pax))| {
            let (t_flights, t_pax) = by_terminal.get(&terminal).copied().unwrap_or((0, 0));
            BoardingModeShare {
                flights_pct: share(flights, t_flights),
                pax_pct: share(pax, t_pax),
                terminal,
                boarding_mode,
                flights,
                pax,
            }
        })
        .collect()
}
