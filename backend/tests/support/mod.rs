#![allow(dead_code)]

use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use airport_ops::config::PolicyConfig;
use airport_ops::models::*;
use airport_ops::services::ReasoningEngine;
use airport_ops::store::DatasetStore;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Restores the previous values on unwind and serializes access to the
/// process environment across parallel tests.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

pub fn report_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 24).unwrap()
}

pub fn engine(store: DatasetStore) -> ReasoningEngine {
    ReasoningEngine::new(Arc::new(store), PolicyConfig::default())
}

pub fn zone_row(zone: &str, terminal: &str, window: &str, actual: f64, pax: i64) -> ZoneComplianceRow {
    ZoneComplianceRow {
        date: report_date(),
        zone: zone.to_string(),
        terminal: Terminal::from(terminal),
        zone_type: ZoneType::Checkin,
        time_window: window.to_string(),
        threshold_minutes: 10,
        target_compliance_pct: 95.0,
        actual_compliance_pct: actual,
        pax_total: pax,
        pax_meeting_threshold: (pax as f64 * actual / 100.0) as i64,
        avg_wait_time_min: 9.5,
        variance_from_target: 0.0,
    }
    .with_recomputed_variance()
}

pub fn lane_row(lane: &str, terminal: &str, cleared: i64, reject_rate: f64) -> SecurityLaneRow {
    let reject_count = (cleared as f64 * reject_rate / 100.0).round() as i64;
    SecurityLaneRow {
        date: report_date(),
        lane: lane.to_string(),
        terminal: Terminal::from(terminal),
        lane_group: LaneGroup::Right,
        cleared_volume: cleared,
        reject_count,
        total_scanned: cleared + reject_count,
        reject_rate_pct: reject_rate,
        avg_throughput_per_hour: cleared as f64 / 18.0,
    }
}

pub fn showup_row(hour: u32, terminal: &str, volume: i64) -> HourlyShowupRow {
    HourlyShowupRow {
        date: report_date(),
        hour,
        terminal: Terminal::from(terminal),
        passenger_type: PassengerType::Domestic,
        checkpoint: "Entry".to_string(),
        volume,
    }
}

/// The operational store every scenario starts from: one report date across
/// both terminals.
pub fn scenario_store() -> DatasetStore {
    DatasetStore::builder()
        .zone_compliance(vec![
            zone_row("Check-in 34-86", "T2", "1400-1600", 80.0, 1000),
            zone_row("Check-in 34-86", "T2", "1500-1700", 82.0, 1100),
            zone_row("Check-in 34-86", "T2", "1600-1800", 84.0, 1200),
            zone_row("Entry Gate 1", "T1", "1400-1600", 97.0, 900),
        ])
        .security_lanes(vec![
            lane_row("L1", "T1", 2400, 3.0),
            lane_row("L2", "T1", 2600, 5.0),
            lane_row("L3", "T2", 2200, 9.0),
            lane_row("L4", "T2", 2000, 12.0),
        ])
        .pax_hourly(vec![
            showup_row(14, "T2", 1800),
            showup_row(15, "T2", 2100),
            showup_row(9, "T1", 900),
        ])
        .build()
}

pub fn write_csv(dir: &Path, stem: &str, content: &str) {
    std::fs::write(dir.join(format!("{}.csv", stem)), content).unwrap();
}
