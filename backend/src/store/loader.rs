//! Columnar dataset loading.
//!
//! Each dataset is a flat parquet or CSV file named after the dataset. Files are
//! decoded into polars `DataFrame`s, validated column by column and converted to
//! typed rows. Schema violations abort the load; optional columns degrade to
//! documented defaults with a warning.

use std::collections::BTreeSet;
use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::error::{ErrorContext, StoreError, StoreResult};
use super::{Dataset, DatasetStore};
use crate::models::*;

/// Days between 0001-01-01 and 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// On-disk format of the dataset files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    /// Prefer `<name>.parquet`, fall back to `<name>.csv`.
    #[default]
    Auto,
    Parquet,
    Csv,
}

/// Loads every dataset from a directory into an immutable [`DatasetStore`].
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    dir: PathBuf,
    format: DataFormat,
}

impl DatasetLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            format: DataFormat::Auto,
        }
    }

    pub fn with_format(mut self, format: DataFormat) -> Self {
        self.format = format;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `dataset`, if one exists.
    pub fn resolve(&self, dataset: Dataset) -> Option<PathBuf> {
        let candidates: &[&str] = match self.format {
            DataFormat::Auto => &["parquet", "csv"],
            DataFormat::Parquet => &["parquet"],
            DataFormat::Csv => &["csv"],
        };
        candidates
            .iter()
            .map(|ext| self.dir.join(format!("{}.{}", dataset.file_stem(), ext)))
            .find(|path| path.is_file())
    }

    /// Load all datasets. Fails on the first missing required dataset or schema violation.
    pub fn load(&self) -> StoreResult<DatasetStore> {
        if !self.dir.is_dir() {
            return Err(StoreError::configuration(format!(
                "data directory not found: {}",
                self.dir.display()
            )));
        }

        let mut store = DatasetStore::default();
        for dataset in Dataset::ALL.iter().copied() {
            let Some(path) = self.resolve(dataset) else {
                if dataset.is_required() {
                    return Err(StoreError::schema(
                        "required dataset file not found",
                        ErrorContext::new("load_dataset")
                            .with_dataset(dataset.file_stem())
                            .with_details(self.dir.display().to_string()),
                    ));
                }
                log::warn!(
                    "Optional dataset '{}' not found in {}; continuing with no rows",
                    dataset.file_stem(),
                    self.dir.display()
                );
                continue;
            };

            let df = read_frame(&path).map_err(|e| e.in_dataset(dataset.file_stem()))?;
            let frame = Frame::new(dataset.file_stem(), df);
            let rows = decode_into(&mut store, dataset, &frame)
                .map_err(|e| e.in_dataset(dataset.file_stem()))?;
            log::info!(
                "Loaded {} rows for '{}' from {}",
                rows,
                dataset.file_stem(),
                path.display()
            );
        }

        store.report_unknown_terminals();
        Ok(store)
    }
}

/// Read a parquet or CSV file into a `DataFrame`, choosing the reader by extension.
pub fn read_frame(path: &Path) -> StoreResult<DataFrame> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("parquet") => {
            let file = File::open(path)?;
            Ok(ParquetReader::new(file).finish()?)
        }
        Some("csv") => Ok(CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.into()))?
            .finish()?),
        _ => Err(StoreError::configuration(format!(
            "unsupported dataset file extension: {}",
            path.display()
        ))),
    }
}

fn decode_into(store: &mut DatasetStore, dataset: Dataset, frame: &Frame) -> StoreResult<usize> {
    let rows = match dataset {
        Dataset::ZoneCompliance => {
            store.zone_compliance = zone_compliance(frame)?;
            store.zone_compliance.len()
        }
        Dataset::HourlyCompliance => {
            store.hourly_compliance = hourly_compliance(frame)?;
            store.hourly_compliance.len()
        }
        Dataset::SecurityLanes => {
            store.security_lanes = security_lanes(frame)?;
            store.security_lanes.len()
        }
        Dataset::PaxDaily => {
            store.pax_daily = pax_daily(frame)?;
            store.pax_daily.len()
        }
        Dataset::PaxHourly => {
            store.pax_hourly = pax_hourly(frame)?;
            store.pax_hourly.len()
        }
        Dataset::PaxByAirline => {
            store.pax_by_airline = pax_by_airline(frame)?;
            store.pax_by_airline.len()
        }
        Dataset::Atm => {
            store.atm = atm(frame)?;
            store.atm.len()
        }
        Dataset::BaggageBelts => {
            store.baggage_belts = baggage_belts(frame)?;
            store.baggage_belts.len()
        }
        Dataset::Gates => {
            store.gates = gates(frame)?;
            store.gates.len()
        }
        Dataset::Biometric => {
            store.biometric = biometric(frame)?;
            store.biometric.len()
        }
        Dataset::VocFeedback => {
            store.voc_feedback = voc_feedback(frame)?;
            store.voc_feedback.len()
        }
        Dataset::VocMessages => {
            store.voc_messages = voc_messages(frame)?;
            store.voc_messages.len()
        }
        Dataset::Otp => {
            store.otp = otp(frame)?;
            store.otp.len()
        }
        Dataset::BaggageDelivery => {
            store.baggage_delivery = baggage_delivery(frame)?;
            store.baggage_delivery.len()
        }
        Dataset::SlotAdherence => {
            store.slot_adherence = slot_adherence(frame)?;
            store.slot_adherence.len()
        }
        Dataset::Safety => {
            store.safety = safety(frame)?;
            store.safety.len()
        }
    };
    Ok(rows)
}

/// A decoded file plus typed column accessors.
struct Frame {
    name: &'static str,
    df: DataFrame,
}

impl Frame {
    fn new(name: &'static str, df: DataFrame) -> Self {
        Self { name, df }
    }

    fn height(&self) -> usize {
        self.df.height()
    }

    fn has(&self, column: &str) -> bool {
        self.df
            .get_column_names()
            .iter()
            .any(|name| name.as_str() == column)
    }

    fn ctx(&self, column: &str) -> ErrorContext {
        ErrorContext::new("read_column")
            .with_dataset(self.name)
            .with_column(column)
    }

    fn column(&self, column: &str) -> StoreResult<&Column> {
        self.df
            .column(column)
            .map_err(|_| StoreError::schema("missing required column", self.ctx(column)))
    }

    fn null_at(&self, column: &str, row: usize) -> StoreError {
        StoreError::parse("null or undecodable value", self.ctx(column).with_row(row))
    }

    fn f64s(&self, column: &str) -> StoreResult<Vec<f64>> {
        let casted = self.column(column)?.cast(&DataType::Float64)?;
        let values = casted.f64()?;
        values
            .into_iter()
            .enumerate()
            .map(|(i, v)| match v {
                Some(v) if v.is_finite() => Ok(v),
                Some(v) => Err(StoreError::parse(
                    format!("non-finite value: {}", v),
                    self.ctx(column).with_row(i),
                )),
                None => Err(self.null_at(column, i)),
            })
            .collect()
    }

    /// Finite values inside `[min, max]`.
    fn bounded_f64s(&self, column: &str, min: f64, max: f64) -> StoreResult<Vec<f64>> {
        let values = self.f64s(column)?;
        if let Some((i, v)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !(min..=max).contains(*v))
        {
            return Err(StoreError::parse(
                format!("value out of range [{}, {}]: {}", min, max, v),
                self.ctx(column).with_row(i),
            ));
        }
        Ok(values)
    }

    fn percentages(&self, column: &str) -> StoreResult<Vec<f64>> {
        self.bounded_f64s(column, 0.0, 100.0)
    }

    fn non_negative_f64s(&self, column: &str) -> StoreResult<Vec<f64>> {
        self.bounded_f64s(column, 0.0, f64::MAX)
    }

    /// `None` when the column is absent; nulls and non-finite cells become `None`.
    fn opt_f64s(&self, column: &str) -> StoreResult<Option<Vec<Option<f64>>>> {
        if !self.has(column) {
            return Ok(None);
        }
        let casted = self.column(column)?.cast(&DataType::Float64)?;
        Ok(Some(
            casted
                .f64()?
                .into_iter()
                .map(|v| v.filter(|v| v.is_finite()))
                .collect(),
        ))
    }

    fn f64s_or(&self, column: &str, default: f64) -> StoreResult<Vec<f64>> {
        match self.opt_f64s(column)? {
            Some(values) => Ok(values.into_iter().map(|v| v.unwrap_or(default)).collect()),
            None => {
                log::warn!(
                    "Dataset '{}' has no '{}' column; using {}",
                    self.name,
                    column,
                    default
                );
                Ok(vec![default; self.height()])
            }
        }
    }

    fn i64s(&self, column: &str) -> StoreResult<Vec<i64>> {
        let casted = self.column(column)?.cast(&DataType::Int64)?;
        let values = casted.i64()?;
        values
            .into_iter()
            .enumerate()
            .map(|(i, v)| v.ok_or_else(|| self.null_at(column, i)))
            .collect()
    }

    /// Counts of people, bags or flights; negatives fail the load.
    fn counts(&self, column: &str) -> StoreResult<Vec<i64>> {
        let values = self.i64s(column)?;
        if let Some((i, v)) = values.iter().enumerate().find(|(_, v)| **v < 0) {
            return Err(StoreError::parse(
                format!("negative count: {}", v),
                self.ctx(column).with_row(i),
            ));
        }
        Ok(values)
    }

    fn hours(&self, column: &str) -> StoreResult<Vec<u32>> {
        self.i64s(column)?
            .into_iter()
            .enumerate()
            .map(|(i, h)| match u32::try_from(h) {
                Ok(hour) if hour < 24 => Ok(hour),
                _ => Err(StoreError::parse(
                    format!("hour out of range: {}", h),
                    self.ctx(column).with_row(i),
                )),
            })
            .collect()
    }

    fn strs(&self, column: &str) -> StoreResult<Vec<String>> {
        let casted = self.column(column)?.cast(&DataType::String)?;
        let values = casted.str()?;
        values
            .into_iter()
            .enumerate()
            .map(|(i, v)| {
                v.map(|s| s.to_string())
                    .ok_or_else(|| self.null_at(column, i))
            })
            .collect()
    }

    fn strs_or(&self, column: &str, default: &str) -> StoreResult<Vec<String>> {
        if !self.has(column) {
            log::warn!(
                "Dataset '{}' has no '{}' column; using '{}'",
                self.name,
                column,
                default
            );
            return Ok(vec![default.to_string(); self.height()]);
        }
        let casted = self.column(column)?.cast(&DataType::String)?;
        Ok(casted
            .str()?
            .into_iter()
            .map(|v| v.unwrap_or(default).to_string())
            .collect())
    }

    fn labels<T: From<String>>(&self, column: &str) -> StoreResult<Vec<T>> {
        Ok(self.strs(column)?.into_iter().map(T::from).collect())
    }

    fn bools(&self, column: &str) -> StoreResult<Vec<bool>> {
        let col = self.column(column)?;
        match col.dtype() {
            DataType::Boolean => col
                .bool()?
                .into_iter()
                .enumerate()
                .map(|(i, v)| v.ok_or_else(|| self.null_at(column, i)))
                .collect(),
            DataType::String => col
                .str()?
                .into_iter()
                .enumerate()
                .map(|(i, v)| match v.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
                    Some("true") | Some("1") | Some("yes") => Ok(true),
                    Some("false") | Some("0") | Some("no") => Ok(false),
                    _ => Err(self.null_at(column, i)),
                })
                .collect(),
            _ => Ok(self.i64s(column)?.into_iter().map(|v| v != 0).collect()),
        }
    }

    /// Calendar dates from date, datetime or `YYYY-MM-DD...` string columns.
    fn dates(&self, column: &str) -> StoreResult<Vec<NaiveDate>> {
        let col = self.column(column)?;
        if matches!(col.dtype(), DataType::String) {
            return col
                .str()?
                .into_iter()
                .enumerate()
                .map(|(i, v)| {
                    v.and_then(parse_date_prefix).ok_or_else(|| {
                        StoreError::parse(
                            format!("invalid date '{}'", v.unwrap_or("")),
                            self.ctx(column).with_row(i),
                        )
                    })
                })
                .collect();
        }

        let days = col.cast(&DataType::Date)?.cast(&DataType::Int32)?;
        days.i32()?
            .into_iter()
            .enumerate()
            .map(|(i, v)| {
                v.and_then(|d| NaiveDate::from_num_days_from_ce_opt(UNIX_EPOCH_DAYS_FROM_CE + d))
                    .ok_or_else(|| self.null_at(column, i))
            })
            .collect()
    }

    fn terminals(&self) -> StoreResult<Vec<Terminal>> {
        self.labels("terminal")
    }
}

/// Parse the leading `YYYY-MM-DD` of a date or timestamp string.
pub(crate) fn parse_date_prefix(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let prefix = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

fn zone_compliance(f: &Frame) -> StoreResult<Vec<ZoneComplianceRow>> {
    let dates = f.dates("date")?;
    let zones = f.strs("zone")?;
    let terminals = f.terminals()?;
    let zone_types: Vec<ZoneType> = f.labels("zone_type")?;
    let windows = f.strs("time_window")?;
    let thresholds = f.counts("threshold_minutes")?;
    let targets = f.percentages("target_compliance_pct")?;
    let actuals = f.percentages("actual_compliance_pct")?;
    let pax = f.counts("pax_total")?;
    let meeting = f.counts("pax_meeting_threshold")?;
    let waits = f.non_negative_f64s("avg_wait_time_min")?;

    Ok((0..f.height())
        .map(|i| {
            ZoneComplianceRow {
                date: dates[i],
                zone: zones[i].clone(),
                terminal: terminals[i].clone(),
                zone_type: zone_types[i].clone(),
                time_window: windows[i].clone(),
                threshold_minutes: thresholds[i],
                target_compliance_pct: targets[i],
                actual_compliance_pct: actuals[i],
                pax_total: pax[i],
                pax_meeting_threshold: meeting[i],
                avg_wait_time_min: waits[i],
                variance_from_target: 0.0,
            }
            .with_recomputed_variance()
        })
        .collect())
}

fn hourly_compliance(f: &Frame) -> StoreResult<Vec<HourlyComplianceRow>> {
    let dates = f.dates("date")?;
    let hours = f.hours("hour")?;
    let zones = f.strs("zone")?;
    let terminals = f.terminals()?;
    let thresholds = f.counts("threshold_minutes")?;
    let targets = f.percentages("target_compliance_pct")?;
    let actuals = f.percentages("actual_compliance_pct")?;
    let pax = f.counts("pax_total")?;
    let meeting = f.counts("pax_meeting_threshold")?;

    Ok((0..f.height())
        .map(|i| HourlyComplianceRow {
            date: dates[i],
            hour: hours[i],
            zone: zones[i].clone(),
            terminal: terminals[i].clone(),
            threshold_minutes: thresholds[i],
            target_compliance_pct: targets[i],
            actual_compliance_pct: actuals[i],
            pax_total: pax[i],
            pax_meeting_threshold: meeting[i],
        })
        .collect())
}

fn security_lanes(f: &Frame) -> StoreResult<Vec<SecurityLaneRow>> {
    let dates = f.dates("date")?;
    let lanes = f.strs("lane")?;
    let terminals = f.terminals()?;
    let groups: Vec<LaneGroup> = f
        .strs_or("lane_group", "Unknown")?
        .into_iter()
        .map(LaneGroup::from)
        .collect();
    let cleared = f.counts("cleared_volume")?;
    let rejects = f.counts("reject_count")?;
    let scanned = f.opt_f64s("total_scanned")?;
    let rates = f.opt_f64s("reject_rate_pct")?;
    if rates.is_none() {
        log::warn!("Dataset '{}' has no 'reject_rate_pct' column; deriving it from counts", f.name);
    }
    let throughput = f.f64s_or("avg_throughput_per_hour", 0.0)?;

    Ok((0..f.height())
        .map(|i| {
            let total_scanned = scanned
                .as_ref()
                .and_then(|col| col[i])
                .map(|v| v as i64)
                .unwrap_or(cleared[i] + rejects[i]);
            let reject_rate_pct = rates
                .as_ref()
                .and_then(|col| col[i])
                .unwrap_or_else(|| SecurityLaneRow::computed_reject_rate(cleared[i], rejects[i]));
            SecurityLaneRow {
                date: dates[i],
                lane: lanes[i].clone(),
                terminal: terminals[i].clone(),
                lane_group: groups[i].clone(),
                cleared_volume: cleared[i],
                reject_count: rejects[i],
                total_scanned,
                reject_rate_pct,
                avg_throughput_per_hour: throughput[i],
            }
        })
        .collect())
}

fn pax_daily(f: &Frame) -> StoreResult<Vec<PassengerVolumeRow>> {
    let dates = f.dates("date")?;
    let terminals = f.terminals()?;
    let flows: Vec<Flow> = f.labels("flow")?;
    let types: Vec<PassengerType> = f.labels("passenger_type")?;
    let pax = f.counts("pax_count")?;
    let deltas = f.opt_f64s("pax_count_vs_7day_pct")?;
    if deltas.is_none() {
        log::warn!(
            "Dataset '{}' has no 'pax_count_vs_7day_pct' column; 7-day comparison defaults to 0.0",
            f.name
        );
    }

    Ok((0..f.height())
        .map(|i| PassengerVolumeRow {
            date: dates[i],
            terminal: terminals[i].clone(),
            flow: flows[i].clone(),
            passenger_type: types[i].clone(),
            pax_count: pax[i],
            vs_7day_pct: deltas.as_ref().and_then(|col| col[i]),
        })
        .collect())
}

fn pax_hourly(f: &Frame) -> StoreResult<Vec<HourlyShowupRow>> {
    let dates = f.dates("date")?;
    let hours = f.hours("hour")?;
    let terminals = f.terminals()?;
    let types: Vec<PassengerType> = f.labels("passenger_type")?;
    let checkpoints = f.strs_or("checkpoint", "")?;
    let volumes = f.counts("volume")?;

    Ok((0..f.height())
        .map(|i| HourlyShowupRow {
            date: dates[i],
            hour: hours[i],
            terminal: terminals[i].clone(),
            passenger_type: types[i].clone(),
            checkpoint: checkpoints[i].clone(),
            volume: volumes[i],
        })
        .collect())
}

fn pax_by_airline(f: &Frame) -> StoreResult<Vec<AirlinePaxRow>> {
    let dates = f.dates("date")?;
    let airlines = f.strs("airline")?;
    let types: Vec<PassengerType> = f.labels("passenger_type")?;
    let pax = f.counts("pax_count")?;
    let flights = f.counts("flight_count")?;

    Ok((0..f.height())
        .map(|i| AirlinePaxRow {
            date: dates[i],
            airline: airlines[i].clone(),
            passenger_type: types[i].clone(),
            pax_count: pax[i],
            flight_count: flights[i],
        })
        .collect())
}

fn atm(f: &Frame) -> StoreResult<Vec<AtmRow>> {
    let dates = f.dates("date")?;
    let terminals = f.terminals()?;
    let flows: Vec<Flow> = f.labels("flow")?;
    let types: Vec<PassengerType> = f.labels("type")?;
    let counts = f.counts("atm_count")?;

    Ok((0..f.height())
        .map(|i| AtmRow {
            date: dates[i],
            terminal: terminals[i].clone(),
            flow: flows[i].clone(),
            movement_type: types[i].clone(),
            atm_count: counts[i],
        })
        .collect())
}

fn baggage_belts(f: &Frame) -> StoreResult<Vec<BaggageBeltRow>> {
    let dates = f.dates("date")?;
    let belts = f.strs("belt")?;
    let terminals = f.terminals()?;
    let types = f.strs("belt_type")?;
    let flights = f.counts("flights")?;
    let pax = f.counts("pax")?;
    let per_flight = f.non_negative_f64s("pax_per_flight")?;
    let utilization = f.non_negative_f64s("utilization_pct")?;
    let airlines = f.strs_or("primary_airlines", "")?;

    Ok((0..f.height())
        .map(|i| BaggageBeltRow {
            date: dates[i],
            belt: belts[i].clone(),
            terminal: terminals[i].clone(),
            belt_type: types[i].clone(),
            flights: flights[i],
            pax: pax[i],
            pax_per_flight: per_flight[i],
            utilization_pct: utilization[i],
            primary_airlines: airlines[i].clone(),
        })
        .collect())
}

fn gates(f: &Frame) -> StoreResult<Vec<GateRow>> {
    let dates = f.dates("date")?;
    let gates = f.strs("gate")?;
    let terminals = f.terminals()?;
    let modes = f.strs("boarding_mode")?;
    let flights = f.counts("flights")?;
    let pax = f.counts("pax")?;
    let per_flight = f.non_negative_f64s("pax_per_flight")?;

    Ok((0..f.height())
        .map(|i| GateRow {
            date: dates[i],
            gate: gates[i].clone(),
            terminal: terminals[i].clone(),
            boarding_mode: modes[i].clone(),
            flights: flights[i],
            pax: pax[i],
            pax_per_flight: per_flight[i],
        })
        .collect())
}

fn biometric(f: &Frame) -> StoreResult<Vec<BiometricRow>> {
    let dates = f.dates("date")?;
    let terminals = f.terminals()?;
    let channels = f.strs("channel")?;
    let eligible = f.counts("total_eligible_pax")?;
    let registrations = f.counts("biometric_registrations")?;
    let boardings = f.counts("successful_boardings")?;
    let success = f.percentages("success_rate_pct")?;
    let adoption = f.percentages("adoption_pct")?;

    Ok((0..f.height())
        .map(|i| BiometricRow {
            date: dates[i],
            terminal: terminals[i].clone(),
            channel: channels[i].clone(),
            total_eligible_pax: eligible[i],
            biometric_registrations: registrations[i],
            successful_boardings: boardings[i],
            success_rate_pct: success[i],
            adoption_pct: adoption[i],
        })
        .collect())
}

fn voc_feedback(f: &Frame) -> StoreResult<Vec<VocFeedbackRow>> {
    let dates = f.dates("date")?;
    let terminals = f.terminals()?;
    let departments = f.strs_or("department", "All")?;
    let media = f.strs("media_type")?;
    let complaints = f.counts("complaints")?;
    let compliments = f.counts("compliments")?;
    let totals = f.opt_f64s("total_feedback")?;

    Ok((0..f.height())
        .map(|i| VocFeedbackRow {
            date: dates[i],
            terminal: terminals[i].clone(),
            department: departments[i].clone(),
            media_type: media[i].clone(),
            complaints: complaints[i],
            compliments: compliments[i],
            total_feedback: totals
                .as_ref()
                .and_then(|col| col[i])
                .map(|v| v as i64)
                .unwrap_or(complaints[i] + compliments[i]),
        })
        .collect())
}

fn voc_messages(f: &Frame) -> StoreResult<Vec<VocMessageRow>> {
    let dates = f.dates("date")?;
    let terminals = f.terminals()?;
    let departments = f.strs_or("department", "")?;
    let sentiments = f.strs("sentiment")?;
    let messages = f.strs("message")?;
    let media = f.strs_or("media", "")?;

    Ok((0..f.height())
        .map(|i| VocMessageRow {
            date: dates[i],
            terminal: terminals[i].clone(),
            department: departments[i].clone(),
            sentiment: sentiments[i].clone(),
            message: messages[i].clone(),
            media: media[i].clone(),
        })
        .collect())
}

fn otp(f: &Frame) -> StoreResult<Vec<OtpRow>> {
    let dates = f.dates("date")?;
    let terminals = f.terminals()?;
    let types: Vec<PassengerType> = f.labels("passenger_type")?;
    let total = f.counts("total_flights")?;
    let on_time = f.counts("on_time_flights")?;
    let delayed = f.counts("delayed_flights")?;
    let pct = f.percentages("otp_pct")?;
    let delay = f.f64s_or("avg_delay_minutes", 0.0)?;

    Ok((0..f.height())
        .map(|i| OtpRow {
            date: dates[i],
            terminal: terminals[i].clone(),
            passenger_type: types[i].clone(),
            total_flights: total[i],
            on_time_flights: on_time[i],
            delayed_flights: delayed[i],
            otp_pct: pct[i],
            avg_delay_minutes: delay[i],
        })
        .collect())
}

fn baggage_delivery(f: &Frame) -> StoreResult<Vec<BaggageDeliveryRow>> {
    let dates = f.dates("date")?;
    let terminals = f.terminals()?;
    let total = f.counts("total_bags")?;
    let delivered = f.counts("delivered_within_target")?;
    let pct = f.percentages("delivery_pct")?;
    let first = f.non_negative_f64s("first_bag_minutes")?;
    let last = f.non_negative_f64s("last_bag_minutes")?;
    let mishandled = f.counts("mishandled_bags")?;

    Ok((0..f.height())
        .map(|i| BaggageDeliveryRow {
            date: dates[i],
            terminal: terminals[i].clone(),
            total_bags: total[i],
            delivered_within_target: delivered[i],
            delivery_pct: pct[i],
            first_bag_minutes: first[i],
            last_bag_minutes: last[i],
            mishandled_bags: mishandled[i],
        })
        .collect())
}

fn slot_adherence(f: &Frame) -> StoreResult<Vec<SlotAdherenceRow>> {
    let dates = f.dates("date")?;
    let terminals = f.terminals()?;
    let total = f.counts("total_slots")?;
    let adhered = f.counts("adhered_slots")?;
    let early = f.counts("early_slots")?;
    let late = f.counts("late_slots")?;
    let pct = f.percentages("adherence_pct")?;

    Ok((0..f.height())
        .map(|i| SlotAdherenceRow {
            date: dates[i],
            terminal: terminals[i].clone(),
            total_slots: total[i],
            adhered_slots: adhered[i],
            early_slots: early[i],
            late_slots: late[i],
            adherence_pct: pct[i],
        })
        .collect())
}

fn safety(f: &Frame) -> StoreResult<Vec<SafetyIssueRow>> {
    let dates = f.dates("date")?;
    let terminals = f.terminals()?;
    let categories = f.strs("category")?;
    let severities = f.strs("severity")?;
    let resolved = f.bools("resolved")?;

    Ok((0..f.height())
        .map(|i| SafetyIssueRow {
            date: dates[i],
            terminal: terminals[i].clone(),
            category: categories[i].clone(),
            severity: severities[i].clone(),
            resolved: resolved[i],
        })
        .collect())
}

impl DatasetStore {
    /// Log (once per dataset) terminal labels outside the known set.
    fn report_unknown_terminals(&self) {
        fn scan<R: Record>(name: &str, rows: &[R]) {
            let unknown: BTreeSet<&str> = rows
                .iter()
                .map(|r| r.terminal())
                .filter(|t| !t.is_known())
                .map(|t| t.as_str())
                .collect();
            if !unknown.is_empty() {
                log::warn!(
                    "Dataset '{}' contains terminal labels outside {:?}: {:?}; terminal filters will not match them",
                    name,
                    Terminal::KNOWN,
                    unknown
                );
            }
        }

        scan(Dataset::ZoneCompliance.file_stem(), &self.zone_compliance);
        scan(Dataset::SecurityLanes.file_stem(), &self.security_lanes);
        scan(Dataset::PaxDaily.file_stem(), &self.pax_daily);
        scan(Dataset::VocFeedback.file_stem(), &self.voc_feedback);
        scan(Dataset::VocMessages.file_stem(), &self.voc_messages);
    }
}
