use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Values the dashboard filter bar offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub terminals: Vec<String>,
    pub flows: Vec<String>,
    pub passenger_types: Vec<String>,
    pub time_buckets: Vec<TimeWindow>,
    pub report_date: NaiveDate,
    pub data_start: Option<NaiveDate>,
    pub data_end: Option<NaiveDate>,
}

/// A selectable reporting window resolved against the report date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}
