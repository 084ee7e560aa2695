//! Options for the dashboard filter bar.

use chrono::NaiveDate;

use crate::algorithms::TimeBucket;
use crate::config::DashboardConfig;
use crate::models::{Flow, PassengerType};
use crate::routes::filters::{FilterOptions, TimeWindow};
use crate::store::DatasetStore;

/// Filter choices from configuration. The data range falls back to the dates
/// present in the store when the configuration leaves it open.
pub fn filter_options(config: &DashboardConfig, store: &DatasetStore) -> FilterOptions {
    let loaded = store.date_range();
    let labels = |known: &[&str]| known.iter().map(|s| s.to_string()).collect::<Vec<_>>();

    FilterOptions {
        terminals: config.filters.terminals.clone(),
        flows: labels(Flow::KNOWN),
        passenger_types: labels(PassengerType::KNOWN),
        time_buckets: time_windows(&config.filters.time_buckets, config.data.report_date),
        report_date: config.data.report_date,
        data_start: config.data.start_date.or(loaded.map(|(start, _)| start)),
        data_end: config.data.end_date.or(loaded.map(|(_, end)| end)),
    }
}

/// Configured bucket labels resolved to windows ending at `anchor`. Unknown labels are skipped.
fn time_windows(labels: &[String], anchor: NaiveDate) -> Vec<TimeWindow> {
    labels
        .iter()
        .filter_map(|label| match TimeBucket::parse(label) {
            Some(bucket) => Some(TimeWindow {
                label: bucket.as_str().to_string(),
                start: bucket.start(anchor),
                end: anchor,
            }),
            None => {
                log::warn!("Ignoring unknown time bucket '{}'", label);
                None
            }
        })
        .collect()
}
