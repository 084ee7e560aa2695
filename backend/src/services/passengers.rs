//! Passenger volume analyses.

use chrono::NaiveDate;

use crate::aggregation::{
    filter, filter_dated, group_and_aggregate, mean, round_to, sort_by_measure, Aggregation,
    DateSpan, Direction, TerminalFilter,
};
use crate::models::{AirlinePaxRow, PassengerType};
use crate::routes::passengers::*;

use super::ReasoningEngine;

const PEAK_HOUR_COUNT: usize = 3;
const HOURS_PER_DAY: u32 = 24;

impl ReasoningEngine {
    pub fn analyze_passenger_volumes(
        &self,
        date: NaiveDate,
        terminals: &TerminalFilter,
    ) -> PassengerVolumeAnalysis {
        let predicate = self.day(date, terminals);
        let daily: Vec<_> = filter(self.store.pax_daily(), &predicate).collect();
        let hourly: Vec<_> = filter(self.store.pax_hourly(), &predicate).collect();

        let pax_of = |kind: PassengerType| -> i64 {
            daily
                .iter()
                .filter(|r| r.passenger_type == kind)
                .map(|r| r.pax_count)
                .sum()
        };

        let deltas: Vec<f64> = daily.iter().filter_map(|r| r.vs_7day_pct).collect();
        let vs_7day_pct = match mean(&deltas) {
            Some(avg) => round_to(avg, 2),
            None => {
                if !daily.is_empty() {
                    log::warn!(
                        "No 7-day comparison values for {} ({}); reporting 0.0",
                        date,
                        terminals.label()
                    );
                }
                0.0
            }
        };

        let mut hourly_distribution: Vec<HourlyVolume> = (0..HOURS_PER_DAY)
            .map(|hour| HourlyVolume {
                hour,
                volume: 0,
                observations: 0,
            })
            .collect();
        for row in &hourly {
            match hourly_distribution.get_mut(row.hour as usize) {
                Some(bucket) => {
                    bucket.volume += row.volume;
                    bucket.observations += 1;
                }
                None => log::warn!("Ignoring show-up row with hour {}", row.hour),
            }
        }

        let mut peak_hours: Vec<HourlyVolume> = hourly_distribution
            .iter()
            .filter(|h| h.observations > 0)
            .copied()
            .collect();
        sort_by_measure(&mut peak_hours, |h| h.volume as f64, Direction::Descending);
        peak_hours.truncate(PEAK_HOUR_COUNT);

        PassengerVolumeAnalysis {
            date,
            row_count: daily.len(),
            hourly_row_count: hourly.len(),
            total_pax: daily.iter().map(|r| r.pax_count).sum(),
            domestic_pax: pax_of(PassengerType::Domestic),
            international_pax: pax_of(PassengerType::International),
            vs_7day_pct,
            peak_hours,
            hourly_distribution,
        }
    }

    /// The `n` airlines carrying the most passengers on `date`, with their share
    /// of the day's airline total.
    pub fn airline_concentration(&self, date: NaiveDate, n: usize) -> Vec<AirlineShare> {
        let rows: Vec<&AirlinePaxRow> =
            filter_dated(self.store.pax_by_airline(), DateSpan::On(date)).collect();
        let day_total: i64 = rows.iter().map(|r| r.pax_count).sum();

        let mut shares: Vec<AirlineShare> = group_and_aggregate(
            rows,
            |r: &AirlinePaxRow| r.airline.clone(),
            &[
                Aggregation::sum(|r: &AirlinePaxRow| r.pax_count as f64),
                Aggregation::sum(|r: &AirlinePaxRow| r.flight_count as f64),
            ],
        )
        .into_iter()
        .map(|g| {
            let pax_count = g.value(0) as i64;
            let flight_count = g.value(1) as i64;
            AirlineShare {
                airline: g.key,
                pax_count,
                flight_count,
                share_pct: if day_total > 0 {
                    round_to(pax_count as f64 / day_total as f64 * 100.0, 2)
                } else {
                    0.0
                },
            }
        })
        .collect();

        sort_by_measure(&mut shares, |s| s.pax_count as f64, Direction::Descending);
        shares.truncate(n);
        shares
    }
}

#[cfg(test)]
#[path = "passengers_tests.rs"]
mod passengers_tests;
