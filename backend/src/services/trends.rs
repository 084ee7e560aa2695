//! Multi-day trend read models.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};

use crate::aggregation::{filter, round_to, sort_by_measure, Direction, SliceFilter, TerminalFilter};
use crate::algorithms::guarded_ratio;
use crate::models::{PassengerVolumeRow, Terminal};
use crate::routes::trends::*;

use super::voc::terminal_feedback;
use super::ReasoningEngine;

const RECENT_MESSAGE_LIMIT: usize = 10;

/// `end - days` through `end`, both inclusive.
fn lookback(days: u32, end: NaiveDate, terminals: &TerminalFilter) -> SliceFilter {
    let start = end.checked_sub_days(Days::new(u64::from(days))).unwrap_or(end);
    SliceFilter::between(start, end, terminals)
}

fn group_label(row: &PassengerVolumeRow, group_by: PassengerGroupBy) -> Option<String> {
    match group_by {
        PassengerGroupBy::PassengerType => Some(row.passenger_type.to_string()),
        PassengerGroupBy::Terminal => Some(row.terminal.to_string()),
        PassengerGroupBy::Flow => Some(row.flow.to_string()),
        PassengerGroupBy::None => None,
    }
}

impl ReasoningEngine {
    /// Daily passenger counts, optionally split by one dimension.
    pub fn passenger_trends(
        &self,
        days: u32,
        end: NaiveDate,
        terminals: &TerminalFilter,
        group_by: PassengerGroupBy,
    ) -> PassengerTrends {
        let window = lookback(days, end, terminals);
        let mut totals: BTreeMap<(NaiveDate, Option<String>), i64> = BTreeMap::new();
        for row in filter(self.store.pax_daily(), &window) {
            *totals
                .entry((row.date, group_label(row, group_by)))
                .or_insert(0) += row.pax_count;
        }

        PassengerTrends {
            group_by,
            data: totals
                .into_iter()
                .map(|((date, group), pax_count)| PassengerTrendPoint {
                    date,
                    group,
                    pax_count,
                })
                .collect(),
        }
    }

    /// Biometric adoption per date and terminal, with the channel split on `end`.
    pub fn biometric_trends(&self, days: u32, end: NaiveDate, terminals: &TerminalFilter) -> BiometricTrends {
        let window = lookback(days, end, terminals);

        let mut by_day: BTreeMap<(NaiveDate, Terminal), (i64, i64, i64)> = BTreeMap::new();
        let mut channels: BTreeMap<String, i64> = BTreeMap::new();
        for row in filter(self.store.biometric(), &window) {
            let entry = by_day
                .entry((row.date, row.terminal.clone()))
                .or_insert((0, 0, 0));
            entry.0 += row.total_eligible_pax;
            entry.1 += row.biometric_registrations;
            entry.2 += row.successful_boardings;
            if row.date == end {
                *channels.entry(row.channel.clone()).or_insert(0) += row.biometric_registrations;
            }
        }

        let daily = by_day
            .into_iter()
            .map(|((date, terminal), (eligible, registrations, boardings))| BiometricDaily {
                date,
                terminal,
                adoption_pct: if eligible > 0 {
                    round_to(registrations as f64 / eligible as f64 * 100.0, 1)
                } else {
                    0.0
                },
                success_rate: round_to(
                    guarded_ratio(boardings as f64, registrations as f64) * 100.0,
                    1,
                ),
                total_eligible: eligible,
                registrations,
            })
            .collect();

        BiometricTrends {
            daily,
            channels: channels
                .into_iter()
                .map(|(channel, registrations)| ChannelRegistrations {
                    channel,
                    registrations,
                })
                .collect(),
        }
    }

    /// Feedback per day, terminal and media, plus the latest messages on `end`.
    pub fn voc_trends(&self, days: u32, end: NaiveDate, terminals: &TerminalFilter) -> VocTrends {
        let window = lookback(days, end, terminals);
        let rows: Vec<_> = filter(self.store.voc_feedback(), &window).collect();

        let mut by_date: BTreeMap<NaiveDate, (i64, i64)> = BTreeMap::new();
        let mut by_media: BTreeMap<&str, i64> = BTreeMap::new();
        for row in &rows {
            let day = by_date.entry(row.date).or_insert((0, 0));
            day.0 += row.complaints;
            day.1 += row.compliments;
            *by_media.entry(row.media_type.as_str()).or_insert(0) += row.total_feedback;
        }

        let daily = by_date
            .into_iter()
            .map(|(date, (complaints, compliments))| VocDaily {
                date,
                complaints,
                compliments,
                ratio: round_to(guarded_ratio(compliments as f64, complaints as f64), 2),
            })
            .collect();

        let mut media: Vec<MediaFeedback> = by_media
            .into_iter()
            .map(|(media_type, total_feedback)| MediaFeedback {
                media_type: media_type.to_string(),
                total_feedback,
            })
            .collect();
        sort_by_measure(&mut media, |m| m.total_feedback as f64, Direction::Descending);

        let latest = self.day(end, terminals);
        let recent_messages = filter(self.store.voc_messages(), &latest)
            .take(RECENT_MESSAGE_LIMIT)
            .map(|m| RecentMessage {
                terminal: m.terminal.clone(),
                department: m.department.clone(),
                media: m.media.clone(),
                message: m.message.clone(),
                sentiment: m.sentiment.clone(),
            })
            .collect();

        VocTrends {
            daily,
            by_terminal: terminal_feedback(rows.iter().copied()),
            by_media: media,
            recent_messages,
        }
    }
}

#[cfg(test)]
#[path = "trends_tests.rs"]
mod trends_tests;
