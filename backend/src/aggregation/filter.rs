//! Row selection by date, terminal set and an optional segment label.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::*;

/// Terminal membership predicate.
///
/// `All` keeps every row, including rollup labels such as `Overall`. `Only`
/// keeps rows whose terminal is in the set; an empty set matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TerminalFilter {
    #[default]
    All,
    Only(BTreeSet<Terminal>),
}

impl TerminalFilter {
    /// Build a filter from raw labels. Empty input means all terminals.
    /// Unknown labels are logged and dropped, so a list of only unknown labels
    /// matches nothing rather than falling back to everything.
    pub fn parse<S: AsRef<str>>(labels: &[S]) -> Self {
        let labels: Vec<&str> = labels
            .iter()
            .map(|s| s.as_ref().trim())
            .filter(|s| !s.is_empty())
            .collect();
        if labels.is_empty() {
            return TerminalFilter::All;
        }

        let mut known = BTreeSet::new();
        for label in labels {
            match Terminal::parse_known(label) {
                Some(terminal) => {
                    known.insert(terminal);
                }
                None => log::warn!(
                    "Unknown terminal label '{}' in filter (expected one of {:?})",
                    label,
                    Terminal::KNOWN
                ),
            }
        }
        TerminalFilter::Only(known)
    }

    /// Parse a comma separated list such as `"T1,T2"`.
    pub fn from_csv(raw: &str) -> Self {
        let labels: Vec<&str> = raw.split(',').collect();
        Self::parse(&labels)
    }

    pub fn only(terminal: Terminal) -> Self {
        TerminalFilter::Only(BTreeSet::from([terminal]))
    }

    pub fn matches(&self, terminal: &Terminal) -> bool {
        match self {
            TerminalFilter::All => true,
            TerminalFilter::Only(set) => set.contains(terminal),
        }
    }

    /// The known terminals this filter admits, in label order.
    pub fn terminals(&self) -> Vec<Terminal> {
        match self {
            TerminalFilter::All => Terminal::KNOWN.iter().map(|t| Terminal::from(*t)).collect(),
            TerminalFilter::Only(set) => set.iter().cloned().collect(),
        }
    }

    /// Display label: `Overall` for multi-terminal selections.
    pub fn label(&self) -> String {
        match self {
            TerminalFilter::Only(set) if set.len() == 1 => set
                .iter()
                .next()
                .map(|t| t.to_string())
                .unwrap_or_default(),
            TerminalFilter::Only(set) if set.is_empty() => "None".to_string(),
            _ => "Overall".to_string(),
        }
    }
}

/// Date predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateSpan {
    #[default]
    Any,
    On(NaiveDate),
    /// Inclusive on both ends.
    Between(NaiveDate, NaiveDate),
}

impl DateSpan {
    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            DateSpan::Any => true,
            DateSpan::On(d) => d == date,
            DateSpan::Between(start, end) => start <= date && date <= end,
        }
    }
}

/// Rows with a secondary dimension label (zone, lane, department, ...).
pub trait Segmented {
    fn segment(&self) -> &str;
}

macro_rules! impl_segmented {
    ($($row:ty => $field:ident),+ $(,)?) => {
        $(
            impl Segmented for $row {
                fn segment(&self) -> &str {
                    &self.$field
                }
            }
        )+
    };
}

impl_segmented!(
    ZoneComplianceRow => zone,
    HourlyComplianceRow => zone,
    SecurityLaneRow => lane,
    VocFeedbackRow => department,
    VocMessageRow => department,
    BaggageBeltRow => belt,
    GateRow => gate,
    BiometricRow => channel,
    SafetyIssueRow => category,
);

/// The predicate set of a slice query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SliceFilter {
    pub dates: DateSpan,
    pub terminals: TerminalFilter,
    /// Exact match on the row's segment label, when set.
    pub segment: Option<String>,
}

impl SliceFilter {
    pub fn on(date: NaiveDate, terminals: &TerminalFilter) -> Self {
        Self {
            dates: DateSpan::On(date),
            terminals: terminals.clone(),
            segment: None,
        }
    }

    pub fn between(start: NaiveDate, end: NaiveDate, terminals: &TerminalFilter) -> Self {
        Self {
            dates: DateSpan::Between(start, end),
            terminals: terminals.clone(),
            segment: None,
        }
    }

    pub fn with_segment(mut self, segment: impl Into<String>) -> Self {
        self.segment = Some(segment.into());
        self
    }

    pub fn matches<R: Record>(&self, row: &R) -> bool {
        self.dates.contains(row.date()) && self.terminals.matches(row.terminal())
    }
}

/// Lazily select rows matching the date and terminal predicates.
pub fn filter<'a, 'p, R: Record>(
    rows: &'a [R],
    predicate: &'p SliceFilter,
) -> impl Iterator<Item = &'a R> + 'p
where
    'a: 'p,
{
    rows.iter().filter(move |row| predicate.matches(*row))
}

/// Like [`filter`], additionally honouring the segment predicate.
pub fn filter_segmented<'a, 'p, R: Record + Segmented>(
    rows: &'a [R],
    predicate: &'p SliceFilter,
) -> impl Iterator<Item = &'a R> + 'p
where
    'a: 'p,
{
    rows.iter().filter(move |row| {
        predicate.matches(*row)
            && predicate
                .segment
                .as_deref()
                .map_or(true, |seg| row.segment() == seg)
    })
}

/// Select rows that carry a date but no terminal.
pub fn filter_dated<'a, R: Dated>(
    rows: &'a [R],
    dates: DateSpan,
) -> impl Iterator<Item = &'a R> + 'a {
    rows.iter().filter(move |row| dates.contains(row.date()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, day).unwrap()
    }

    fn message(day: u32, terminal: &str, department: &str) -> VocMessageRow {
        VocMessageRow {
            date: d(day),
            terminal: Terminal::from(terminal),
            department: department.to_string(),
            sentiment: "negative".to_string(),
            message: "Long queue".to_string(),
            media: "Email".to_string(),
        }
    }

    #[test]
    fn test_terminal_filter_parse() {
        assert_eq!(TerminalFilter::parse::<&str>(&[]), TerminalFilter::All);
        assert_eq!(TerminalFilter::from_csv("T2"), TerminalFilter::only(Terminal::T2));

        let both = TerminalFilter::from_csv("T1, T2");
        assert!(both.matches(&Terminal::T1));
        assert!(both.matches(&Terminal::T2));
        assert!(!both.matches(&Terminal::from("Overall")));
        assert_eq!(both.label(), "Overall");
    }

    #[test]
    fn test_unknown_terminal_matches_nothing() {
        let filter = TerminalFilter::from_csv("T9");
        assert!(!filter.matches(&Terminal::T1));
        assert!(!filter.matches(&Terminal::from("T9")));
        assert!(filter.terminals().is_empty());
    }

    #[test]
    fn test_all_keeps_rollup_rows() {
        let rows = vec![message(24, "Overall", "Security"), message(24, "T1", "Security")];
        let pred = SliceFilter::on(d(24), &TerminalFilter::All);
        assert_eq!(filter(&rows, &pred).count(), 2);
    }

    #[test]
    fn test_filter_by_date_terminal_and_segment() {
        let rows = vec![
            message(24, "T1", "Security"),
            message(24, "T2", "Security"),
            message(23, "T2", "Security"),
            message(24, "T2", "Check-in"),
        ];
        let pred = SliceFilter::on(d(24), &TerminalFilter::only(Terminal::T2));
        assert_eq!(filter(&rows, &pred).count(), 2);

        let pred = pred.with_segment("Check-in");
        let picked: Vec<_> = filter_segmented(&rows, &pred).collect();
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].department, "Check-in");
    }

    #[test]
    fn test_date_span_between_is_inclusive() {
        let span = DateSpan::Between(d(10), d(12));
        assert!(span.contains(d(10)));
        assert!(span.contains(d(12)));
        assert!(!span.contains(d(13)));
    }
}
