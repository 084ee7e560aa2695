//! Aggregation Layer: pure, total data-shaping primitives over typed rows.
//!
//! Nothing here performs I/O or fails; empty input yields empty output.

pub mod filter;
pub mod grouping;
pub mod pivot;
pub mod ranking;
pub mod stats;

pub use filter::{
    filter, filter_dated, filter_segmented, DateSpan, Segmented, SliceFilter, TerminalFilter,
};
pub use grouping::{group_and_aggregate, sum_by, AggOp, Aggregation, GroupSummary};
pub use pivot::{pivot, Cell, PivotTable};
pub use ranking::{bottom_n, rank, sort_by_measure, top_n, Direction, Ranked};
pub use stats::{mean, quantile, round_to, sample_std_dev};
