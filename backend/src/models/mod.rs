pub mod labels;
pub mod macros;
pub mod rows;

use chrono::NaiveDate;

pub use labels::*;
pub use rows::*;

/// A row keyed by calendar date.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

/// A dated row segmented by terminal.
pub trait Record: Dated {
    fn terminal(&self) -> &Terminal;
}
