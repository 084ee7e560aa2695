//! Two-dimensional pivot of a measure, with explicit empty cells.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

/// One pivot cell. `NoData` means no row fell into the cell, which is distinct
/// from an observed value of zero. Serializes as `null` / number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "Option<f64>")]
pub enum Cell {
    NoData,
    Value(f64),
}

impl Cell {
    pub fn value(&self) -> Option<f64> {
        match self {
            Cell::NoData => None,
            Cell::Value(v) => Some(*v),
        }
    }
}

impl From<Cell> for Option<f64> {
    fn from(cell: Cell) -> Self {
        cell.value()
    }
}

/// Matrix of mean values indexed by `row_keys` x `col_keys` (both sorted).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotTable {
    pub row_keys: Vec<String>,
    pub col_keys: Vec<String>,
    pub cells: Vec<Vec<Cell>>,
}

impl PivotTable {
    pub fn get(&self, row_key: &str, col_key: &str) -> Cell {
        let r = self.row_keys.iter().position(|k| k == row_key);
        let c = self.col_keys.iter().position(|k| k == col_key);
        match (r, c) {
            (Some(r), Some(c)) => self.cells[r][c],
            _ => Cell::NoData,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.row_keys.is_empty()
    }

    /// Cells rounded to `decimals` places, leaving `NoData` untouched.
    pub fn rounded(mut self, decimals: i32) -> Self {
        for row in &mut self.cells {
            for cell in row.iter_mut() {
                if let Cell::Value(v) = cell {
                    *v = super::stats::round_to(*v, decimals);
                }
            }
        }
        self
    }
}

/// Pivot `rows` into a mean matrix of `value` by `row_key` x `col_key`.
pub fn pivot<'a, R, I, FR, FC, FV>(rows: I, row_key: FR, col_key: FC, value: FV) -> PivotTable
where
    R: 'a,
    I: IntoIterator<Item = &'a R>,
    FR: Fn(&R) -> String,
    FC: Fn(&R) -> String,
    FV: Fn(&R) -> f64,
{
    let mut acc: BTreeMap<(String, String), (f64, usize)> = BTreeMap::new();
    let mut row_keys = BTreeSet::new();
    let mut col_keys = BTreeSet::new();

    for row in rows {
        let (r, c) = (row_key(row), col_key(row));
        row_keys.insert(r.clone());
        col_keys.insert(c.clone());
        let entry = acc.entry((r, c)).or_insert((0.0, 0));
        entry.0 += value(row);
        entry.1 += 1;
    }

    let row_keys: Vec<String> = row_keys.into_iter().collect();
    let col_keys: Vec<String> = col_keys.into_iter().collect();
    let cells = row_keys
        .iter()
        .map(|r| {
            col_keys
                .iter()
                .map(|c| match acc.get(&(r.clone(), c.clone())) {
                    Some(&(sum, n)) if n > 0 => Cell::Value(sum / n as f64),
                    _ => Cell::NoData,
                })
                .collect()
        })
        .collect();

    PivotTable {
        row_keys,
        col_keys,
        cells,
    }
}
