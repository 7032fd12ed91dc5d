// src/analysis/table.rs

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Rows `R` × columns `C` of numbers, any cell possibly absent.
///
/// Built once through [`WideTableBuilder`] and read-only afterwards. Rows
/// and columns are kept in key order, so two tables built from the same
/// cells are equal no matter the insertion order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WideTable<R: Ord, C: Ord> {
    columns: Vec<C>,
    rows: BTreeMap<R, BTreeMap<C, f64>>,
}

#[derive(Debug)]
pub struct WideTableBuilder<R: Ord, C: Ord> {
    columns: BTreeSet<C>,
    rows: BTreeMap<R, BTreeMap<C, f64>>,
}

impl<R: Ord, C: Ord> Default for WideTableBuilder<R, C> {
    fn default() -> Self {
        Self {
            columns: BTreeSet::new(),
            rows: BTreeMap::new(),
        }
    }
}

impl<R: Ord + Clone, C: Ord + Clone> WideTableBuilder<R, C> {
    /// Declare a column even if no cell ends up in it.
    pub fn column(&mut self, column: C) -> &mut Self {
        self.columns.insert(column);
        self
    }

    /// Set one cell. A second value for the same cell replaces the first.
    pub fn insert(&mut self, row: R, column: C, value: f64) -> &mut Self {
        self.columns.insert(column.clone());
        self.rows.entry(row).or_default().insert(column, value);
        self
    }

    /// Add a whole column, one cell per `(row, value)`.
    pub fn merge_column<I>(&mut self, column: C, cells: I) -> &mut Self
    where
        I: IntoIterator<Item = (R, f64)>,
    {
        self.columns.insert(column.clone());
        for (row, value) in cells {
            self.rows
                .entry(row)
                .or_default()
                .insert(column.clone(), value);
        }
        self
    }

    pub fn build(self) -> WideTable<R, C> {
        WideTable {
            columns: self.columns.into_iter().collect(),
            rows: self.rows,
        }
    }
}

impl<R: Ord + Clone, C: Ord + Clone> WideTable<R, C> {
    pub fn builder() -> WideTableBuilder<R, C> {
        WideTableBuilder::default()
    }

    pub fn get(&self, row: &R, column: &C) -> Option<f64> {
        self.rows.get(row)?.get(column).copied()
    }

    pub fn row(&self, row: &R) -> Option<&BTreeMap<C, f64>> {
        self.rows.get(row)
    }

    /// Present cells of one column, keyed by row.
    pub fn column(&self, column: &C) -> BTreeMap<R, f64> {
        self.rows
            .iter()
            .filter_map(|(r, cells)| cells.get(column).map(|v| (r.clone(), *v)))
            .collect()
    }

    pub fn columns(&self) -> &[C] {
        &self.columns
    }

    pub fn row_keys(&self) -> impl Iterator<Item = &R> {
        self.rows.keys()
    }

    /// Every row with one slot per column, in column order.
    pub fn dense_rows(&self) -> impl Iterator<Item = (&R, Vec<Option<f64>>)> {
        self.rows.iter().map(move |(r, cells)| {
            (
                r,
                self.columns.iter().map(|c| cells.get(c).copied()).collect(),
            )
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Same cells with rows and columns swapped.
    pub fn transpose(&self) -> WideTable<C, R> {
        let mut builder = WideTable::builder();
        for (r, cells) in &self.rows {
            builder.column(r.clone());
            for (c, v) in cells {
                builder.insert(c.clone(), r.clone(), *v);
            }
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> WideTable<&'static str, u16> {
        let mut b = WideTable::builder();
        b.insert("Utah Jazz", 2011, 0.2)
            .insert("Miami Heat", 2010, 0.3)
            .insert("Utah Jazz", 2010, 0.1)
            .column(2012);
        b.build()
    }

    #[test]
    fn cells_are_keyed_not_positional() {
        let t = sample();
        assert_eq!(t.columns(), &[2010, 2011, 2012]);
        assert_eq!(t.row_keys().copied().collect::<Vec<_>>(), ["Miami Heat", "Utah Jazz"]);
        assert_eq!(t.get(&"Utah Jazz", &2010), Some(0.1));
        assert_eq!(t.get(&"Miami Heat", &2011), None);
        assert_eq!(t.column(&2012).len(), 0);
    }

    #[test]
    fn dense_rows_fill_gaps() {
        let t = sample();
        let rows: Vec<_> = t.dense_rows().collect();
        assert_eq!(rows[0].1, vec![Some(0.3), None, None]);
        assert_eq!(rows[1].1, vec![Some(0.1), Some(0.2), None]);
    }

    #[test]
    fn transpose_swaps_axes() {
        let t = sample().transpose();
        assert_eq!(t.columns(), &["Miami Heat", "Utah Jazz"]);
        assert_eq!(t.get(&2011, &"Utah Jazz"), Some(0.2));
        assert_eq!(t.len(), 2);
    }
}
