//! Column-oriented view of an epoch series

use crate::app::models::{EpochSeries, FieldValue, RawRow};
use chrono::NaiveDateTime;
use std::collections::{BTreeMap, BTreeSet};

/// Columns of an epoch series aligned to its time axis
///
/// `columns[name][i]` is the value of `name` at `timestamps[i]`, `None`
/// where the row did not carry the field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnTable {
    pub timestamps: Vec<NaiveDateTime>,
    pub columns: BTreeMap<String, Vec<Option<FieldValue>>>,
}

impl ColumnTable {
    /// Build the column view from rows, leaving out `excluded` names
    pub fn from_rows(rows: &BTreeMap<NaiveDateTime, RawRow>, excluded: &[&str]) -> Self {
        let names: BTreeSet<&String> = rows
            .values()
            .flat_map(|row| row.keys())
            .filter(|name| !excluded.contains(&name.as_str()))
            .collect();

        let timestamps: Vec<NaiveDateTime> = rows.keys().copied().collect();
        let columns = names
            .into_iter()
            .map(|name| {
                let values = rows.values().map(|row| row.get(name).cloned()).collect();
                (name.clone(), values)
            })
            .collect();

        Self {
            timestamps,
            columns,
        }
    }

    /// Build the column view of an epoch series
    pub fn from_epoch_series(series: &EpochSeries, excluded: &[&str]) -> Self {
        Self::from_rows(&series.rows, excluded)
    }

    /// Back to the row view; absent entries are omitted
    pub fn to_rows(&self) -> BTreeMap<NaiveDateTime, RawRow> {
        self.timestamps
            .iter()
            .enumerate()
            .map(|(index, timestamp)| {
                let row: RawRow = self
                    .columns
                    .iter()
                    .filter_map(|(name, values)| {
                        values[index].clone().map(|value| (name.clone(), value))
                    })
                    .collect();
                (*timestamp, row)
            })
            .collect()
    }

    /// Number of time steps
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn column(&self, name: &str) -> Option<&[Option<FieldValue>]> {
        self.columns.get(name).map(Vec::as_slice)
    }
}
