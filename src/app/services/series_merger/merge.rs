//! Pure first-wins merge functions

use crate::app::models::{MergedSeries, RawRow};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// Counters describing a merge
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeStats {
    /// Timestamps seen for the first time
    pub rows_inserted: usize,

    /// Timestamps that were already present
    pub rows_merged: usize,

    /// Fields added to an existing row
    pub fields_filled: usize,

    /// Fields present on both sides with differing values, per variable
    pub conflicts: BTreeMap<String, usize>,
}

impl MergeStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of conflicting fields
    pub fn conflict_count(&self) -> usize {
        self.conflicts.values().sum()
    }

    pub fn absorb(&mut self, other: MergeStats) {
        self.rows_inserted += other.rows_inserted;
        self.rows_merged += other.rows_merged;
        self.fields_filled += other.fields_filled;
        for (field, count) in other.conflicts {
            *self.conflicts.entry(field).or_default() += count;
        }
    }

    pub(crate) fn record_conflicts(&mut self, fields: Vec<String>) {
        for field in fields {
            *self.conflicts.entry(field).or_default() += 1;
        }
    }
}

/// Result of merging one series into another
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeOutcome {
    pub series: MergedSeries,
    pub stats: MergeStats,
}

/// Merge two rows for the same timestamp, `base` taking precedence
///
/// Returns the merged row and the names of fields present on both sides
/// with different values.
pub fn merge_rows(base: &RawRow, incoming: &RawRow) -> (RawRow, Vec<String>) {
    let mut merged = base.clone();
    let mut conflicts = Vec::new();

    for (name, value) in incoming {
        match base.get(name) {
            None => {
                merged.insert(name.clone(), value.clone());
            }
            Some(existing) if existing != value => conflicts.push(name.clone()),
            Some(_) => {}
        }
    }

    (merged, conflicts)
}

/// Merge `incoming` into `base` without modifying either
///
/// Timestamps only in `incoming` are inserted, shared timestamps go through
/// [`merge_rows`] with `base` first.
pub fn merge_series(base: &MergedSeries, incoming: &MergedSeries) -> MergeOutcome {
    let mut rows = base.clone().into_inner();
    let mut stats = MergeStats::new();

    for (timestamp, row) in incoming.iter() {
        match rows.entry(*timestamp) {
            Entry::Vacant(slot) => {
                slot.insert(row.clone());
                stats.rows_inserted += 1;
            }
            Entry::Occupied(mut slot) => {
                let before = slot.get().len();
                let (merged, conflicts) = merge_rows(slot.get(), row);
                stats.rows_merged += 1;
                stats.fields_filled += merged.len() - before;
                stats.record_conflicts(conflicts);
                slot.insert(merged);
            }
        }
    }

    MergeOutcome {
        series: MergedSeries::from(rows),
        stats,
    }
}
