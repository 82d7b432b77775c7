//! Splitting a merged series into epoch series

use crate::app::models::{EpochSeries, MergedSeries, StationEpoch};
use chrono::NaiveDateTime;
use std::collections::BTreeSet;
use tracing::debug;

/// Epoch series of one station plus what fell between the cracks
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    /// Non-empty epoch series, ordered like the epochs
    pub series: Vec<EpochSeries>,

    /// Timestamps covered by no epoch
    pub unassigned: usize,

    /// Timestamps assigned to more than one epoch
    pub multiply_assigned: usize,

    /// Epochs that received no rows
    pub empty_epochs: usize,
}

/// Cut `series` into one subset per epoch
///
/// Each subset holds the rows with `valid_from <= t <= valid_to`. Epochs
/// with no rows produce nothing. Timestamps that fit several overlapping
/// epochs are copied into each of them.
pub fn partition_series(series: &MergedSeries, epochs: &[StationEpoch]) -> Partition {
    let mut partition = Partition::default();
    let mut assigned: BTreeSet<NaiveDateTime> = BTreeSet::new();

    for epoch in epochs {
        if epoch.is_inverted() {
            partition.empty_epochs += 1;
            continue;
        }

        let rows: std::collections::BTreeMap<_, _> = series
            .range(epoch.interval())
            .map(|(timestamp, row)| (*timestamp, row.clone()))
            .collect();

        if rows.is_empty() {
            debug!("Epoch starting {} has no rows", epoch.valid_from.value());
            partition.empty_epochs += 1;
            continue;
        }

        for timestamp in rows.keys() {
            if !assigned.insert(*timestamp) {
                partition.multiply_assigned += 1;
            }
        }

        partition.series.push(EpochSeries {
            epoch: epoch.clone(),
            rows,
        });
    }

    partition.unassigned = series.len() - assigned.len();
    partition
}
