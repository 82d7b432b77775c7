//! Metadata deduplication and epoch partitioning
//!
//! Station metadata arrives as loose rows, often repeated across bundles.
//! [`deduplicate_epochs`] collapses them into an ordered list of distinct
//! [`StationEpoch`](crate::app::models::StationEpoch)s keyed by `valid_from`,
//! and [`partition_series`] cuts a merged series into one
//! [`EpochSeries`](crate::app::models::EpochSeries) per epoch using the
//! closed interval `valid_from <= t <= valid_to`.

pub mod deduplication;
pub mod partition;

#[cfg(test)]
pub mod tests;

pub use deduplication::{EpochPolicy, deduplicate_epochs, find_overlaps, validate_epochs};
pub use partition::{Partition, partition_series};
