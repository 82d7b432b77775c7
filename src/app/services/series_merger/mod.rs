//! Series merger
//!
//! Combines the rows of every bundle belonging to one station into one
//! timestamp-keyed [`MergedSeries`](crate::app::models::MergedSeries).
//!
//! The conflict policy is first-wins, never overwrite: a new timestamp is
//! inserted as-is, a known timestamp only gains the fields it was missing.
//! A field present on both sides with different values keeps the earlier
//! value and is counted as a conflict. Callers feed bundles in
//! lexicographic file-name order, which makes the result deterministic.

pub mod merge;
pub mod merger;

#[cfg(test)]
pub mod tests;

pub use merge::{MergeOutcome, MergeStats, merge_rows, merge_series};
pub use merger::{ArchiveMerge, SeriesMerger, merge_archives};
