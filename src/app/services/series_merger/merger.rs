//! Incremental merging of streamed bundle rows

use super::merge::{MergeOutcome, MergeStats, merge_rows};
use crate::app::models::{MergedSeries, RawRow, TimedRow};
use crate::app::services::archive_reader::{MetadataEntry, ParseStats, scan_archive};
use crate::config::Provider;
use crate::Result;
use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::path::PathBuf;
use tracing::{debug, info};

/// Accumulates rows into a merged series as they are read
///
/// Duplicate timestamps, whether inside one bundle or across bundles,
/// follow the same first-wins policy as [`merge_rows`].
#[derive(Debug, Default)]
pub struct SeriesMerger {
    rows: BTreeMap<NaiveDateTime, RawRow>,
    stats: MergeStats,
}

impl SeriesMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one row
    pub fn absorb_row(&mut self, row: TimedRow) {
        match self.rows.entry(row.timestamp) {
            Entry::Vacant(slot) => {
                slot.insert(row.row);
                self.stats.rows_inserted += 1;
            }
            Entry::Occupied(mut slot) => {
                let before = slot.get().len();
                let (merged, conflicts) = merge_rows(slot.get(), &row.row);
                if !conflicts.is_empty() {
                    debug!(
                        "Conflicting values at {} for {:?}, keeping first",
                        row.timestamp, conflicts
                    );
                }
                self.stats.rows_merged += 1;
                self.stats.fields_filled += merged.len() - before;
                self.stats.record_conflicts(conflicts);
                slot.insert(merged);
            }
        }
    }

    /// Add a sequence of rows in order
    pub fn absorb<I>(&mut self, rows: I)
    where
        I: IntoIterator<Item = TimedRow>,
    {
        for row in rows {
            self.absorb_row(row);
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn finish(self) -> MergeOutcome {
        MergeOutcome {
            series: MergedSeries::from(self.rows),
            stats: self.stats,
        }
    }
}

/// Everything read from one station's bundles
#[derive(Debug, Clone, Default)]
pub struct ArchiveMerge {
    pub outcome: MergeOutcome,
    pub parse_stats: ParseStats,
    pub metadata: Vec<MetadataEntry>,
}

/// Read a station's bundles in the given order and merge their rows
///
/// Metadata entries are collected in the same order. Any bundle failing
/// at the archive level fails the whole station.
pub fn merge_archives(archives: &[PathBuf], provider: Provider) -> Result<ArchiveMerge> {
    let mut merger = SeriesMerger::new();
    let mut parse_stats = ParseStats::new();
    let mut metadata = Vec::new();

    for path in archives {
        let scan = scan_archive(path, provider, |row| merger.absorb_row(row))?;
        debug!(
            "{}: {} rows, {} skipped",
            path.display(),
            scan.stats.rows_parsed,
            scan.stats.rows_skipped
        );
        parse_stats.absorb(scan.stats);
        metadata.extend(scan.metadata);
    }

    let outcome = merger.finish();
    let conflicts = outcome.stats.conflict_count();
    if conflicts > 0 {
        info!(
            "Merged {} bundles into {} timestamps ({} conflicting fields kept first)",
            archives.len(),
            outcome.series.len(),
            conflicts
        );
    }

    Ok(ArchiveMerge {
        outcome,
        parse_stats,
        metadata,
    })
}
