//! Per-station pipeline
//!
//! Bundles -> merged series -> epochs -> encoded columns -> containers.
//! Stages run strictly in sequence; everything a station needs is owned by
//! the call, so stations can run side by side without sharing state.

use crate::app::services::archive_reader::{MetadataEntry, ParseStats};
use crate::app::services::column_encoder::encode_epoch;
use crate::app::services::container_writer::{ContainerWriter, WriteOutcome};
use crate::app::services::discovery::StationArchives;
use crate::app::services::epoch_partitioner::{
    EpochPolicy, deduplicate_epochs, partition_series, validate_epochs,
};
use crate::app::services::metadata_reader::{StationCatalog, read_metadata_entries};
use crate::app::services::series_merger::{MergeStats, merge_archives};
use crate::config::{ConverterConfig, Provider};
use crate::{Error, RawMetadataRecord, Result};
use chrono::{NaiveDateTime, Utc};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// What one station run produced
#[derive(Debug, Clone, Default)]
pub struct StationReport {
    pub station: String,

    /// Bundles read, in merge order
    pub archives: usize,

    /// One entry per surviving epoch
    pub outputs: Vec<WriteOutcome>,

    /// Row parsing statistics over all bundles
    pub parse_stats: ParseStats,

    /// Merge statistics over all bundles
    pub merge_stats: MergeStats,

    /// Epochs left after deduplication
    pub epochs: usize,

    /// Timestamps covered by no epoch
    pub unassigned: usize,

    /// Epochs that produced no container
    pub empty_epochs: usize,

    /// Irregularities that did not stop the station
    pub warnings: Vec<String>,
}

impl StationReport {
    fn new(station: &str, archives: usize) -> Self {
        Self {
            station: station.to_string(),
            archives,
            ..Self::default()
        }
    }

    /// Paths of every container this station owns, written or kept
    pub fn container_paths(&self) -> Vec<PathBuf> {
        self.outputs
            .iter()
            .map(|outcome| outcome.path().to_path_buf())
            .collect()
    }

    /// Number of containers actually written in this run
    pub fn written(&self) -> usize {
        self.outputs
            .iter()
            .filter(|outcome| matches!(outcome, WriteOutcome::Written(_)))
            .count()
    }
}

/// Runs the station pipeline with one run configuration
#[derive(Debug, Clone)]
pub struct StationPipeline {
    provider: Provider,
    policy: EpochPolicy,
    catalog: Option<Arc<StationCatalog>>,
    writer: ContainerWriter,
}

impl StationPipeline {
    pub fn new(config: &ConverterConfig, catalog: Option<Arc<StationCatalog>>) -> Self {
        Self {
            provider: config.provider,
            policy: EpochPolicy {
                reject_defaulted: config.reject_defaulted_epochs,
                reject_overlapping: config.reject_overlapping_epochs,
            },
            catalog,
            writer: ContainerWriter::from_config(config),
        }
    }

    /// Build a pipeline, loading the station catalog when the provider needs it
    pub fn from_config(config: &ConverterConfig) -> Result<Self> {
        let catalog = match &config.station_catalog {
            Some(path) => Some(Arc::new(StationCatalog::load(path)?)),
            None if config.provider.requires_station_catalog() => {
                return Err(Error::configuration(format!(
                    "{} processing needs a station catalog",
                    config.provider.label()
                )));
            }
            None => None,
        };
        Ok(Self::new(config, catalog))
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    /// Process one station, tagging any failure with its id
    pub fn run(&self, station: &StationArchives) -> Result<StationReport> {
        let now = Utc::now().naive_utc();
        self.run_at(station, now)
            .map_err(|e| Error::station(&station.station, e))
    }

    /// Process one station with a fixed processing time
    ///
    /// `now` replaces every unparsable or absent validity bound and is
    /// stamped into the `history` attribute.
    pub fn run_at(&self, station: &StationArchives, now: NaiveDateTime) -> Result<StationReport> {
        let id = station.station.as_str();
        let mut report = StationReport::new(id, station.archives.len());

        let merged = merge_archives(&station.archives, self.provider)?;
        report.parse_stats = merged.parse_stats;
        report.merge_stats = merged.outcome.stats;
        let series = merged.outcome.series;

        if series.is_empty() {
            info!("Station {}: no observations, nothing to write", id);
            return Ok(report);
        }

        let records = self.metadata_records(id, &merged.metadata, now)?;
        let epochs = deduplicate_epochs(records);
        if epochs.is_empty() {
            return Err(Error::NoEpochs {
                station: id.to_string(),
                rows: series.len(),
            });
        }
        report.epochs = epochs.len();
        report.warnings = validate_epochs(id, &epochs, self.policy)?;

        let partition = partition_series(&series, &epochs);
        report.unassigned = partition.unassigned;
        report.empty_epochs = partition.empty_epochs;
        if partition.unassigned > 0 {
            let message = format!(
                "{} of {} timestamps fall outside every epoch",
                partition.unassigned,
                series.len()
            );
            warn!("Station {}: {}", id, message);
            report.warnings.push(message);
        }

        let history = format!("Created {}", now.format("%Y-%m-%d %H:%M:%S"));
        for (index, epoch_series) in partition.series.iter().enumerate() {
            let variables = encode_epoch(epoch_series, self.provider);
            debug!(
                "Station {}: epoch {} has {} rows and {} variables",
                id,
                index + 1,
                epoch_series.len(),
                variables.len()
            );
            let outcome = self
                .writer
                .write(id, index + 1, epoch_series, &variables, &history)?;
            report.outputs.push(outcome);
        }

        info!(
            "Station {}: {} bundles, {} timestamps ({:.1}% of lines usable), {} containers",
            id,
            report.archives,
            series.len(),
            report.parse_stats.success_rate(),
            report.outputs.len()
        );
        Ok(report)
    }

    fn metadata_records(
        &self,
        station: &str,
        entries: &[MetadataEntry],
        now: NaiveDateTime,
    ) -> Result<Vec<RawMetadataRecord>> {
        match self.provider {
            Provider::Dwd => read_metadata_entries(entries, station, now),
            Provider::Knmi => {
                let catalog = self.catalog.as_ref().ok_or_else(|| {
                    Error::configuration("KNMI processing needs a station catalog")
                })?;
                Ok(catalog.records_for(station, now))
            }
        }
    }
}
