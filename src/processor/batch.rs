//! Concurrent station processing
//!
//! Each station runs on the blocking pool; at most `workers` stations are in
//! flight. A failing station is recorded and the rest carry on.

use super::station::{StationPipeline, StationReport};
use crate::Result;
use crate::app::services::discovery::StationArchives;
use crate::config::ConverterConfig;
use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// A station that did not complete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationFailure {
    pub station: String,
    pub reason: String,
}

/// Result of a batch run
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    /// Completed stations, ordered by id
    pub reports: Vec<StationReport>,

    /// Failed stations, ordered by id
    pub failures: Vec<StationFailure>,

    /// Stations never started because the run was cancelled
    pub cancelled: Vec<String>,

    pub elapsed: Duration,
}

impl BatchSummary {
    /// Whether every station completed
    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && self.cancelled.is_empty()
    }

    /// Every container of every completed station, sorted
    pub fn container_paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self
            .reports
            .iter()
            .flat_map(StationReport::container_paths)
            .collect();
        paths.sort();
        paths
    }

    pub fn containers_written(&self) -> usize {
        self.reports.iter().map(StationReport::written).sum()
    }

    pub fn rows_parsed(&self) -> usize {
        self.reports
            .iter()
            .map(|report| report.parse_stats.rows_parsed)
            .sum()
    }

    pub fn rows_skipped(&self) -> usize {
        self.reports
            .iter()
            .map(|report| report.parse_stats.rows_skipped)
            .sum()
    }

    pub fn warning_count(&self) -> usize {
        self.reports.iter().map(|report| report.warnings.len()).sum()
    }
}

enum StationOutcome {
    Completed(StationReport),
    Failed(String),
    Cancelled,
}

/// Runs the station pipeline over many stations
#[derive(Clone)]
pub struct BatchProcessor {
    pipeline: Arc<StationPipeline>,
    workers: usize,
    progress: Option<ProgressBar>,
}

impl BatchProcessor {
    pub fn new(pipeline: StationPipeline, workers: usize) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            workers: workers.max(1),
            progress: None,
        }
    }

    pub fn from_config(config: &ConverterConfig) -> Result<Self> {
        Ok(Self::new(StationPipeline::from_config(config)?, config.workers))
    }

    /// Report progress on an existing bar; its length is set by [`Self::run`]
    pub fn with_progress_bar(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Process `stations`, stopping to start new ones once `cancel` fires
    ///
    /// Stations already running finish their current container; their
    /// temp files never become visible if the process dies mid-write.
    pub async fn run(
        &self,
        stations: Vec<StationArchives>,
        cancel: CancellationToken,
    ) -> BatchSummary {
        let start = Instant::now();
        let total = stations.len();
        info!(
            "Processing {} stations with {} workers",
            total, self.workers
        );

        if let Some(progress) = &self.progress {
            progress.set_length(total as u64);
        }

        let outcomes: Vec<(String, StationOutcome)> = stream::iter(stations)
            .map(|station| {
                let pipeline = Arc::clone(&self.pipeline);
                let cancel = cancel.clone();
                async move {
                    let id = station.station.clone();
                    if cancel.is_cancelled() {
                        return (id, StationOutcome::Cancelled);
                    }

                    let outcome = match task::spawn_blocking(move || pipeline.run(&station)).await
                    {
                        Ok(Ok(report)) => StationOutcome::Completed(report),
                        Ok(Err(e)) => StationOutcome::Failed(e.to_string()),
                        Err(e) => StationOutcome::Failed(format!("worker task failed: {}", e)),
                    };
                    (id, outcome)
                }
            })
            .buffer_unordered(self.workers)
            .inspect(|(id, _)| {
                if let Some(progress) = &self.progress {
                    progress.set_message(format!("station {}", id));
                    progress.inc(1);
                }
            })
            .collect()
            .await;

        let mut summary = BatchSummary::default();
        for (station, outcome) in outcomes {
            match outcome {
                StationOutcome::Completed(report) => summary.reports.push(report),
                StationOutcome::Failed(reason) => {
                    error!("{}", reason);
                    summary.failures.push(StationFailure { station, reason });
                }
                StationOutcome::Cancelled => summary.cancelled.push(station),
            }
        }
        summary.reports.sort_by(|a, b| a.station.cmp(&b.station));
        summary.failures.sort_by(|a, b| a.station.cmp(&b.station));
        summary.cancelled.sort();
        summary.elapsed = start.elapsed();

        if let Some(progress) = &self.progress {
            progress.finish_with_message(format!(
                "{} stations done, {} failed",
                summary.reports.len(),
                summary.failures.len()
            ));
        }
        if !summary.cancelled.is_empty() {
            warn!(
                "Cancelled before {} of {} stations started",
                summary.cancelled.len(),
                total
            );
        }
        info!(
            "Batch complete in {:.2}s: {} stations, {} containers written, {} failures",
            summary.elapsed.as_secs_f64(),
            summary.reports.len(),
            summary.containers_written(),
            summary.failures.len()
        );

        summary
    }
}
