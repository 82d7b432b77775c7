//! Conversion engine.
//!
//! Ties discovery, the per-station pipeline, the concurrent batch runner and
//! the manifest together into one conversion run.

pub mod batch;
pub mod manifest;
pub mod station;

#[cfg(test)]
pub mod tests;

pub use batch::{BatchProcessor, BatchSummary, StationFailure};
pub use manifest::{read_manifest, render_manifest, write_manifest};
pub use station::{StationPipeline, StationReport};

use crate::Result;
use crate::app::services::discovery::discover_stations;
use crate::config::ConverterConfig;
use indicatif::ProgressBar;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Run a full conversion described by `config`
///
/// Station failures end up in the summary; only configuration and
/// discovery problems, or a failing manifest write, are returned as errors.
pub async fn run_conversion(
    config: &ConverterConfig,
    cancel: CancellationToken,
    progress: Option<ProgressBar>,
) -> Result<BatchSummary> {
    config.validate()?;

    let stations = discover_stations(&config.input_dir, config.provider, &config.stations)?;
    if stations.is_empty() {
        warn!(
            "No {} archives found in {}",
            config.provider.label(),
            config.input_dir.display()
        );
    } else {
        info!(
            "Discovered {} stations in {}",
            stations.len(),
            config.input_dir.display()
        );
    }

    let mut processor = BatchProcessor::from_config(config)?;
    if let Some(progress) = progress {
        processor = processor.with_progress_bar(progress);
    }
    let summary = processor.run(stations, cancel).await;

    if let Some(manifest) = config.manifest_path() {
        write_manifest(&manifest, &summary.container_paths())?;
    }

    Ok(summary)
}
