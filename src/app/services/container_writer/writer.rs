//! Atomic container writing

use super::schema::{ContainerAttributes, build_record_batch, build_schema};
use super::time_axis::encode_time_axis;
use crate::app::models::EpochSeries;
use crate::app::services::column_encoder::EncodedVariable;
use crate::config::{CompressionAlgorithm, ConverterConfig, Provider};
use crate::constants::{CONTAINER_EXTENSION, ROW_GROUP_SIZE};
use crate::{Error, Result};
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_writer::ArrowWriterOptions;
use parquet::file::properties::WriterProperties;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// What happened to one container
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written(PathBuf),
    SkippedExisting(PathBuf),
}

impl WriteOutcome {
    pub fn path(&self) -> &Path {
        match self {
            WriteOutcome::Written(path) | WriteOutcome::SkippedExisting(path) => path,
        }
    }
}

/// File name of a station's container
///
/// The first surviving epoch gets `<station>.parquet`, later ones
/// `<station>_<k>.parquet` with `k` counted from 1.
pub fn container_file_name(station: &str, epoch_index: usize) -> String {
    if epoch_index <= 1 {
        format!("{}.{}", station, CONTAINER_EXTENSION)
    } else {
        format!("{}_{}.{}", station, epoch_index, CONTAINER_EXTENSION)
    }
}

/// Writes containers into one output directory
#[derive(Debug, Clone)]
pub struct ContainerWriter {
    output_dir: PathBuf,
    provider: Provider,
    compression: CompressionAlgorithm,
    row_group_size: usize,
    skip_existing: bool,
}

impl ContainerWriter {
    pub fn new(output_dir: impl Into<PathBuf>, provider: Provider) -> Self {
        Self {
            output_dir: output_dir.into(),
            provider,
            compression: CompressionAlgorithm::Zstd,
            row_group_size: ROW_GROUP_SIZE,
            skip_existing: false,
        }
    }

    /// Writer settings taken from a run configuration
    pub fn from_config(config: &ConverterConfig) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            provider: config.provider,
            compression: config.compression,
            row_group_size: config.row_group_size,
            skip_existing: config.skip_existing,
        }
    }

    pub fn with_compression(mut self, compression: CompressionAlgorithm) -> Self {
        self.compression = compression;
        self
    }

    pub fn with_skip_existing(mut self, skip_existing: bool) -> Self {
        self.skip_existing = skip_existing;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn container_path(&self, station: &str, epoch_index: usize) -> PathBuf {
        self.output_dir
            .join(container_file_name(station, epoch_index))
    }

    fn writer_properties(&self, attributes: &ContainerAttributes) -> WriterProperties {
        WriterProperties::builder()
            .set_compression(self.compression.to_parquet_compression())
            .set_max_row_group_size(self.row_group_size)
            .set_key_value_metadata(Some(attributes.to_key_values()))
            .build()
    }

    /// Write one epoch of one station
    ///
    /// The container is written to a temporary file next to its target and
    /// moved into place once complete.
    pub fn write(
        &self,
        station: &str,
        epoch_index: usize,
        series: &EpochSeries,
        variables: &[EncodedVariable],
        history: &str,
    ) -> Result<WriteOutcome> {
        let target = self.container_path(station, epoch_index);
        if self.skip_existing && target.exists() {
            debug!("Skipping existing container {}", target.display());
            return Ok(WriteOutcome::SkippedExisting(target));
        }

        let time = encode_time_axis(&series.timestamps())?;
        let schema = build_schema(variables);
        let batch = build_record_batch(schema.clone(), time, variables)?;

        let attributes = ContainerAttributes::for_container(
            self.provider,
            station,
            epoch_index,
            &series.epoch,
            variables,
            history,
        );
        let options = ArrowWriterOptions::new()
            .with_properties(self.writer_properties(&attributes))
            .with_skip_arrow_metadata(true);

        std::fs::create_dir_all(&self.output_dir).map_err(|e| {
            Error::io(
                format!("Failed to create output directory {}", self.output_dir.display()),
                e,
            )
        })?;
        let mut temp = NamedTempFile::new_in(&self.output_dir)
            .map_err(|e| Error::io("Failed to create temporary container", e))?;

        let mut writer = ArrowWriter::try_new_with_options(temp.as_file_mut(), schema, options)?;
        writer.write(&batch)?;
        writer.close()?;

        temp.persist(&target).map_err(|e| {
            Error::io(
                format!("Failed to move container into {}", target.display()),
                e.error,
            )
        })?;

        info!(
            "Wrote {} ({} time steps, {} variables)",
            target.display(),
            series.len(),
            variables.len()
        );
        Ok(WriteOutcome::Written(target))
    }
}
