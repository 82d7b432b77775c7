//! Configuration management and validation.
//!
//! Provides the run configuration consumed by the station pipeline and the
//! batch processor, the provider selection, and the container compression
//! choice. The library never reads command-line arguments itself; the CLI
//! builds a [`ConverterConfig`] and hands it over.

use crate::constants::{self, DEFAULT_MANIFEST_NAME, ROW_GROUP_SIZE};
use crate::{Error, Result};
use parquet::basic::{Compression, GzipLevel, ZstdLevel};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Archive providers with their own file layout and column vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// KNMI hourly `uurgeg_<station>_<period>.zip` bundles
    Knmi,
    /// DWD hourly `stundenwerte_<var>_<station>_..._hist.zip` bundles
    Dwd,
}

impl Provider {
    /// Upper-case label used in container descriptions
    pub fn label(&self) -> &'static str {
        match self {
            Provider::Knmi => "KNMI",
            Provider::Dwd => "DWD",
        }
    }

    /// Token that marks the header line of the data entry
    pub fn header_sentinel(&self) -> &'static str {
        match self {
            Provider::Knmi => constants::knmi::HEADER_SENTINEL,
            Provider::Dwd => constants::dwd::HEADER_SENTINEL,
        }
    }

    /// Field delimiter of the data entry
    pub fn delimiter(&self) -> u8 {
        match self {
            Provider::Knmi => constants::knmi::DELIMITER,
            Provider::Dwd => constants::dwd::DELIMITER,
        }
    }

    /// Regex matching archive file names, first group is the station id
    pub fn archive_pattern(&self) -> &'static str {
        match self {
            Provider::Knmi => constants::knmi::ARCHIVE_PATTERN,
            Provider::Dwd => constants::dwd::ARCHIVE_PATTERN,
        }
    }

    /// Provider columns that are never encoded as variables
    pub fn reserved_columns(&self) -> &'static [&'static str] {
        match self {
            Provider::Knmi => constants::knmi::RESERVED_COLUMNS,
            Provider::Dwd => constants::dwd::RESERVED_COLUMNS,
        }
    }

    /// Whether station locations come from a separate catalog file
    pub fn requires_station_catalog(&self) -> bool {
        matches!(self, Provider::Knmi)
    }
}

/// Supported compression algorithms for containers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CompressionAlgorithm {
    /// ZSTD compression - good ratio, fast decompression
    Zstd,
    /// Snappy compression - fastest to write
    Snappy,
    /// GZIP compression - deflate, like zlib-compressed netCDF variables
    Gzip,
    /// LZ4 compression
    Lz4,
    /// No compression
    Uncompressed,
}

impl CompressionAlgorithm {
    /// Convert to the parquet compression codec
    pub fn to_parquet_compression(&self) -> Compression {
        match self {
            CompressionAlgorithm::Zstd => Compression::ZSTD(ZstdLevel::default()),
            CompressionAlgorithm::Snappy => Compression::SNAPPY,
            CompressionAlgorithm::Gzip => Compression::GZIP(GzipLevel::default()),
            CompressionAlgorithm::Lz4 => Compression::LZ4_RAW,
            CompressionAlgorithm::Uncompressed => Compression::UNCOMPRESSED,
        }
    }
}

/// Run configuration for one batch of stations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Provider whose archive layout is read
    pub provider: Provider,

    /// Directory searched recursively for station archives
    pub input_dir: PathBuf,

    /// Directory receiving one container per station epoch
    pub output_dir: PathBuf,

    /// Station catalog CSV (required for KNMI)
    pub station_catalog: Option<PathBuf>,

    /// Restrict the run to these station ids (empty = all discovered)
    pub stations: Vec<String>,

    /// Number of stations processed concurrently
    pub workers: usize,

    /// Compression applied to every container column
    pub compression: CompressionAlgorithm,

    /// Rows per Parquet row group
    pub row_group_size: usize,

    /// Leave existing containers untouched instead of rewriting them
    pub skip_existing: bool,

    /// Fail a station when any epoch bound fell back to processing time
    pub reject_defaulted_epochs: bool,

    /// Fail a station when consecutive epochs overlap
    pub reject_overlapping_epochs: bool,

    /// Manifest file name inside the output directory (`None` disables it)
    pub manifest_name: Option<String>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            provider: Provider::Dwd,
            input_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("output"),
            station_catalog: None,
            stations: Vec::new(),
            workers: num_cpus::get(),
            compression: CompressionAlgorithm::Zstd,
            row_group_size: ROW_GROUP_SIZE,
            skip_existing: false,
            reject_defaulted_epochs: false,
            reject_overlapping_epochs: false,
            manifest_name: Some(DEFAULT_MANIFEST_NAME.to_string()),
        }
    }
}

impl ConverterConfig {
    /// Create a configuration for a provider and directory pair
    pub fn new(provider: Provider, input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            provider,
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    /// Set the station catalog path
    pub fn with_station_catalog(mut self, path: impl Into<PathBuf>) -> Self {
        self.station_catalog = Some(path.into());
        self
    }

    /// Restrict processing to the given station ids
    pub fn with_stations(mut self, stations: Vec<String>) -> Self {
        self.stations = stations;
        self
    }

    /// Set the number of concurrent station workers
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set the container compression
    pub fn with_compression(mut self, compression: CompressionAlgorithm) -> Self {
        self.compression = compression;
        self
    }

    /// Enable or disable skip-if-exists
    pub fn with_skip_existing(mut self, skip: bool) -> Self {
        self.skip_existing = skip;
        self
    }

    /// Reject epochs with defaulted validity bounds
    pub fn with_reject_defaulted_epochs(mut self, reject: bool) -> Self {
        self.reject_defaulted_epochs = reject;
        self
    }

    /// Reject overlapping epochs
    pub fn with_reject_overlapping_epochs(mut self, reject: bool) -> Self {
        self.reject_overlapping_epochs = reject;
        self
    }

    /// Set or disable the manifest file
    pub fn with_manifest_name(mut self, name: Option<String>) -> Self {
        self.manifest_name = name;
        self
    }

    /// Full path of the manifest file, if enabled
    pub fn manifest_path(&self) -> Option<PathBuf> {
        self.manifest_name
            .as_ref()
            .map(|name| self.output_dir.join(name))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(Error::configuration("workers must be at least 1"));
        }

        if self.row_group_size == 0 {
            return Err(Error::configuration("row_group_size must be at least 1"));
        }

        if self.provider.requires_station_catalog() && self.station_catalog.is_none() {
            return Err(Error::configuration(format!(
                "{} archives carry no station metadata; a station catalog is required",
                self.provider.label()
            )));
        }

        if let Some(name) = &self.manifest_name {
            if name.trim().is_empty() || Path::new(name).components().count() != 1 {
                return Err(Error::configuration(format!(
                    "manifest name '{}' must be a plain file name",
                    name
                )));
            }
        }

        debug!(
            "Configuration validated: provider={:?}, workers={}, compression={:?}",
            self.provider, self.workers, self.compression
        );
        Ok(())
    }
}
