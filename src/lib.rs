//! obsnorm library
//!
//! Normalizes per-station ground weather archives (KNMI hourly `uurgeg`
//! bundles, DWD hourly `stundenwerte` bundles) into typed, compressed,
//! time-indexed Parquet containers.
//!
//! This library provides tools for:
//! - Reading zipped station archives, locating the header among comment noise
//! - Reading station metadata catalogs with explicit validity windows
//! - Merging overlapping archives with a deterministic first-wins policy
//! - Splitting a station series into location-stable epochs
//! - Inferring column types and fill values from full-column scans
//! - Writing self-describing containers with per-variable attributes
//! - Running many stations concurrently with per-station failure isolation

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod archive_reader;
        pub mod column_encoder;
        pub mod container_writer;
        pub mod discovery;
        pub mod epoch_partitioner;
        pub mod metadata_reader;
        pub mod series_merger;
    }
}

pub mod processor;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{
    DateBound, EpochSeries, FieldValue, Location, MergedSeries, RawMetadataRecord, RawRow,
    StationEpoch, TimedRow,
};
pub use config::{ConverterConfig, Provider};

/// Result type alias for obsnorm operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for archive normalization
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Zip container could not be opened or read
    #[error("Archive error in '{path}': {message}")]
    Zip {
        path: String,
        message: String,
        #[source]
        source: zip::result::ZipError,
    },

    /// Delimited text could not be read
    #[error("CSV parsing error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Data entry never contained the provider's header sentinel
    #[error("Header sentinel '{sentinel}' not found in archive '{path}'")]
    MissingHeader { path: String, sentinel: String },

    /// Archive does not hold exactly one data entry
    #[error("Unexpected archive layout in '{path}': {message}")]
    ArchiveLayout { path: String, message: String },

    /// Metadata row with a location field that does not parse
    #[error("Invalid {field} '{value}' in station metadata for {station}")]
    MetadataLocation {
        station: String,
        field: String,
        value: String,
    },

    /// Station has observations but no validity epochs
    #[error("No validity epochs derived for station {station} with {rows} data rows")]
    NoEpochs { station: String, rows: usize },

    /// An epoch bound fell back to processing time and the run rejects that
    #[error("Epoch starting {valid_from} of station {station} has a defaulted validity bound")]
    DefaultedEpoch { station: String, valid_from: String },

    /// Consecutive epochs overlap and the run rejects that
    #[error("Epochs of station {station} overlap: {first} ends after {second} starts")]
    OverlappingEpochs {
        station: String,
        first: String,
        second: String,
    },

    /// Container could not be written
    #[error("Container writing error: {message}")]
    ContainerWriting {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Data validation error
    #[error("Data validation error: {message}")]
    DataValidation { message: String },

    /// Directory traversal error
    #[error("Directory traversal error: {message}")]
    DirectoryTraversal {
        message: String,
        #[source]
        source: walkdir::Error,
    },

    /// A station pipeline failed; wraps the cause with the station identity
    #[error("Station {station} failed: {source}")]
    Station {
        station: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a zip error with the archive path attached
    pub fn zip(
        path: impl Into<String>,
        message: impl Into<String>,
        source: zip::result::ZipError,
    ) -> Self {
        Self::Zip {
            path: path.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a missing header error
    pub fn missing_header(path: impl Into<String>, sentinel: impl Into<String>) -> Self {
        Self::MissingHeader {
            path: path.into(),
            sentinel: sentinel.into(),
        }
    }

    /// Create an archive layout error
    pub fn archive_layout(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ArchiveLayout {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a metadata location error
    pub fn metadata_location(
        station: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::MetadataLocation {
            station: station.into(),
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a container writing error
    pub fn container_writing(
        message: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::ContainerWriting {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Attach a station identity to an error
    ///
    /// Errors that already carry a station wrapper are returned unchanged.
    pub fn station(station: impl Into<String>, source: Error) -> Self {
        match source {
            Self::Station { .. } => source,
            other => Self::Station {
                station: station.into(),
                source: Box::new(other),
            },
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(error: zip::result::ZipError) -> Self {
        Self::Zip {
            path: "unknown".to_string(),
            message: "Zip archive could not be read".to_string(),
            source: error,
        }
    }
}

impl From<parquet::errors::ParquetError> for Error {
    fn from(error: parquet::errors::ParquetError) -> Self {
        Self::ContainerWriting {
            message: "Parquet operation failed".to_string(),
            source: Box::new(error),
        }
    }
}

impl From<arrow::error::ArrowError> for Error {
    fn from(error: arrow::error::ArrowError) -> Self {
        Self::ContainerWriting {
            message: "Arrow batch construction failed".to_string(),
            source: Box::new(error),
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(error: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: "Directory traversal failed".to_string(),
            source: error,
        }
    }
}
