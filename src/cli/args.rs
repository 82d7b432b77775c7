//! Command-line argument definitions for obsnorm
//!
//! This module defines the CLI interface using the clap derive API. Argument
//! structs turn into a [`ConverterConfig`] so the library never sees clap.

use crate::config::{CompressionAlgorithm, ConverterConfig, Provider};
use crate::constants::DEFAULT_MANIFEST_NAME;
use crate::{Error, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the station archive normalizer
///
/// Converts zipped KNMI and DWD hourly station archives into one Parquet
/// container per station epoch.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "obsnorm",
    version,
    about = "Normalize KNMI and DWD hourly station archives into Parquet containers",
    long_about = "Reads per-station zip archives from KNMI (uurgeg) or DWD (stundenwerte), \
                  merges overlapping archives, splits each station's series at every \
                  relocation and writes one typed, compressed, time-indexed Parquet container \
                  per station epoch, plus a manifest listing every container."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Convert station archives into containers
    Process(ProcessArgs),
    /// Print the layout and attributes of written containers
    Inspect(InspectArgs),
}

/// Arguments for the process command
#[derive(Debug, Clone, Parser)]
pub struct ProcessArgs {
    /// Archive provider
    #[arg(short = 'p', long = "provider", value_enum)]
    pub provider: Provider,

    /// Directory searched recursively for station archives
    #[arg(short = 'i', long = "input", value_name = "DIR")]
    pub input_path: PathBuf,

    /// Directory receiving the containers and the manifest
    #[arg(short = 'o', long = "output", value_name = "DIR")]
    pub output_path: PathBuf,

    /// Station catalog CSV (station_id, station_name, latitude, longitude, elevation)
    ///
    /// Required for KNMI, whose archives carry no station coordinates.
    #[arg(short = 'c', long = "catalog", value_name = "CSV")]
    pub catalog: Option<PathBuf>,

    /// Only process these station ids (comma-separated)
    #[arg(short = 's', long = "stations", value_name = "IDS", value_delimiter = ',')]
    pub stations: Vec<String>,

    /// Number of stations processed concurrently
    ///
    /// Defaults to the number of CPU cores.
    #[arg(short = 'w', long = "workers", value_name = "N")]
    pub workers: Option<usize>,

    /// Compression applied to every container column
    #[arg(long = "compression", value_enum, default_value = "zstd")]
    pub compression: CompressionAlgorithm,

    /// Leave containers that already exist untouched
    #[arg(long = "skip-existing")]
    pub skip_existing: bool,

    /// Fail a station when a validity bound had to fall back to the processing time
    #[arg(long = "reject-defaulted-epochs")]
    pub reject_defaulted_epochs: bool,

    /// Fail a station when two of its epochs overlap
    #[arg(long = "reject-overlapping-epochs")]
    pub reject_overlapping_epochs: bool,

    /// Manifest file name inside the output directory
    #[arg(long = "manifest", value_name = "NAME", default_value = DEFAULT_MANIFEST_NAME)]
    pub manifest: String,

    /// Do not write a manifest
    #[arg(long = "no-manifest", conflicts_with = "manifest")]
    pub no_manifest: bool,

    /// Increase logging verbosity
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Arguments for the inspect command
#[derive(Debug, Clone, Parser)]
pub struct InspectArgs {
    /// Glob pattern selecting containers, e.g. "output/*.parquet"
    #[arg(value_name = "GLOB")]
    pub pattern: String,

    /// Also print every attribute
    #[arg(short = 'a', long = "attributes")]
    pub attributes: bool,

    /// Increase logging verbosity
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Map a `-v` count onto a tracing level
fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

impl ProcessArgs {
    /// Check the arguments before any work starts
    pub fn validate(&self) -> Result<()> {
        if !self.input_path.is_dir() {
            return Err(Error::configuration(format!(
                "Input path is not a directory: {}",
                self.input_path.display()
            )));
        }

        if let Some(catalog) = &self.catalog {
            if !catalog.is_file() {
                return Err(Error::configuration(format!(
                    "Station catalog does not exist: {}",
                    catalog.display()
                )));
            }
        }

        if self.workers == Some(0) {
            return Err(Error::configuration("Number of workers must be at least 1"));
        }

        Ok(())
    }

    /// Build the run configuration
    pub fn to_config(&self) -> ConverterConfig {
        let mut config = ConverterConfig::new(
            self.provider,
            self.input_path.clone(),
            self.output_path.clone(),
        )
        .with_stations(self.stations.clone())
        .with_compression(self.compression)
        .with_skip_existing(self.skip_existing)
        .with_reject_defaulted_epochs(self.reject_defaulted_epochs)
        .with_reject_overlapping_epochs(self.reject_overlapping_epochs)
        .with_manifest_name((!self.no_manifest).then(|| self.manifest.clone()));

        if let Some(catalog) = &self.catalog {
            config = config.with_station_catalog(catalog.clone());
        }
        if let Some(workers) = self.workers {
            config = config.with_workers(workers);
        }
        config
    }

    /// Get the logging level based on verbosity settings
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            level_for(self.verbose)
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl InspectArgs {
    pub fn get_log_level(&self) -> &'static str {
        level_for(self.verbose)
    }
}
