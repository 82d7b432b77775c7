//! Archive reader for zipped station observation bundles
//!
//! Each provider ships one zip per station and period. The zip holds a single
//! data entry whose text starts with free-form comments, followed by a header
//! line carrying the provider's sentinel token, followed by data lines.
//!
//! ## Architecture
//!
//! - [`parser`] - Lazy row scanner ([`RowReader`]) over any byte source
//! - [`provider`] - Provider timestamp rules, column vocabulary and scaling
//! - [`archive`] - Zip handling: data entry selection, metadata entries
//! - [`stats`] - Parsing statistics and row-level errors
//!
//! ## Usage
//!
//! ```rust,no_run
//! use obsnorm::Provider;
//! use obsnorm::app::services::archive_reader::scan_archive;
//!
//! # fn example() -> obsnorm::Result<()> {
//! let mut rows = Vec::new();
//! let scan = scan_archive(
//!     std::path::Path::new("uurgeg_260_2001-2010.zip"),
//!     Provider::Knmi,
//!     |row| rows.push(row),
//! )?;
//! println!("{} rows, {} skipped", scan.stats.rows_parsed, scan.stats.rows_skipped);
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod parser;
pub mod provider;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use archive::{ArchiveScan, MetadataEntry, OpenArchive, scan_archive};
pub use parser::RowReader;
pub use provider::{parse_compact_date, parse_compact_datetime, round_to};
pub use stats::{ParseStats, RowError};
