//! Container writer
//!
//! Writes one Parquet container per (station, epoch). The row axis is the
//! growable `time` dimension, stored as integer minutes since
//! `2010-01-01 00:00:00` (Gregorian calendar). Every encoded variable becomes
//! one column; the epoch location is written as scalar `longitude`,
//! `latitude` and `elevation` entries of the file metadata.
//!
//! ## Attributes
//!
//! Per-variable and global attributes live in the file key-value metadata,
//! in a fixed order, keyed `variable:attribute` (`time:units`,
//! `temperature:_FillValue`, ...). Global attributes have bare keys
//! (`Conventions`, `description`, `history`, ...). The embedded Arrow schema
//! is not written, so two runs over the same input produce the same metadata
//! apart from `history`.
//!
//! ## Architecture
//!
//! - [`time_axis`] - Minutes-since-reference encoding and decoding
//! - [`schema`] - Arrow schema, record batch and attribute layout
//! - [`writer`] - Atomic file writing and container naming
//! - [`inspector`] - Reading a container back

pub mod inspector;
pub mod schema;
pub mod time_axis;
pub mod writer;

#[cfg(test)]
pub mod tests;

pub use inspector::{ContainerContents, read_container};
pub use schema::{ContainerAttributes, build_record_batch, build_schema};
pub use time_axis::{decode_time, encode_time, encode_time_axis, reference_instant};
pub use writer::{ContainerWriter, WriteOutcome, container_file_name};
