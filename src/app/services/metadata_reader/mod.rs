//! Station metadata reader
//!
//! Turns provider station metadata into [`RawMetadataRecord`]s carrying an
//! explicit validity window and a location. DWD ships a `;`-separated
//! catalog inside every station bundle; KNMI bundles carry none, so their
//! locations come from a standalone station catalog CSV.
//!
//! Validity dates that do not parse are not guessed at. They become the
//! processing instant passed in by the caller, tagged as
//! [`DateBound::DefaultedToNow`](crate::app::models::DateBound).
//!
//! [`RawMetadataRecord`]: crate::app::models::RawMetadataRecord

pub mod catalog;
pub mod parser;

#[cfg(test)]
pub mod tests;

pub use catalog::{StationCatalog, StationCatalogEntry};
pub use parser::{parse_dwd_metadata, parse_metadata_date, read_metadata_entries};
