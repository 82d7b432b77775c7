//! Zip bundle handling
//!
//! Picks the data entry out of a station bundle, hands it to [`RowReader`]
//! without extracting it to disk, and collects any metadata entries the
//! provider ships alongside the observations.

use super::parser::RowReader;
use super::stats::{ParseStats, RowError};
use crate::app::models::TimedRow;
use crate::config::Provider;
use crate::constants::dwd;
use crate::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use zip::ZipArchive;

/// A metadata file shipped inside a bundle
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataEntry {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Result of scanning one bundle
#[derive(Debug, Clone, Default)]
pub struct ArchiveScan {
    pub stats: ParseStats,
    pub metadata: Vec<MetadataEntry>,
}

/// An opened station bundle
pub struct OpenArchive {
    path: PathBuf,
    provider: Provider,
    archive: ZipArchive<File>,
    data_entry: String,
}

impl OpenArchive {
    /// Open a bundle and locate its data entry
    pub fn open(path: &Path, provider: Provider) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| Error::io(format!("Failed to open archive {}", path.display()), e))?;
        let archive = ZipArchive::new(file).map_err(|e| {
            Error::zip(path.display().to_string(), "Failed to read zip directory", e)
        })?;

        let entry_names: Vec<String> = archive.file_names().map(str::to_string).collect();
        let data_entry = select_data_entry(path, provider, &entry_names)?;
        debug!("Using entry '{}' of {}", data_entry, path.display());

        Ok(Self {
            path: path.to_path_buf(),
            provider,
            archive,
            data_entry,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name of the selected data entry
    pub fn data_entry(&self) -> &str {
        &self.data_entry
    }

    /// Lazy row scanner over the data entry
    pub fn rows(&mut self) -> Result<RowReader<impl Read + '_>> {
        let path = self.path.display().to_string();
        let entry = self
            .archive
            .by_name(&self.data_entry)
            .map_err(|e| Error::zip(path, "Failed to open data entry", e))?;
        Ok(RowReader::new(entry, self.provider))
    }

    /// Provider metadata files contained in the bundle
    pub fn metadata_entries(&mut self) -> Result<Vec<MetadataEntry>> {
        if self.provider != Provider::Dwd {
            return Ok(Vec::new());
        }

        let names: Vec<String> = self
            .archive
            .file_names()
            .filter(|name| {
                dwd::METADATA_ENTRY_MARKERS
                    .iter()
                    .any(|marker| name.contains(marker))
            })
            .map(str::to_string)
            .collect();

        let mut entries = Vec::with_capacity(names.len());
        for name in names {
            let mut entry = self.archive.by_name(&name).map_err(|e| {
                Error::zip(self.path.display().to_string(), "Failed to open metadata entry", e)
            })?;
            let mut bytes = Vec::new();
            entry
                .read_to_end(&mut bytes)
                .map_err(|e| Error::io(format!("Failed to read {}", name), e))?;
            entries.push(MetadataEntry { name, bytes });
        }
        Ok(entries)
    }
}

/// Pick the observation entry of a bundle
///
/// DWD bundles mark it with `produkt` in the name. KNMI bundles hold a single
/// text file, or one named after the bundle itself.
fn select_data_entry(path: &Path, provider: Provider, names: &[String]) -> Result<String> {
    let candidates: Vec<&String> = names
        .iter()
        .filter(|name| !name.ends_with('/'))
        .filter(|name| match provider {
            Provider::Dwd => name.contains(dwd::DATA_ENTRY_MARKER),
            Provider::Knmi => name.to_ascii_lowercase().ends_with(".txt"),
        })
        .collect();

    match candidates.as_slice() {
        [only] => Ok((*only).clone()),
        [] => Err(Error::archive_layout(
            path.display().to_string(),
            "no data entry found",
        )),
        many => {
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
            let expected = format!("{}.txt", stem);
            many.iter()
                .find(|name| entry_file_name(name) == expected)
                .map(|name| (*name).clone())
                .ok_or_else(|| {
                    Error::archive_layout(
                        path.display().to_string(),
                        format!("{} candidate data entries", many.len()),
                    )
                })
        }
    }
}

fn entry_file_name(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

/// Scan one bundle, streaming every usable row into `on_row`
///
/// Skipped rows are counted in the returned statistics. A data entry that
/// never shows the header sentinel or cannot be read to the end (bad
/// checksum, truncated stream) is an error for the bundle.
pub fn scan_archive<F>(path: &Path, provider: Provider, mut on_row: F) -> Result<ArchiveScan>
where
    F: FnMut(TimedRow),
{
    let mut archive = OpenArchive::open(path, provider)?;

    let stats = {
        let mut rows = archive.rows()?;
        for row in rows.by_ref() {
            match row {
                Ok(row) => on_row(row),
                Err(RowError::Read { message, .. }) => {
                    return Err(Error::io(
                        format!("Failed to read data entry of {}", path.display()),
                        std::io::Error::new(std::io::ErrorKind::InvalidData, message),
                    ));
                }
                Err(error) => debug!("{}: {}", path.display(), error),
            }
        }
        if rows.header().is_none() {
            return Err(Error::missing_header(
                path.display().to_string(),
                provider.header_sentinel(),
            ));
        }
        rows.into_stats()
    };

    if stats.rows_skipped > 0 {
        warn!(
            "{}: skipped {} of {} data lines",
            path.display(),
            stats.rows_skipped,
            stats.total_records
        );
    }

    let metadata = archive.metadata_entries()?;
    Ok(ArchiveScan { stats, metadata })
}
