//! Station archive discovery
//!
//! Walks an input directory, recognises provider bundles by file name and
//! groups them per station. Each station's bundles are ordered by file name,
//! which is the order the series merger relies on.

use crate::config::Provider;
use crate::{Error, Result};
use regex::Regex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// All bundles of one station, in merge order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationArchives {
    pub station: String,
    pub archives: Vec<PathBuf>,
}

/// Whether two station ids name the same station (`44` and `00044` do)
pub fn same_station(a: &str, b: &str) -> bool {
    a.trim().trim_start_matches('0') == b.trim().trim_start_matches('0')
}

fn compile_pattern(provider: Provider) -> Result<Regex> {
    Regex::new(provider.archive_pattern()).map_err(|e| {
        Error::configuration(format!(
            "Invalid archive pattern for {}: {}",
            provider.label(),
            e
        ))
    })
}

/// Station id encoded in a bundle file name
pub fn station_id_from_file_name(pattern: &Regex, file_name: &str) -> Option<String> {
    pattern
        .captures(file_name)
        .and_then(|captures| captures.get(1))
        .map(|id| id.as_str().to_string())
}

/// Find every station bundle under `input_dir`
///
/// `filter` restricts the result to the listed station ids; an empty filter
/// keeps every station. Stations come out sorted by id.
pub fn discover_stations(
    input_dir: &Path,
    provider: Provider,
    filter: &[String],
) -> Result<Vec<StationArchives>> {
    if !input_dir.is_dir() {
        return Err(Error::configuration(format!(
            "Input directory does not exist: {}",
            input_dir.display()
        )));
    }

    let pattern = compile_pattern(provider)?;
    let mut stations: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    let mut scanned = 0usize;

    for entry in WalkDir::new(input_dir).follow_links(false) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        scanned += 1;

        let Some(file_name) = entry.file_name().to_str() else {
            continue;
        };
        let Some(station) = station_id_from_file_name(&pattern, file_name) else {
            continue;
        };
        if !filter.is_empty() && !filter.iter().any(|wanted| same_station(wanted, &station)) {
            continue;
        }

        stations
            .entry(station)
            .or_default()
            .push(entry.path().to_path_buf());
    }

    let result: Vec<StationArchives> = stations
        .into_iter()
        .map(|(station, mut archives)| {
            archives.sort_by(|a, b| a.file_name().cmp(&b.file_name()).then_with(|| a.cmp(b)));
            StationArchives { station, archives }
        })
        .collect();

    debug!(
        "Scanned {} files in {}, found {} {} stations",
        scanned,
        input_dir.display(),
        result.len(),
        provider.label()
    );
    Ok(result)
}
