//! Standalone station catalog
//!
//! A comma-separated file with one line per station:
//! `station_id,station_name,latitude,longitude,elevation,url`. Used for
//! providers whose bundles carry no station metadata.

use crate::app::models::{DateBound, Location, RawMetadataRecord};
use crate::{Error, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// One station line of the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationCatalogEntry {
    pub station_id: String,
    pub station_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
    #[serde(default)]
    pub url: Option<String>,
}

impl StationCatalogEntry {
    pub fn location(&self) -> Location {
        Location::new(self.longitude, self.latitude, self.elevation)
    }
}

/// Station catalog indexed by station id
#[derive(Debug, Clone, Default)]
pub struct StationCatalog {
    entries: BTreeMap<String, StationCatalogEntry>,
}

/// Catalog key: ids compare without leading zeros
fn normalize_id(id: &str) -> String {
    let trimmed = id.trim().trim_start_matches('0');
    if trimmed.is_empty() && !id.trim().is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

impl StationCatalog {
    /// Load a catalog file
    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|e| {
            Error::io(format!("Failed to open station catalog {}", path.display()), e)
        })?;
        let catalog = Self::from_reader(file, &path.display().to_string())?;
        info!(
            "Loaded {} stations from catalog {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Read a catalog from any source; `source` labels errors
    pub fn from_reader<R: Read>(reader: R, source: &str) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut entries = BTreeMap::new();
        for (index, record) in csv_reader.deserialize::<StationCatalogEntry>().enumerate() {
            let entry = record.map_err(|e| {
                Error::csv_parsing(
                    source,
                    format!("Invalid station catalog line {}", index + 2),
                    Some(e),
                )
            })?;
            entry.location().validate()?;

            let key = normalize_id(&entry.station_id);
            if entries.contains_key(&key) {
                debug!("{}: duplicate catalog entry for station {}", source, key);
                continue;
            }
            entries.insert(key, entry);
        }

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a station, ignoring leading zeros in the id
    pub fn get(&self, station_id: &str) -> Option<&StationCatalogEntry> {
        self.entries.get(&normalize_id(station_id))
    }

    /// Metadata records for a station: one open-ended epoch
    ///
    /// The epoch starts at the earliest representable instant and ends at
    /// `now`, tagged as defaulted. Unknown stations have no records.
    pub fn records_for(&self, station_id: &str, now: NaiveDateTime) -> Vec<RawMetadataRecord> {
        self.get(station_id)
            .map(|entry| {
                vec![RawMetadataRecord {
                    station_id: station_id.to_string(),
                    valid_from: DateBound::Resolved(NaiveDateTime::MIN),
                    valid_to: DateBound::DefaultedToNow(now),
                    location: entry.location(),
                }]
            })
            .unwrap_or_default()
    }
}
